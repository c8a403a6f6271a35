use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Team;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Read, Locate, Parse, Fallback }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::Read => "read",
        Phase::Locate => "locate",
        Phase::Parse => "parse",
        Phase::Fallback => "fallback",
    }}
    fn span(&self) -> Span { match self {
        Phase::Read => info_span!("read"),
        Phase::Locate => info_span!("locate"),
        Phase::Parse => info_span!("parse"),
        Phase::Fallback => info_span!("fallback"),
    }}
}

impl OpMarker for Team {
    const NAME: &'static str = "team";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("team") }
}
