use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Jams;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Fetch, Collect }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::Fetch => "fetch",
        Phase::Collect => "collect",
    }}
    fn span(&self) -> Span { match self {
        Phase::Fetch => info_span!("fetch"),
        Phase::Collect => info_span!("collect"),
    }}
}

impl OpMarker for Jams {
    const NAME: &'static str = "jams";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("jams") }
}
