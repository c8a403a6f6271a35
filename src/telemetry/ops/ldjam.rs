use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Ldjam;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Results, Feed, Details, Export }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::Results => "results",
        Phase::Feed => "feed",
        Phase::Details => "details",
        Phase::Export => "export",
    }}
    fn span(&self) -> Span { match self {
        Phase::Results => info_span!("results"),
        Phase::Feed => info_span!("feed"),
        Phase::Details => info_span!("details"),
        Phase::Export => info_span!("export"),
    }}
}

impl OpMarker for Ldjam {
    const NAME: &'static str = "ldjam";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("ldjam") }
}
