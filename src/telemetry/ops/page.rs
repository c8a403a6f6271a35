use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Page;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Fetch, Select }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::Fetch => "fetch",
        Phase::Select => "select",
    }}
    fn span(&self) -> Span { match self {
        Phase::Fetch => info_span!("fetch"),
        Phase::Select => info_span!("select"),
    }}
}

impl OpMarker for Page {
    const NAME: &'static str = "page";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("page") }
}
