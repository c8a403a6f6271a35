use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Extract;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Read, Prompt, Complete, Fallback }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::Read => "read",
        Phase::Prompt => "prompt",
        Phase::Complete => "complete",
        Phase::Fallback => "fallback",
    }}
    fn span(&self) -> Span { match self {
        Phase::Read => info_span!("read"),
        Phase::Prompt => info_span!("prompt"),
        Phase::Complete => info_span!("complete"),
        Phase::Fallback => info_span!("fallback"),
    }}
}

impl OpMarker for Extract {
    const NAME: &'static str = "extract";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("extract") }
}
