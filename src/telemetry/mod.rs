pub mod config;
pub mod ctx;
pub mod emit;
pub mod ops;

use ctx::LogCtx;

pub fn page() -> LogCtx<ops::page::Page> { LogCtx::new() }
pub fn jams() -> LogCtx<ops::jams::Jams> { LogCtx::new() }
pub fn team() -> LogCtx<ops::team::Team> { LogCtx::new() }
pub fn extract() -> LogCtx<ops::extract::Extract> { LogCtx::new() }
pub fn ldjam() -> LogCtx<ops::ldjam::Ldjam> { LogCtx::new() }
