//! Scraping and credit-extraction helpers for itch.io game-jam pages.
//!
//! [`team::extract_team`] is the pure core: bio text in, ordered team
//! members out. The other modules fetch pages, list jams, export Ludum Dare
//! results, and ask a chat model for a role map.

pub mod bio;
pub mod extract;
pub mod jams;
pub mod ldjam;
pub mod llm;
pub mod page;
pub mod team;
pub mod telemetry;

pub use team::{extract_team, TeamMember};
