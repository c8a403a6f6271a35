pub mod page;
pub mod jams;
pub mod team;
pub mod extract;
pub mod ldjam;
