// src/scrape/mod.rs
mod scrape;
pub use scrape::collect_reference;
pub use scrape::collect_fixtures;
pub use scrape::collect_history;
pub use scrape::collect_standings;
pub use scrape::{EntityFailure, HistoryOutcome};
