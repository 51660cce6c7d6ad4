// src/specs/mod.rs
//! # Source "specs"
//!
//! One module per upstream endpoint. Each spec knows the *shape* of one
//! response and turns it into a canonical [`Table`](crate::table::Table).
//!
//! ## What lives here
//! - **Pure parsing** of already-fetched bodies: JSON values for the fantasy
//!   API, an HTML document for the standings page.
//! - **Column choice**: which keys are projected, which pass through, what a
//!   derived column (`player_id`, `Position`) is called.
//! - **Tolerant normalisation** of scraped tables (multi-level headers,
//!   header aliases, fused position/team cells, junk numerics).
//!
//! ## What does **not** live here
//! - HTTP, retries, worker pools: `scrape::collect_*` fetches and hands the
//!   body over.
//! - Joins across sources: see `reconcile`.
//! - Anything sink-shaped.
//!
//! ## Typical call chain
//! ```text
//! runner → scrape::collect_* → Source::get_json / get_text
//!                            ↘ specs::<endpoint>::parse(body) → Table
//! ```
//!
//! ## Conventions
//! - A body of the wrong *kind* (array where an object is expected) is a
//!   `FetchError::Shape`. A missing optional section is an empty table.
//! - Specs are testable offline against literal JSON or saved HTML.
pub mod bootstrap;
pub mod fixtures;
pub mod history;
pub mod standings;
