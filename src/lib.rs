// src/lib.rs

#[macro_use]
pub mod macros;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod specs;
pub mod table;

pub mod csv;
pub mod file;
pub mod log;
pub mod progress;
pub mod reconcile;
pub mod runner;
pub mod scrape;
pub mod sink;
