// src/error.rs
//! Error taxonomy for the pipeline.
//!
//! Only [`PipelineError`] ever escapes a run. Everything else is either
//! recovered where it happens (one entity, one table) or degraded into an
//! empty result; see `scrape` and `sink::sync` for where that happens.

use thiserror::Error;

/// A single network fetch that did not produce usable data.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("malformed JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Body parsed but is not the shape the endpoint promises
    /// (e.g. an object where an array is expected).
    #[error("unexpected response shape from {url}: {detail}")]
    Shape { url: String, detail: String },

    /// Free-form failure from a `Source` that isn't HTTP-backed.
    #[error("{0}")]
    Other(String),
}

/// Why the standings normaliser produced nothing.
#[derive(Debug, Error)]
pub enum StandingsError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("no <table> found on the standings page")]
    NoTable,

    #[error("unrecognised standings layout ({columns} columns, headers {headers:?})")]
    UnrecognisedLayout { columns: usize, headers: Vec<String> },
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("cannot read credential file {path}: {source}")]
    CredentialIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid credential file {path}: {detail}")]
    CredentialInvalid { path: String, detail: String },

    #[error("sink not opened; call open() first")]
    NotOpen,

    #[error("no such table: {0}")]
    NoSuchTable(String),

    #[error("sink I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),

    #[error("invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Fatal, run-aborting failures from the reference and fixture stages.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{stage} fetch failed: {source}")]
    Stage {
        stage: &'static str,
        #[source]
        source: FetchError,
    },
}
