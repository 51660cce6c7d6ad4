// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;
use crate::error::ConfigError;

/// Everything a run needs, resolved once at startup and passed down by reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppOptions {
    pub endpoints: Endpoints,
    pub fetch: FetchOptions,
    pub sheet: SheetOptions,
    /// Join entity name/team onto history rows before publishing.
    pub enrich_history: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    pub api_base: String,
    pub standings_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            api_base: s!(DEFAULT_API_BASE),
            standings_url: s!(DEFAULT_STANDINGS_URL),
        }
    }
}

impl Endpoints {
    pub fn bootstrap_url(&self) -> String {
        join!(self.api_base.trim_end_matches('/'), "/bootstrap-static/")
    }
    pub fn fixtures_url(&self) -> String {
        join!(self.api_base.trim_end_matches('/'), "/fixtures/")
    }
    pub fn element_summary_url(&self, id: i64) -> String {
        format!("{}/element-summary/{}/", self.api_base.trim_end_matches('/'), id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchOptions {
    pub workers: usize,
    pub timeout: Duration,
    /// Fixed pause after each per-entity request. Not exposed as a knob.
    pub pause: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            workers: WORKERS,
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            pause: Duration::from_millis(REQUEST_PAUSE_MS),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetOptions {
    pub spreadsheet_key: String,
    pub credential_file: PathBuf,
    pub sink_dir: PathBuf,
}

impl SheetOptions {
    pub fn new(spreadsheet_key: impl Into<String>) -> Self {
        Self {
            spreadsheet_key: spreadsheet_key.into(),
            credential_file: PathBuf::from(DEFAULT_CREDENTIAL_FILE),
            sink_dir: PathBuf::from(DEFAULT_SINK_DIR),
        }
    }
}

impl AppOptions {
    /// Defaults everywhere except the one value that has none.
    pub fn new(spreadsheet_key: impl Into<String>) -> Self {
        Self {
            endpoints: Endpoints::default(),
            fetch: FetchOptions::default(),
            sheet: SheetOptions::new(spreadsheet_key),
            enrich_history: true,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let key = get("SPREADSHEET_KEY").ok_or(ConfigError::Missing("SPREADSHEET_KEY"))?;
        let mut opts = Self::new(key);

        if let Some(v) = get("SERVICE_ACCOUNT_FILE") {
            opts.sheet.credential_file = PathBuf::from(v);
        }
        if let Some(v) = get("SINK_DIR") {
            opts.sheet.sink_dir = PathBuf::from(v);
        }
        if let Some(v) = get("FPL_API_BASE") {
            opts.endpoints.api_base = v;
        }
        if let Some(v) = get("STANDINGS_URL") {
            opts.endpoints.standings_url = v;
        }
        if let Some(v) = get("FETCH_WORKERS") {
            opts.fetch.workers = parse_positive("FETCH_WORKERS", &v)? as usize;
        }
        if let Some(v) = get("REQUEST_TIMEOUT_SECS") {
            opts.fetch.timeout = Duration::from_secs(parse_positive("REQUEST_TIMEOUT_SECS", &v)?);
        }
        if let Some(v) = get("ENRICH_HISTORY") {
            opts.enrich_history = parse_bool("ENRICH_HISTORY", &v)?;
        }
        Ok(opts)
    }
}

fn parse_positive(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    match value.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        Ok(_) => Err(ConfigError::Invalid { var, value: s!(value), reason: s!("must be at least 1") }),
        Err(e) => Err(ConfigError::Invalid { var, value: s!(value), reason: e.to_string() }),
    }
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid { var, value: s!(value), reason: s!("expected true/false") }),
    }
}
