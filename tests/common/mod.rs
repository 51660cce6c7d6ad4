// tests/common/mod.rs
//
// Scripted HTTP source and fixtures shared by the integration tests.
//
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use serde_json::{Value, json};

use pl_pipeline::config::AppOptions;
use pl_pipeline::core::net::Source;
use pl_pipeline::error::FetchError;
use pl_pipeline::progress::Progress;

pub const API: &str = "http://fpl.test/api";
pub const STANDINGS: &str = "http://bbc.test/table";

pub enum Reply {
    Body(String),
    Status(u16),
    Broken(&'static str),
}

/// Canned responses by URL. Anything unscripted is a 404.
#[derive(Default)]
pub struct ScriptedSource {
    replies: HashMap<String, Reply>,
    pub calls: Mutex<Vec<(String, Option<String>)>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json(mut self, url: impl Into<String>, body: Value) -> Self {
        self.replies.insert(url.into(), Reply::Body(body.to_string()));
        self
    }

    pub fn text(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.replies.insert(url.into(), Reply::Body(body.into()));
        self
    }

    pub fn status(mut self, url: impl Into<String>, status: u16) -> Self {
        self.replies.insert(url.into(), Reply::Status(status));
        self
    }

    pub fn broken(mut self, url: impl Into<String>, why: &'static str) -> Self {
        self.replies.insert(url.into(), Reply::Broken(why));
        self
    }

    pub fn user_agent_for(&self, url: &str) -> Option<String> {
        let calls = self.calls.lock().unwrap();
        calls.iter().find(|(u, _)| u == url).and_then(|(_, ua)| ua.clone())
    }
}

impl Source for ScriptedSource {
    fn get_text(&self, url: &str, user_agent: Option<&str>) -> Result<String, FetchError> {
        self.calls.lock().unwrap().push((url.to_string(), user_agent.map(str::to_string)));
        match self.replies.get(url) {
            Some(Reply::Body(b)) => Ok(b.clone()),
            Some(Reply::Status(s)) => Err(FetchError::Status { url: url.to_string(), status: *s }),
            Some(Reply::Broken(why)) => Err(FetchError::Other(format!("{url}: {why}"))),
            None => Err(FetchError::Status { url: url.to_string(), status: 404 }),
        }
    }
}

pub fn summary_url(id: i64) -> String {
    format!("{API}/element-summary/{id}/")
}

pub fn bootstrap_url() -> String {
    format!("{API}/bootstrap-static/")
}

pub fn fixtures_url() -> String {
    format!("{API}/fixtures/")
}

/// Options pointing at the scripted hosts, with no politeness pause.
pub fn test_options() -> AppOptions {
    let mut opts = AppOptions::new("test-workbook");
    opts.endpoints.api_base = API.to_string();
    opts.endpoints.standings_url = STANDINGS.to_string();
    opts.fetch.pause = Duration::ZERO;
    opts.fetch.workers = 3;
    opts
}

pub fn history_body(id: i64, seasons: &[&str]) -> Value {
    let past: Vec<Value> = seasons
        .iter()
        .enumerate()
        .map(|(i, s)| json!({"season_name": s, "element_code": id * 100, "total_points": 100 + i as i64}))
        .collect();
    json!({"fixtures": [], "history": [], "history_past": past})
}

pub fn standings_fixture() -> String {
    std::fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/standings.html"))
        .expect("read tests/fixtures/standings.html")
}

/// Progress sink that remembers what it was told.
#[derive(Default)]
pub struct RecordingProgress {
    pub total: Option<usize>,
    pub done: Vec<i64>,
    pub failed: Vec<(i64, String)>,
    pub lines: Vec<String>,
    pub finished: usize,
}

impl Progress for RecordingProgress {
    fn begin(&mut self, total: usize) { self.total = Some(total); }
    fn log(&mut self, msg: &str) { self.lines.push(msg.to_string()); }
    fn item_done(&mut self, id: i64) { self.done.push(id); }
    fn item_failed(&mut self, id: i64, cause: &str) { self.failed.push((id, cause.to_string())); }
    fn finish(&mut self) { self.finished += 1; }
}
