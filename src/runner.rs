// src/runner.rs
//! Orchestration: fetch everything, reconcile, publish.
//!
//! ```text
//! reference ─┐ (fatal)
//! fixtures  ─┤ (fatal)
//! history   ─┤ per-player, failures isolated
//! standings ─┘ degrades to empty
//!      └─ reconcile ─ publish (per-table isolation)
//! ```

use crate::{
    config::{ AppOptions, consts::* },
    core::net::{ HttpSource, Source },
    error::PipelineError,
    progress::Progress,
    reconcile,
    scrape::{ self, EntityFailure },
    sink::{ TabularSink, WorkbookSink, sync::{ self, PublishReport } },
    table::Table,
};

/// Everything one run fetched, reconciled and ready for the sink.
#[derive(Debug, Default)]
pub struct Acquired {
    pub players: Table,
    pub teams: Table,
    pub gameweeks: Table,
    pub fixtures: Table,
    pub history: Table,
    pub standings: Table,
    pub history_failures: Vec<EntityFailure>,
}

impl Acquired {
    /// Destination sheet for each table, in publish order.
    pub fn tables(&self) -> [(&'static str, &Table); 6] {
        [
            (SHEET_HISTORY, &self.history),
            (SHEET_PLAYERS, &self.players),
            (SHEET_FIXTURES, &self.fixtures),
            (SHEET_STANDINGS, &self.standings),
            (SHEET_TEAMS, &self.teams),
            (SHEET_GAMEWEEKS, &self.gameweeks),
        ]
    }
}

/// Summary of what was produced.
#[derive(Debug)]
pub struct RunSummary {
    pub players: usize,
    pub history_rows: usize,
    pub history_failures: usize,
    pub report: PublishReport,
}

/// Fetch and reconcile. Only the reference and fixture stages can fail.
pub fn acquire(
    opts: &AppOptions,
    source: &dyn Source,
    progress: &mut dyn Progress,
) -> Result<Acquired, PipelineError> {
    let reference = scrape::collect_reference(source, &opts.endpoints, progress)?;
    let fixtures = scrape::collect_fixtures(source, &opts.endpoints, progress)?;

    let ids = reference.player_ids();
    let history = scrape::collect_history(source, &opts.endpoints, &ids, &opts.fetch, progress);
    let standings = scrape::collect_standings(source, &opts.endpoints.standings_url, progress);

    progress.log("Reconciling…");
    let mut players = reference.players;
    reconcile::attach_team_names(&mut players, &reconcile::team_names(&reference.teams));

    let history_table = if opts.enrich_history {
        reconcile::enrich_history(&history.table, &players)
    } else {
        history.table
    };

    Ok(Acquired {
        players,
        teams: reference.teams,
        gameweeks: reference.gameweeks,
        fixtures,
        history: history_table,
        standings,
        history_failures: history.failures,
    })
}

pub fn publish(
    opts: &AppOptions,
    acquired: &Acquired,
    sink: Option<&mut dyn TabularSink>,
    progress: &mut dyn Progress,
) -> PublishReport {
    sync::publish_all(sink, &opts.sheet.spreadsheet_key, &acquired.tables(), progress)
}

/// Top-level runner against the live endpoints and the workbook sink.
pub fn run(opts: &AppOptions, progress: &mut dyn Progress) -> Result<RunSummary, PipelineError> {
    let source = HttpSource::new(opts.fetch.timeout)
        .map_err(|source| PipelineError::Stage { stage: "http client", source })?;

    let acquired = acquire(opts, &source, progress)?;

    // Authenticate once; a failure only disables publishing.
    let mut sink = match WorkbookSink::authenticate(&opts.sheet) {
        Ok(s) => Some(s),
        Err(e) => {
            tracing::error!(cause = %e, "sink authentication failed");
            None
        }
    };
    let report = publish(opts, &acquired, sink.as_mut().map(|s| s as &mut dyn TabularSink), progress);

    Ok(RunSummary {
        players: acquired.players.len(),
        history_rows: acquired.history.len(),
        history_failures: acquired.history_failures.len(),
        report,
    })
}
