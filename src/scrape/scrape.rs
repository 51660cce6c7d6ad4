// src/scrape/scrape.rs
use std::{
    thread, time::Duration,
    sync::{ mpsc, atomic::{ AtomicUsize, Ordering }}
};

use crate::{
    config::{ Endpoints, FetchOptions },
    config::consts::{ BROWSER_USER_AGENT, JITTER_MS },
    core::net::Source,
    error::{ FetchError, PipelineError, StandingsError },
    progress::Progress,
    specs::{ bootstrap::{ self, Bootstrap }, fixtures, history, standings },
    table::Table,
};

/// One entity whose detail fetch was skipped, and why.
#[derive(Debug)]
pub struct EntityFailure {
    pub id: i64,
    pub cause: FetchError,
}

/// Aggregate of the per-entity loop. `table` only ever holds rows for ids
/// that were asked for; every other id is either in `failures` or simply
/// had no history.
#[derive(Debug, Default)]
pub struct HistoryOutcome {
    pub table: Table,
    pub failures: Vec<EntityFailure>,
}

/// Reference data. Any failure here aborts the run.
pub fn collect_reference(
    source: &dyn Source,
    endpoints: &Endpoints,
    progress: &mut dyn Progress,
) -> Result<Bootstrap, PipelineError> {
    progress.log("Fetching reference data…");
    let url = endpoints.bootstrap_url();
    let b = source
        .get_json(&url)
        .and_then(|body| bootstrap::parse(&body, &url))
        .map_err(|source| PipelineError::Stage { stage: "reference", source })?;

    tracing::info!(
        players = b.players.len(),
        teams = b.teams.len(),
        gameweeks = b.gameweeks.len(),
        "reference data fetched"
    );
    Ok(b)
}

/// Fixture list. Any failure here aborts the run.
pub fn collect_fixtures(
    source: &dyn Source,
    endpoints: &Endpoints,
    progress: &mut dyn Progress,
) -> Result<Table, PipelineError> {
    progress.log("Fetching fixtures…");
    let url = endpoints.fixtures_url();
    let t = source
        .get_json(&url)
        .and_then(|body| fixtures::parse(&body, &url))
        .map_err(|source| PipelineError::Stage { stage: "fixtures", source })?;

    tracing::info!(fixtures = t.len(), "fixtures fetched");
    Ok(t)
}

/// Fetch every entity's past seasons on a small worker pool.
///
/// A failed id is recorded and skipped; it never stops the other workers
/// or drops rows already gathered. Rows come back grouped by id in the
/// order of `ids`, whatever order the workers finished in.
pub fn collect_history(
    source: &dyn Source,
    endpoints: &Endpoints,
    ids: &[i64],
    opts: &FetchOptions,
    progress: &mut dyn Progress,
) -> HistoryOutcome {
    progress.log("Fetching per-player history…");
    progress.begin(ids.len());

    if ids.is_empty() {
        progress.finish();
        return HistoryOutcome::default();
    }

    type Item = (usize, i64, Result<Table, FetchError>);

    let counter = AtomicUsize::new(0);
    let (res_tx, res_rx) = mpsc::channel::<Item>();
    let workers = opts.workers.min(ids.len()).max(1);

    let mut per_entity: Vec<(usize, Table)> = Vec::new();
    let mut failures: Vec<(usize, EntityFailure)> = Vec::new();

    thread::scope(|scope| {
        // Spawn workers
        for _ in 0..workers {
            let idx = &counter;
            let tx = res_tx.clone();

            scope.spawn(move || {
                loop {
                    let i = idx.fetch_add(1, Ordering::Relaxed);
                    let Some(&id) = ids.get(i) else { break };

                    let url = endpoints.element_summary_url(id);
                    let result = source
                        .get_json(&url)
                        .and_then(|body| history::parse(&body, id, &url));

                    if tx.send((i, id, result)).is_err() {
                        break;
                    }
                    if !opts.pause.is_zero() {
                        let jitter = id.unsigned_abs() % JITTER_MS;
                        thread::sleep(opts.pause + Duration::from_millis(jitter)); // be polite
                    }
                }
            });
        }
        drop(res_tx); // main thread is sole receiver now

        // Aggregate results
        for (i, id, result) in res_rx {
            match result {
                Ok(rows) => {
                    if !rows.is_empty() {
                        per_entity.push((i, rows));
                    }
                    progress.item_done(id);
                }
                Err(cause) => {
                    progress.item_failed(id, &cause.to_string());
                    failures.push((i, EntityFailure { id, cause }));
                }
            }
        }
    });

    progress.finish();

    // Sort
    per_entity.sort_by_key(|(i, _)| *i);
    failures.sort_by_key(|(i, _)| *i);

    let mut table = Table::empty();
    for (_, rows) in per_entity {
        table.append(rows);
    }

    tracing::info!(
        entities = ids.len(),
        rows = table.len(),
        failed = failures.len(),
        "history fetched"
    );

    HistoryOutcome { table, failures: failures.into_iter().map(|(_, f)| f).collect() }
}

/// League table from the standings page. Supplementary: any failure is
/// logged and comes back as an empty table.
pub fn collect_standings(source: &dyn Source, url: &str, progress: &mut dyn Progress) -> Table {
    progress.log("Fetching standings…");
    let result = source
        .get_text(url, Some(BROWSER_USER_AGENT))
        .map_err(StandingsError::from)
        .and_then(|doc| standings::parse(&doc));

    match result {
        Ok(t) => {
            tracing::info!(teams = t.len(), "standings normalised");
            t
        }
        Err(e) => {
            tracing::warn!(url, cause = %e, "standings unavailable, continuing without");
            Table::empty()
        }
    }
}
