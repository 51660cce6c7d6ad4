// tests/history_isolation.rs
//
// Per-player history loop: failures stay per player, rows never reference
// an id that wasn't asked for, and output order is stable.
//
mod common;

use std::collections::BTreeSet;

use common::*;
use pl_pipeline::config::Endpoints;
use pl_pipeline::progress::NullProgress;
use pl_pipeline::scrape;
use pl_pipeline::specs::history::PLAYER_ID;
use serde_json::json;

fn endpoints() -> Endpoints {
    test_options().endpoints
}

fn ids_in(t: &pl_pipeline::table::Table) -> Vec<i64> {
    t.column(PLAYER_ID).filter_map(|c| c.as_i64()).collect()
}

#[test]
fn one_failure_among_many() {
    let ids: Vec<i64> = (1..=12).collect();
    let mut src = ScriptedSource::new();
    for &id in &ids {
        src = if id == 7 {
            src.broken(summary_url(id), "connection reset")
        } else {
            src.json(summary_url(id), history_body(id, &["2022/23"]))
        };
    }

    let opts = test_options();
    let mut progress = RecordingProgress::default();
    let out = scrape::collect_history(&src, &endpoints(), &ids, &opts.fetch, &mut progress);

    let expected: Vec<i64> = ids.iter().copied().filter(|&id| id != 7).collect();
    assert_eq!(ids_in(&out.table), expected, "rows grouped in input order");
    assert_eq!(out.failures.len(), 1);
    assert_eq!(out.failures[0].id, 7);
    assert!(out.failures[0].cause.to_string().contains("connection reset"));

    assert_eq!(progress.total, Some(12));
    assert_eq!(progress.done.len(), 11);
    assert_eq!(progress.failed.len(), 1);
    assert_eq!(progress.finished, 1);
}

#[test]
fn output_ids_are_a_subset_of_input() {
    let ids = [3, 1, 4, 15, 9, 2, 6];
    let mut src = ScriptedSource::new();
    for &id in &ids {
        src = match id % 3 {
            0 => src.status(summary_url(id), 500),
            1 => src.json(summary_url(id), history_body(id, &["2021/22", "2022/23"])),
            _ => src.json(summary_url(id), json!({"history_past": []})),
        };
    }
    // A response that talks about someone else must not leak a foreign id.
    src = src.json(summary_url(4), history_body(999, &["2020/21"]));

    let opts = test_options();
    let out = scrape::collect_history(&src, &endpoints(), &ids, &opts.fetch, &mut NullProgress);

    let input: BTreeSet<i64> = ids.iter().copied().collect();
    let seen: BTreeSet<i64> = ids_in(&out.table).into_iter().collect();
    assert!(seen.is_subset(&input));
    assert_eq!(seen, BTreeSet::from([1, 4]));
    assert_eq!(out.table.len(), 3);

    let failed: BTreeSet<i64> = out.failures.iter().map(|f| f.id).collect();
    assert_eq!(failed, BTreeSet::from([3, 15, 9, 6]));
}

#[test]
fn malformed_body_is_a_per_player_failure() {
    let src = ScriptedSource::new()
        .text(summary_url(1), "<html>rate limited</html>")
        .json(summary_url(2), json!(["not", "an", "object"]))
        .json(summary_url(3), history_body(3, &["2023/24"]));

    let opts = test_options();
    let out = scrape::collect_history(&src, &endpoints(), &[1, 2, 3], &opts.fetch, &mut NullProgress);
    assert_eq!(ids_in(&out.table), vec![3]);
    assert_eq!(out.failures.iter().map(|f| f.id).collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn everything_failing_is_an_empty_table() {
    let src = ScriptedSource::new(); // every URL 404s
    let opts = test_options();
    let out = scrape::collect_history(&src, &endpoints(), &[1, 2, 3], &opts.fetch, &mut NullProgress);
    assert!(out.table.is_empty());
    assert_eq!(out.failures.len(), 3);

    let out = scrape::collect_history(&src, &endpoints(), &[], &opts.fetch, &mut NullProgress);
    assert!(out.table.is_empty());
    assert!(out.failures.is_empty());
}

#[test]
fn single_worker_matches_pool() {
    let ids: Vec<i64> = (1..=6).collect();
    let mut src = ScriptedSource::new();
    for &id in &ids {
        src = src.json(summary_url(id), history_body(id, &["2022/23", "2023/24"]));
    }
    let mut opts = test_options();
    let pooled = scrape::collect_history(&src, &endpoints(), &ids, &opts.fetch, &mut NullProgress);
    opts.fetch.workers = 1;
    let serial = scrape::collect_history(&src, &endpoints(), &ids, &opts.fetch, &mut NullProgress);
    assert_eq!(pooled.table, serial.table);
    assert_eq!(pooled.table.len(), 12);
}
