// src/reconcile.rs
//! Joins between the fetched tables, run once every fetch is done.

use std::collections::HashMap;

use crate::specs::history::PLAYER_ID;
use crate::table::{Cell, Table};

pub const TEAM_NAME: &str = "team_name";
pub const WEB_NAME: &str = "web_name";

/// `id → name` from the team lookup. Rows missing either are ignored, so
/// a nameless team maps players to `Missing`, not an empty string.
pub fn team_names(teams: &Table) -> HashMap<i64, String> {
    let (Some(id), Some(name)) = (teams.col("id"), teams.col("name")) else {
        return HashMap::new();
    };
    teams
        .rows
        .iter()
        .filter(|r| !r[name].is_missing())
        .filter_map(|r| Some((r[id].as_i64()?, r[name].to_string())))
        .collect()
}

/// Add (or refresh) `team_name` on every player row. An unknown team id is
/// `Missing`, not an error.
pub fn attach_team_names(players: &mut Table, names: &HashMap<i64, String>) {
    let team = players.col("team");
    players.set_column(TEAM_NAME, |row| {
        team.and_then(|c| row[c].as_i64())
            .and_then(|id| names.get(&id))
            .map_or(Cell::Missing, |n| Cell::from(n.as_str()))
    });
}

/// Inner join of history onto players by `player_id = id`, appending the
/// player's `web_name` and `team_name`. History rows whose player isn't in
/// `players` are dropped; row order is kept.
pub fn enrich_history(history: &Table, players: &Table) -> Table {
    if history.is_empty() {
        return history.clone();
    }
    let Some(pid) = history.col(PLAYER_ID) else {
        tracing::warn!("history table has no {PLAYER_ID} column, skipping enrichment");
        return history.clone();
    };

    let lookup: HashMap<i64, (Cell, Cell)> = match players.col("id") {
        Some(id) => {
            let web = players.col(WEB_NAME);
            let team = players.col(TEAM_NAME);
            let pick = |r: &[Cell], c: Option<usize>| c.map(|c| r[c].clone()).unwrap_or_default();
            players
                .rows
                .iter()
                .filter_map(|r| Some((r[id].as_i64()?, (pick(r, web), pick(r, team)))))
                .collect()
        }
        None => HashMap::new(),
    };

    let mut out = Table::new(history.columns.iter().cloned());
    // Don't duplicate columns a re-run might already have added.
    let extra: Vec<&str> = [WEB_NAME, TEAM_NAME]
        .into_iter()
        .filter(|c| history.col(c).is_none())
        .collect();
    out.columns.extend(extra.iter().map(|c| s!(*c)));

    let mut dropped = 0usize;
    for row in &history.rows {
        let Some((web, team)) = row[pid].as_i64().and_then(|id| lookup.get(&id)) else {
            dropped += 1;
            continue;
        };
        let mut r = row.clone();
        for c in &extra {
            r.push(if *c == WEB_NAME { web.clone() } else { team.clone() });
        }
        out.rows.push(r);
    }

    if dropped > 0 {
        tracing::debug!(dropped, "history rows without a matching player were dropped");
    }
    out
}
