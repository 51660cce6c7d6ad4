// src/specs/bootstrap.rs
//! Parser for the league-wide reference endpoint (`bootstrap-static`).
//!
//! The response is one object with three arrays we care about:
//! `elements` (players), `teams` and `events` (gameweeks). Players are
//! projected to a fixed column set; teams and gameweeks pass through as-is.
//! A missing array yields an empty table rather than an error.

use serde_json::Value;

use crate::error::FetchError;
use crate::table::{Cell, Table};

pub const PLAYER_COLUMNS: &[&str] = &[
    "id",
    "web_name",
    "first_name",
    "second_name",
    "element_type",
    "team",
    "total_points",
    "now_cost",
    "form",
    "selected_by_percent",
    "transfers_in",
    "transfers_out",
    "goals_scored",
    "assists",
    "yellow_cards",
    "red_cards",
];

pub struct Bootstrap {
    pub players: Table,
    pub teams: Table,
    pub gameweeks: Table,
}

impl Bootstrap {
    /// Player ids in the order the endpoint listed them. Rows without a
    /// usable integer id are skipped.
    pub fn player_ids(&self) -> Vec<i64> {
        self.players.column("id").filter_map(Cell::as_i64).collect()
    }
}

pub fn parse(body: &Value, url: &str) -> Result<Bootstrap, FetchError> {
    let obj = body.as_object().ok_or_else(|| FetchError::Shape {
        url: s!(url),
        detail: s!("expected a JSON object"),
    })?;

    let records = |key: &str| -> Table {
        match obj.get(key).and_then(Value::as_array) {
            Some(items) => Table::from_records(items),
            None => {
                tracing::warn!(key, "reference response has no `{key}` array");
                Table::empty()
            }
        }
    };

    Ok(Bootstrap {
        players: records("elements").project(PLAYER_COLUMNS),
        teams: records("teams"),
        gameweeks: records("events"),
    })
}
