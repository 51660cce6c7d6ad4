// src/specs/history.rs
//! Parser for the per-player detail endpoint (`element-summary/{id}`).
//!
//! Only `history_past` is used: one record per past season, whatever keys
//! upstream sends. Each row is tagged with the `player_id` it was fetched
//! for. No section, or an empty one, is zero rows and not an error.

use serde_json::Value;

use crate::error::FetchError;
use crate::table::{Cell, Table};

pub const HISTORY_KEY: &str = "history_past";
pub const PLAYER_ID: &str = "player_id";

pub fn parse(body: &Value, entity_id: i64, url: &str) -> Result<Table, FetchError> {
    let obj = body.as_object().ok_or_else(|| FetchError::Shape {
        url: s!(url),
        detail: s!("expected a JSON object"),
    })?;

    let seasons = match obj.get(HISTORY_KEY).and_then(Value::as_array) {
        Some(items) if !items.is_empty() => items,
        _ => return Ok(Table::empty()),
    };

    let mut t = Table::from_records(seasons);
    t.set_column(PLAYER_ID, |_| Cell::Int(entity_id));
    Ok(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rows_are_tagged_with_entity() {
        let body = json!({
            "fixtures": [],
            "history": [],
            "history_past": [
                {"season_name": "2022/23", "total_points": 150},
                {"season_name": "2023/24", "total_points": 170}
            ]
        });
        let t = parse(&body, 42, "u").unwrap();
        assert_eq!(t.columns, vec!["season_name", "total_points", PLAYER_ID]);
        assert!(t.column(PLAYER_ID).all(|c| *c == Cell::Int(42)));
    }

    #[test]
    fn absent_or_empty_section_is_zero_rows() {
        assert!(parse(&json!({"history": []}), 1, "u").unwrap().is_empty());
        assert!(parse(&json!({"history_past": []}), 1, "u").unwrap().is_empty());
        assert!(parse(&json!({"history_past": null}), 1, "u").unwrap().is_empty());
    }

    #[test]
    fn non_object_is_malformed() {
        assert!(parse(&json!("oops"), 1, "u").is_err());
    }
}
