// src/specs/fixtures.rs
//! Parser for the fixtures endpoint: a flat JSON array, one object per match.
//! Passed through column-for-column; unplayed fixtures simply carry
//! `Missing` scores.

use serde_json::Value;

use crate::error::FetchError;
use crate::table::Table;

pub fn parse(body: &Value, url: &str) -> Result<Table, FetchError> {
    let items = body.as_array().ok_or_else(|| FetchError::Shape {
        url: s!(url),
        detail: s!("expected a JSON array of fixtures"),
    })?;
    Ok(Table::from_records(items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Cell;
    use serde_json::json;

    #[test]
    fn unplayed_scores_are_missing() {
        let body = json!([
            {"id": 1, "event": 1, "team_h": 1, "team_a": 2, "team_h_score": 2, "team_a_score": 1},
            {"id": 2, "event": 2, "team_h": 2, "team_a": 1, "team_h_score": null, "team_a_score": null}
        ]);
        let t = parse(&body, "u").unwrap();
        assert_eq!(t.len(), 2);
        assert_eq!(t.get(0, "team_h_score"), Some(&Cell::Int(2)));
        assert_eq!(t.get(1, "team_h_score"), Some(&Cell::Missing));
    }

    #[test]
    fn object_body_is_rejected() {
        assert!(parse(&json!({"detail": "nope"}), "u").is_err());
    }
}
