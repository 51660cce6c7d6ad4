// src/specs/standings.rs
//! Parser and normaliser for the league standings page.
//!
//! Purpose:
//! - Take the **first table** on the page and produce the canonical standings
//!   shape: `Position, Team, Played, Won, Drawn, Lost, GF, GA, GD, Points[, Form]`.
//! - Cope with what the page actually serves: merged two-row headers, the
//!   position fused into the team cell (`"1Arsenal"`), long header labels,
//!   stray empty rows/columns and non-numeric filler in numeric cells.
//!
//! Every step tolerates its input being absent. A missing column is left out
//! of the result; a value that won't coerce becomes `Cell::Missing`. Numeric
//! columns hold `Int` for whole numbers and `Float` otherwise. The only
//! hard failures are "no table" and "can't tell which column is which".

use crate::core::html::{self, TableGrid};
use crate::core::sanitize::{form_letters, normalize_ws, parse_float, parse_int, split_position};
use crate::error::StandingsError;
use crate::table::{Cell, Table};

pub const POSITION: &str = "Position";
pub const TEAM: &str = "Team";
pub const PLAYED: &str = "Played";
pub const WON: &str = "Won";
pub const DRAWN: &str = "Drawn";
pub const LOST: &str = "Lost";
pub const GF: &str = "GF";
pub const GA: &str = "GA";
pub const GD: &str = "GD";
pub const POINTS: &str = "Points";
pub const FORM: &str = "Form";

/// Output order. `Form` is appended only when the source has it.
pub const CANONICAL: [&str; 11] = [POSITION, TEAM, PLAYED, WON, DRAWN, LOST, GF, GA, GD, POINTS, FORM];
const NUMERIC: [&str; 9] = [POSITION, PLAYED, WON, DRAWN, LOST, GF, GA, GD, POINTS];

/// Most recent results kept in `Form`.
pub const FORM_LEN: usize = 5;

/// Upstream header variants → canonical names (compared case-insensitively).
const HEADER_ALIASES: &[(&str, &str)] = &[
    ("Goals For", GF),
    ("Goals Against", GA),
    ("Goal Difference", GD),
    ("Form, Last 6 games, Oldest first", FORM),
    ("Pos", POSITION),
    ("#", POSITION),
    ("Club", TEAM),
    ("P", PLAYED),
    ("Pl", PLAYED),
    ("W", WON),
    ("D", DRAWN),
    ("L", LOST),
    ("F", GF),
    ("A", GA),
    ("+/-", GD),
    ("Pts", POINTS),
];

/// Positional layouts tried when no header names a team column.
const LAYOUT_9: &[&str] = &[TEAM, PLAYED, WON, DRAWN, LOST, GF, GA, GD, POINTS];
const LAYOUT_10: &[&str] = &[TEAM, PLAYED, WON, DRAWN, LOST, GF, GA, GD, POINTS, FORM];
const LAYOUT_11: &[&str] = &[POSITION, TEAM, PLAYED, WON, DRAWN, LOST, GF, GA, GD, POINTS, FORM];

/// One normalised standings line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StandingsRow {
    pub position: Option<i64>,
    pub team: Option<String>,
    pub played: Option<i64>,
    pub won: Option<i64>,
    pub drawn: Option<i64>,
    pub lost: Option<i64>,
    pub goals_for: Option<i64>,
    pub goals_against: Option<i64>,
    pub goal_difference: Option<i64>,
    pub points: Option<i64>,
    pub form: Option<String>,
}

impl StandingsRow {
    /// Typed view over a normalised standings table.
    pub fn from_table(t: &Table) -> Vec<Self> {
        let int = |i: usize, name: &str| t.get(i, name).and_then(Cell::as_i64);
        let text = |i: usize, name: &str| t.get(i, name).and_then(Cell::as_str).map(str::to_string);
        (0..t.len())
            .map(|i| StandingsRow {
                position: int(i, POSITION),
                team: text(i, TEAM),
                played: int(i, PLAYED),
                won: int(i, WON),
                drawn: int(i, DRAWN),
                lost: int(i, LOST),
                goals_for: int(i, GF),
                goals_against: int(i, GA),
                goal_difference: int(i, GD),
                points: int(i, POINTS),
                form: text(i, FORM),
            })
            .collect()
    }
}

/// Parse and normalise the standings page.
pub fn parse(doc: &str) -> Result<Table, StandingsError> {
    let grid = html::first_table(doc).ok_or(StandingsError::NoTable)?;
    normalize(&grid)
}

/// Normalise an extracted grid into the canonical standings table.
pub fn normalize(grid: &TableGrid) -> Result<Table, StandingsError> {
    let width = grid.width();
    let headers = html::flatten_headers(&grid.header_rows, width);

    let mut t = Table::new(headers);
    for row in &grid.body_rows {
        t.push_row(row.iter().map(|s| text_cell(s)).collect());
    }

    drop_empty(&mut t);

    for c in &mut t.columns {
        *c = canonical_header(c);
    }
    if t.col(TEAM).is_none() {
        apply_layout(&mut t)?;
    }

    split_team_position(&mut t);

    let mut t = t.select_present(&CANONICAL);

    for name in NUMERIC {
        t.map_column(name, coerce_number);
    }

    t.map_column(TEAM, |c| match c {
        Cell::Text(s) => Cell::Text(s.trim().to_string()),
        other => other.clone(),
    });

    t.map_column(FORM, |c| Cell::Text(form_letters(&c.to_string(), FORM_LEN)));

    sort_by_position(&mut t);
    Ok(t)
}

/// Whole numbers become `Int`, other finite numbers `Float`, anything
/// else `Missing`.
fn coerce_number(c: &Cell) -> Cell {
    match c {
        Cell::Int(_) | Cell::Float(_) => c.clone(),
        other => {
            let s = other.to_string();
            match parse_int(&s) {
                Some(n) => Cell::Int(n),
                None => parse_float(&s).map_or(Cell::Missing, Cell::Float),
            }
        }
    }
}

fn text_cell(s: &str) -> Cell {
    let s = normalize_ws(s);
    if s.is_empty() { Cell::Missing } else { Cell::Text(s) }
}

/// Drop rows, then columns, that hold no value at all.
fn drop_empty(t: &mut Table) {
    t.rows.retain(|r| r.iter().any(|c| !c.is_missing()));

    let keep: Vec<bool> = (0..t.columns.len())
        .map(|c| t.rows.iter().any(|r| !r[c].is_missing()))
        .collect();
    let mut k = keep.iter();
    t.columns.retain(|_| *k.next().unwrap_or(&false));
    for row in &mut t.rows {
        let mut k = keep.iter();
        row.retain(|_| *k.next().unwrap_or(&false));
    }
}

fn canonical_header(raw: &str) -> String {
    let h = raw.trim();
    if let Some(name) = CANONICAL.iter().find(|c| c.eq_ignore_ascii_case(h)) {
        return s!(*name);
    }
    if let Some((_, to)) = HEADER_ALIASES.iter().find(|(from, _)| from.eq_ignore_ascii_case(h)) {
        return s!(*to);
    }
    // "Form, Last 5 games ..." and friends
    let lower = h.to_ascii_lowercase();
    if let Some(rest) = lower.strip_prefix("form") {
        if rest.starts_with(|c: char| !c.is_alphanumeric()) {
            return s!(FORM);
        }
    }
    s!(h)
}

/// Name columns by position when the headers didn't identify the team column.
fn apply_layout(t: &mut Table) -> Result<(), StandingsError> {
    let layout = match t.columns.len() {
        9 => LAYOUT_9,
        10 => LAYOUT_10,
        11 => LAYOUT_11,
        n => {
            return Err(StandingsError::UnrecognisedLayout { columns: n, headers: t.columns.clone() });
        }
    };
    tracing::debug!(columns = layout.len(), "standings headers unrecognised; using positional layout");
    t.columns = layout.iter().map(|s| s!(*s)).collect();
    Ok(())
}

/// "1Arsenal" → Position 1, Team "Arsenal". A Position column the source
/// already had wins where it holds a value.
fn split_team_position(t: &mut Table) {
    let Some(team_ix) = t.col(TEAM) else { return };

    let split: Vec<(Option<i64>, Cell)> = t
        .rows
        .iter()
        .map(|r| match &r[team_ix] {
            Cell::Text(s) => {
                let (pos, rest) = split_position(s);
                (pos, Cell::Text(s!(rest)))
            }
            other => (None, other.clone()),
        })
        .collect();

    let existing = t.col(POSITION);
    for (row, (pos, team)) in t.rows.iter_mut().zip(&split) {
        row[team_ix] = team.clone();
        if let Some(p) = existing {
            if row[p].is_missing() {
                row[p] = Cell::from(*pos);
            }
        }
    }
    if existing.is_none() {
        let mut it = split.iter();
        t.set_column(POSITION, |_| it.next().map(|(p, _)| Cell::from(*p)).unwrap_or_default());
    }
}

/// Ascending by position; rows without one sink to the bottom. Stable.
fn sort_by_position(t: &mut Table) {
    let Some(p) = t.col(POSITION) else { return };
    t.rows.sort_by_key(|r| match r[p].as_i64() {
        Some(n) => (0, n),
        None => (1, 0),
    });
}
