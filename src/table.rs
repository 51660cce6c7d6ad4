// src/table.rs
//! Canonical in-memory table shared by every stage.
//!
//! A `Table` is a header plus value rows. Rows always have exactly
//! `columns.len()` cells; absent data is [`Cell::Missing`], never a short row.
//! Tables are built fresh every run and handed to the sink as a string grid.

use std::collections::HashMap;
use std::fmt;

use serde_json::{Map, Value};

/// One typed value. `Missing` is the explicit "no value" marker used
/// wherever coercion or lookup fails.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Cell {
    #[default]
    Missing,
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
}

impl Cell {
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Cell::Int(n) => Some(*n),
            Cell::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            Cell::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// JSON → cell. Nested arrays/objects are kept as compact JSON text.
    pub fn from_json(v: &Value) -> Self {
        match v {
            Value::Null => Cell::Missing,
            Value::Bool(b) => Cell::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Cell::Int(i),
                None => n.as_f64().map(Cell::Float).unwrap_or(Cell::Missing),
            },
            Value::String(s) => Cell::Text(s.clone()),
            other => Cell::Text(other.to_string()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Missing => Ok(()),
            Cell::Int(n) => write!(f, "{n}"),
            Cell::Float(x) => write!(f, "{x}"),
            Cell::Text(s) => f.write_str(s),
            Cell::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self { Cell::Text(s!(s)) }
}
impl From<String> for Cell {
    fn from(s: String) -> Self { Cell::Text(s) }
}
impl From<i64> for Cell {
    fn from(n: i64) -> Self { Cell::Int(n) }
}
impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(v: Option<T>) -> Self { v.map(Into::into).unwrap_or(Cell::Missing) }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self { columns: columns.into_iter().map(Into::into).collect(), rows: Vec::new() }
    }

    /// The explicit "nothing here" result.
    pub fn empty() -> Self { Self::default() }

    pub fn is_empty(&self) -> bool { self.rows.is_empty() }
    pub fn len(&self) -> usize { self.rows.len() }

    pub fn col(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell by row index and column name.
    pub fn get(&self, row: usize, name: &str) -> Option<&Cell> {
        let c = self.col(name)?;
        self.rows.get(row).and_then(|r| r.get(c))
    }

    /// Iterate one column; yields nothing if the column is absent.
    pub fn column<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Cell> + use<'a> {
        let ix = self.col(name);
        self.rows.iter().filter_map(move |r| ix.and_then(|c| r.get(c)))
    }

    /// Append a row, padding or truncating to the column count.
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.columns.len(), Cell::Missing);
        self.rows.push(row);
    }

    /// Build from JSON objects. The column set is the union of keys in
    /// first-seen order; keys a record lacks become `Missing`. Non-object
    /// items are ignored.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a Value>) -> Self {
        let objects: Vec<&Map<String, Value>> =
            records.into_iter().filter_map(Value::as_object).collect();

        let mut columns: Vec<String> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for obj in &objects {
            for key in obj.keys() {
                if !index.contains_key(key.as_str()) {
                    index.insert(key.as_str(), columns.len());
                    columns.push(key.clone());
                }
            }
        }

        let rows = objects
            .iter()
            .map(|obj| {
                let mut row = vec![Cell::Missing; columns.len()];
                for (k, v) in obj.iter() {
                    row[index[k.as_str()]] = Cell::from_json(v);
                }
                row
            })
            .collect();

        Self { columns, rows }
    }

    /// Fixed column selection, in the given order. Columns the table lacks
    /// come back filled with `Missing`.
    pub fn project(&self, names: &[&str]) -> Self {
        let ix: Vec<Option<usize>> = names.iter().map(|n| self.col(n)).collect();
        let rows = self
            .rows
            .iter()
            .map(|r| ix.iter().map(|i| i.and_then(|c| r.get(c).cloned()).unwrap_or_default()).collect())
            .collect();
        Self { columns: names.iter().map(|n| s!(*n)).collect(), rows }
    }

    /// Like `project` but silently drops names the table doesn't have.
    pub fn select_present(&self, names: &[&str]) -> Self {
        let present: Vec<&str> = names.iter().copied().filter(|n| self.col(n).is_some()).collect();
        self.project(&present)
    }

    /// Add (or overwrite) a column computed from each row.
    pub fn set_column<F>(&mut self, name: &str, mut f: F)
    where
        F: FnMut(&[Cell]) -> Cell,
    {
        match self.col(name) {
            Some(c) => {
                for row in &mut self.rows {
                    let v = f(row);
                    row[c] = v;
                }
            }
            None => {
                self.columns.push(s!(name));
                for row in &mut self.rows {
                    let v = f(row);
                    row.push(v);
                }
            }
        }
    }

    /// Rewrite every cell of one column in place. No-op if the column is absent.
    pub fn map_column<F>(&mut self, name: &str, mut f: F)
    where
        F: FnMut(&Cell) -> Cell,
    {
        if let Some(c) = self.col(name) {
            for row in &mut self.rows {
                let v = f(&row[c]);
                row[c] = v;
            }
        }
    }

    /// Concatenate `other` below `self`, unioning columns. Cells for columns
    /// one side lacks become `Missing`.
    pub fn append(&mut self, other: Table) {
        if self.columns.is_empty() && self.rows.is_empty() {
            *self = other;
            return;
        }
        for c in &other.columns {
            if self.col(c).is_none() {
                self.columns.push(c.clone());
                for row in &mut self.rows {
                    row.push(Cell::Missing);
                }
            }
        }
        let map: Vec<usize> = other
            .columns
            .iter()
            .map(|c| self.col(c).unwrap_or_default())
            .collect();
        for row in other.rows {
            let mut out = vec![Cell::Missing; self.columns.len()];
            for (src, cell) in row.into_iter().enumerate() {
                if let Some(&dst) = map.get(src) {
                    out[dst] = cell;
                }
            }
            self.rows.push(out);
        }
    }

    /// Header row followed by rendered rows, ready for a sink.
    pub fn to_grid(&self) -> Vec<Vec<String>> {
        let mut grid = Vec::with_capacity(self.rows.len() + 1);
        grid.push(self.columns.clone());
        for r in &self.rows {
            grid.push(r.iter().map(Cell::to_string).collect());
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_records_unions_keys_in_first_seen_order() {
        let recs = [json!({"a": 1, "b": "x"}), json!({"b": "y", "c": null}), json!(7)];
        let t = Table::from_records(recs.iter());
        assert_eq!(t.columns, vec!["a", "b", "c"]);
        assert_eq!(t.len(), 2);
        assert_eq!(t.rows[1], vec![Cell::Missing, Cell::from("y"), Cell::Missing]);
    }

    #[test]
    fn nested_values_become_json_text() {
        let recs = [json!({"stats": [{"k": 1}], "f": 2.5})];
        let t = Table::from_records(recs.iter());
        assert_eq!(t.get(0, "stats"), Some(&Cell::from(r#"[{"k":1}]"#)));
        assert_eq!(t.get(0, "f"), Some(&Cell::Float(2.5)));
    }

    #[test]
    fn project_fills_absent_columns() {
        let recs = [json!({"id": 1, "name": "A"})];
        let t = Table::from_records(recs.iter()).project(&["name", "id", "nope"]);
        assert_eq!(t.columns, vec!["name", "id", "nope"]);
        assert_eq!(t.rows[0], vec![Cell::from("A"), Cell::Int(1), Cell::Missing]);

        let t = Table::from_records(recs.iter()).select_present(&["nope", "id"]);
        assert_eq!(t.columns, vec!["id"]);
    }

    #[test]
    fn append_unions_columns() {
        let mut a = Table::from_records([json!({"x": 1})].iter());
        let b = Table::from_records([json!({"y": 2, "x": 3})].iter());
        a.append(b);
        assert_eq!(a.columns, vec!["x", "y"]);
        assert_eq!(a.rows, vec![vec![Cell::Int(1), Cell::Missing], vec![Cell::Int(3), Cell::Int(2)]]);

        let mut e = Table::empty();
        e.append(Table::from_records([json!({"z": 0})].iter()));
        assert_eq!(e.columns, vec!["z"]);
    }

    #[test]
    fn grid_renders_missing_as_blank() {
        let mut t = Table::new(["a", "b"]);
        t.push_row(vec![Cell::Int(1)]);
        assert_eq!(t.to_grid(), vec![vec!["a", "b"], vec!["1", ""]]);
    }
}
