// src/sink/mod.rs
//! Tabular sinks: named sheets inside one workbook that can be found or
//! created, cleared, written from the top-left cell and given a bold header.
//!
//! [`Sheet`] holds the cell semantics shared by every backend; backends
//! only decide where a sheet lives.

mod memory;
mod workbook;
pub mod sync;

pub use memory::MemorySink;
pub use workbook::WorkbookSink;

use crate::config::consts::{DEFAULT_SHEET_COLS, DEFAULT_SHEET_ROWS};
use crate::error::SinkError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SheetCapacity {
    pub rows: usize,
    pub cols: usize,
}

impl Default for SheetCapacity {
    fn default() -> Self {
        Self { rows: DEFAULT_SHEET_ROWS, cols: DEFAULT_SHEET_COLS }
    }
}

/// Handle to a sheet returned by [`TabularSink::find_or_create_table`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetRef {
    pub name: String,
}

pub trait TabularSink {
    /// Select the workbook addressed by `key`. Must precede everything else.
    fn open(&mut self, key: &str) -> Result<(), SinkError>;

    /// Existing sheet by name, or a new one with `capacity`.
    fn find_or_create_table(&mut self, name: &str, capacity: SheetCapacity) -> Result<SheetRef, SinkError>;

    /// Remove every value. Capacity and formatting stay.
    fn clear(&mut self, sheet: &SheetRef) -> Result<(), SinkError>;

    /// Write `grid` (header row first) starting at the top-left cell.
    fn write(&mut self, sheet: &SheetRef, grid: &[Vec<String>]) -> Result<(), SinkError>;

    fn format_header(&mut self, sheet: &SheetRef, bold: bool) -> Result<(), SinkError>;
}

/// One sheet's full state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sheet {
    pub capacity: SheetCapacity,
    pub cells: Vec<Vec<String>>,
    pub header_bold: bool,
}

impl Sheet {
    pub fn new(capacity: SheetCapacity) -> Self {
        Self { capacity, ..Self::default() }
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Overlay `grid` onto the sheet from A1. Cells outside the grid keep
    /// their value; the sheet grows to fit.
    pub fn write(&mut self, grid: &[Vec<String>]) {
        for (r, src) in grid.iter().enumerate() {
            if self.cells.len() <= r {
                self.cells.resize_with(r + 1, Vec::new);
            }
            let dst = &mut self.cells[r];
            if dst.len() < src.len() {
                dst.resize(src.len(), s!());
            }
            dst[..src.len()].clone_from_slice(src);
        }

        let width = grid.iter().map(Vec::len).max().unwrap_or(0);
        self.capacity.rows = self.capacity.rows.max(grid.len());
        self.capacity.cols = self.capacity.cols.max(width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter().map(|r| r.iter().map(|c| s!(*c)).collect()).collect()
    }

    #[test]
    fn write_overlays_from_top_left() {
        let mut s = Sheet::new(SheetCapacity::default());
        s.write(&grid(&[&["a", "b", "c"], &["1", "2", "3"], &["4", "5", "6"]]));
        s.write(&grid(&[&["x"], &["9", "9"]]));
        assert_eq!(s.cells, grid(&[&["x", "b", "c"], &["9", "9", "3"], &["4", "5", "6"]]));
    }

    #[test]
    fn write_grows_capacity() {
        let mut s = Sheet::new(SheetCapacity { rows: 2, cols: 2 });
        s.write(&grid(&[&["a", "b", "c"], &["1", "2", "3"], &["4", "5", "6"]]));
        assert_eq!(s.capacity, SheetCapacity { rows: 3, cols: 3 });
        s.clear();
        assert!(s.cells.is_empty());
        assert_eq!(s.capacity, SheetCapacity { rows: 3, cols: 3 });
    }
}
