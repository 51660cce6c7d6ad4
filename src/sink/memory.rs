// src/sink/memory.rs
use std::collections::BTreeMap;

use super::{Sheet, SheetCapacity, SheetRef, TabularSink};
use crate::error::SinkError;

/// In-process workbooks, keyed by workbook key then sheet name. Used for
/// dry runs and tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    workbooks: BTreeMap<String, BTreeMap<String, Sheet>>,
    current: Option<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheet(&self, key: &str, name: &str) -> Option<&Sheet> {
        self.workbooks.get(key)?.get(name)
    }

    fn book(&mut self) -> Result<&mut BTreeMap<String, Sheet>, SinkError> {
        let key = self.current.as_ref().ok_or(SinkError::NotOpen)?;
        Ok(self.workbooks.entry(key.clone()).or_default())
    }

    fn sheet_mut(&mut self, sheet: &SheetRef) -> Result<&mut Sheet, SinkError> {
        self.book()?
            .get_mut(&sheet.name)
            .ok_or_else(|| SinkError::NoSuchTable(sheet.name.clone()))
    }
}

impl TabularSink for MemorySink {
    fn open(&mut self, key: &str) -> Result<(), SinkError> {
        self.workbooks.entry(s!(key)).or_default();
        self.current = Some(s!(key));
        Ok(())
    }

    fn find_or_create_table(&mut self, name: &str, capacity: SheetCapacity) -> Result<SheetRef, SinkError> {
        self.book()?.entry(s!(name)).or_insert_with(|| Sheet::new(capacity));
        Ok(SheetRef { name: s!(name) })
    }

    fn clear(&mut self, sheet: &SheetRef) -> Result<(), SinkError> {
        self.sheet_mut(sheet)?.clear();
        Ok(())
    }

    fn write(&mut self, sheet: &SheetRef, grid: &[Vec<String>]) -> Result<(), SinkError> {
        self.sheet_mut(sheet)?.write(grid);
        Ok(())
    }

    fn format_header(&mut self, sheet: &SheetRef, bold: bool) -> Result<(), SinkError> {
        self.sheet_mut(sheet)?.header_bold = bold;
        Ok(())
    }
}
