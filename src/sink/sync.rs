// src/sink/sync.rs
//! Publish canonical tables to a sink, one sheet per table.
//!
//! Each table is independent: an empty table is skipped (clearing a sheet
//! just to write nothing would wipe its last good render), and a failure on
//! one sheet is logged and does not stop the next.

use super::{SheetCapacity, TabularSink};
use crate::error::SinkError;
use crate::progress::Progress;
use crate::table::Table;

#[derive(Debug, Default)]
pub struct PublishReport {
    pub published: Vec<String>,
    pub skipped_empty: Vec<String>,
    /// Everything, when the sink could not be authenticated or opened.
    pub skipped_no_auth: Vec<String>,
    pub failed: Vec<(String, SinkError)>,
}

impl PublishReport {
    pub fn is_clean(&self) -> bool {
        self.skipped_no_auth.is_empty() && self.failed.is_empty()
    }
}

/// Find-or-create, clear, write, bold header. Running it twice with the
/// same table leaves the sheet in the same state.
pub fn publish_table(sink: &mut dyn TabularSink, name: &str, table: &Table) -> Result<(), SinkError> {
    let sheet = sink.find_or_create_table(name, SheetCapacity::default())?;
    sink.clear(&sheet)?;
    sink.write(&sheet, &table.to_grid())?;
    sink.format_header(&sheet, true)?;
    Ok(())
}

/// Publish `tables` in order into workbook `key`.
///
/// `sink` is `None` when authentication already failed; every table is
/// then reported as skipped. The same happens if the workbook can't be opened.
pub fn publish_all(
    sink: Option<&mut dyn TabularSink>,
    key: &str,
    tables: &[(&str, &Table)],
    progress: &mut dyn Progress,
) -> PublishReport {
    let mut report = PublishReport::default();
    let names = || tables.iter().map(|(n, _)| s!(*n)).collect::<Vec<_>>();

    let Some(sink) = sink else {
        tracing::error!("sink not authenticated, skipping all publishing");
        report.skipped_no_auth = names();
        return report;
    };
    if let Err(e) = sink.open(key) {
        tracing::error!(key, cause = %e, "cannot open workbook, skipping all publishing");
        report.skipped_no_auth = names();
        return report;
    }

    progress.log("Publishing tables…");
    for (name, table) in tables {
        if table.is_empty() {
            tracing::info!(table = name, "empty, not published");
            report.skipped_empty.push(s!(*name));
            continue;
        }
        match publish_table(sink, name, table) {
            Ok(()) => {
                tracing::info!(table = name, rows = table.len(), "published");
                report.published.push(s!(*name));
            }
            Err(e) => {
                tracing::error!(table = name, cause = %e, "publish failed");
                report.failed.push((s!(*name), e));
            }
        }
    }
    report
}
