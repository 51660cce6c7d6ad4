// src/sink/workbook.rs
//! File-backed workbook.
//!
//! ```text
//! <sink_dir>/<key>/<Sheet>.csv    values, header row first
//! <sink_dir>/<key>/<Sheet>.meta   {"capacity":{"rows":..,"cols":..},"header_bold":..}
//! ```
//! A sheet exists once its `.meta` sidecar does.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{Sheet, SheetCapacity, SheetRef, TabularSink};
use crate::config::SheetOptions;
use crate::core::sanitize::sanitize_sheet_filename;
use crate::error::SinkError;
use crate::file::{ensure_directory, read_rows, write_rows};

/// The one credential field we rely on; the rest of the key file is ignored.
#[derive(Debug, Deserialize)]
struct ServiceAccount {
    client_email: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SheetMeta {
    capacity: SheetCapacity,
    #[serde(default)]
    header_bold: bool,
}

#[derive(Debug)]
pub struct WorkbookSink {
    root: PathBuf,
    account: String,
    workbook: Option<PathBuf>,
}

impl WorkbookSink {
    /// Validate the credential file and bind to `sink_dir`. Nothing is
    /// created on disk until [`TabularSink::open`].
    pub fn authenticate(opts: &SheetOptions) -> Result<Self, SinkError> {
        let path = opts.credential_file.display().to_string();
        let text = fs::read_to_string(&opts.credential_file)
            .map_err(|source| SinkError::CredentialIo { path: path.clone(), source })?;
        let account: ServiceAccount = serde_json::from_str(&text)
            .map_err(|e| SinkError::CredentialInvalid { path: path.clone(), detail: e.to_string() })?;
        if account.client_email.trim().is_empty() {
            return Err(SinkError::CredentialInvalid { path, detail: s!("client_email is empty") });
        }

        tracing::info!(account = %account.client_email, "sink authenticated");
        Ok(Self { root: opts.sink_dir.clone(), account: account.client_email, workbook: None })
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    /// Directory of the opened workbook.
    pub fn workbook_dir(&self) -> Option<&Path> {
        self.workbook.as_deref()
    }

    fn paths(&self, name: &str) -> Result<(PathBuf, PathBuf), SinkError> {
        let dir = self.workbook.as_ref().ok_or(SinkError::NotOpen)?;
        let stem = sanitize_sheet_filename(name);
        Ok((dir.join(format!("{stem}.csv")), dir.join(format!("{stem}.meta"))))
    }

    fn load(&self, sheet: &SheetRef) -> Result<Sheet, SinkError> {
        let (csv, meta) = self.paths(&sheet.name)?;
        let meta: SheetMeta = match fs::read_to_string(&meta) {
            Ok(text) => serde_json::from_str(&text).map_err(|e| {
                SinkError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SinkError::NoSuchTable(sheet.name.clone()));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Sheet { capacity: meta.capacity, cells: read_rows(&csv)?, header_bold: meta.header_bold })
    }

    fn save(&self, name: &str, sheet: &Sheet) -> Result<(), SinkError> {
        let (csv, meta) = self.paths(name)?;
        write_rows(&csv, &sheet.cells)?;
        let meta_json = serde_json::to_string_pretty(&SheetMeta {
            capacity: sheet.capacity,
            header_bold: sheet.header_bold,
        })
        .map_err(|e| SinkError::Io(std::io::Error::other(e)))?;
        fs::write(meta, meta_json)?;
        Ok(())
    }

    fn update<F: FnOnce(&mut Sheet)>(&mut self, sheet: &SheetRef, f: F) -> Result<(), SinkError> {
        let mut s = self.load(sheet)?;
        f(&mut s);
        self.save(&sheet.name, &s)
    }
}

impl TabularSink for WorkbookSink {
    fn open(&mut self, key: &str) -> Result<(), SinkError> {
        let dir = self.root.join(sanitize_sheet_filename(key));
        ensure_directory(&dir)?;
        tracing::debug!(dir = %dir.display(), "workbook opened");
        self.workbook = Some(dir);
        Ok(())
    }

    fn find_or_create_table(&mut self, name: &str, capacity: SheetCapacity) -> Result<SheetRef, SinkError> {
        let sheet = SheetRef { name: s!(name) };
        let (_, meta) = self.paths(name)?;
        if !meta.exists() {
            self.save(name, &Sheet::new(capacity))?;
            tracing::info!(table = name, rows = capacity.rows, cols = capacity.cols, "created sheet");
        }
        Ok(sheet)
    }

    fn clear(&mut self, sheet: &SheetRef) -> Result<(), SinkError> {
        self.update(sheet, Sheet::clear)
    }

    fn write(&mut self, sheet: &SheetRef, grid: &[Vec<String>]) -> Result<(), SinkError> {
        self.update(sheet, |s| s.write(grid))
    }

    fn format_header(&mut self, sheet: &SheetRef, bold: bool) -> Result<(), SinkError> {
        self.update(sheet, |s| s.header_bold = bold)
    }
}
