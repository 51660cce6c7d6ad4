// src/file.rs

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::Path,
};

use crate::csv::{parse_rows, write_row, SEP};

/// Create/truncate `path` and write `rows` as CSV.
pub fn write_rows(path: &Path, rows: &[Vec<String>]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    let file = File::create(path)?; // truncate/overwrite
    let mut out = BufWriter::new(file);
    for row in rows {
        write_row(&mut out, row, SEP)?;
    }
    out.flush()
}

/// Rows of a CSV file; a missing file reads as no rows.
pub fn read_rows(path: &Path) -> io::Result<Vec<Vec<String>>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(parse_rows(&text, SEP)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e),
    }
}

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        ));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("t.csv");
        let rows = vec![vec![s!("a"), s!("b")], vec![s!("1"), s!()]];
        write_rows(&path, &rows).unwrap();
        assert_eq!(read_rows(&path).unwrap(), rows);
        assert!(read_rows(&dir.path().join("nope.csv")).unwrap().is_empty());
    }

    #[test]
    fn ensure_directory_rejects_files() {
        let dir = tempfile::tempdir().unwrap();
        let f = dir.path().join("f");
        fs::write(&f, "x").unwrap();
        assert!(ensure_directory(&f).is_err());
        assert!(ensure_directory(&dir.path().join("d")).is_ok());
    }
}
