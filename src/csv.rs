// src/csv.rs
use std::io::{self, Write};
use std::mem::take;

pub const SEP: char = ',';

/* ---------------- Parsing ---------------- */

/// Minimal CSV parser (quotes + CRLF tolerant).
///
/// A line holding a single bare empty field is treated as blank and skipped;
/// `write_row` quotes that case so it survives a round trip.
pub fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut field = s!();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut quoted = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                quoted = true;
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next(); // double-quote escape
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            c if c == sep && !in_quotes => {
                // move the field without cloning
                row.push(take(&mut field));
            }
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) { chars.next(); }
                row.push(take(&mut field));
                if quoted || !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(take(&mut row));
                } else {
                    row.clear();
                }
                quoted = false;
            }
            _ => field.push(ch),
        }
    }

    // Flush a trailing row without a final newline, even if quotes were unterminated.
    if quoted || !row.is_empty() || !field.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV row to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    if let [only] = row {
        if only.is_empty() {
            return writeln!(w, "\"\"");
        }
    }
    let mut first = true;
    for cell in row {
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(rows: &[Vec<String>]) -> String {
        let mut buf = Vec::new();
        for r in rows {
            write_row(&mut buf, r, SEP).unwrap();
        }
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn quotes_and_escapes() {
        let rows = vec![vec![s!("a,b"), s!("say \"hi\""), s!("x")]];
        let text = render(&rows);
        assert_eq!(text, "\"a,b\",\"say \"\"hi\"\"\",x\n");
        assert_eq!(parse_rows(&text, SEP), rows);
    }

    #[test]
    fn blank_cells_survive() {
        let rows = vec![vec![s!("h")], vec![s!()], vec![s!(""), s!("")]];
        assert_eq!(parse_rows(&render(&rows), SEP), rows);
    }

    #[test]
    fn crlf_and_missing_final_newline() {
        assert_eq!(parse_rows("a,b\r\n1,2", SEP), vec![vec!["a", "b"], vec!["1", "2"]]);
        assert!(parse_rows("", SEP).is_empty());
        assert!(parse_rows("\n\n", SEP).is_empty());
    }
}
