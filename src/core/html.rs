// src/core/html.rs
//! Table grid extraction.
//!
//! Turns the first `<table>` of a document into a rectangular grid of cell
//! text, with `colspan`/`rowspan` expanded so every row lines up with the
//! columns. Header rows (`<thead>`, or leading rows made only of `<th>`) are
//! kept apart from body rows so callers can flatten multi-level headers.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::sanitize::normalize_ws;

static TABLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("table").expect("static selector"));

// Guard against absurd span attributes on hostile pages.
const MAX_SPAN: usize = 64;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableGrid {
    pub header_rows: Vec<Vec<String>>,
    pub body_rows: Vec<Vec<String>>,
}

impl TableGrid {
    /// Widest row across header and body.
    pub fn width(&self) -> usize {
        self.header_rows.iter().chain(&self.body_rows).map(Vec::len).max().unwrap_or(0)
    }
}

struct RawCell {
    text: String,
    is_th: bool,
    colspan: usize,
    rowspan: usize,
}

/// Grid of the first table in `doc`, or `None` if the page has no table.
pub fn first_table(doc: &str) -> Option<TableGrid> {
    let html = Html::parse_document(doc);
    let table = html.select(&TABLE).next()?;

    let mut head: Vec<Vec<RawCell>> = Vec::new();
    let mut body: Vec<Vec<RawCell>> = Vec::new();

    for section in child_elements(table) {
        match section.value().name() {
            "thead" => head.extend(child_rows(section)),
            "tbody" | "tfoot" => body.extend(child_rows(section)),
            "tr" => body.push(row_cells(section)),
            _ => {}
        }
    }

    // No <thead>: leading all-<th> rows are the header.
    if head.is_empty() {
        let n = body
            .iter()
            .take_while(|r| !r.is_empty() && r.iter().all(|c| c.is_th))
            .count();
        head = body.drain(..n).collect();
    }

    Some(TableGrid { header_rows: expand_spans(&head), body_rows: expand_spans(&body) })
}

/// Collapse a multi-row header into one label per column: non-empty levels
/// joined with a space, with a level repeated by `rowspan` counted once.
pub fn flatten_headers(header_rows: &[Vec<String>], width: usize) -> Vec<String> {
    (0..width)
        .map(|c| {
            let mut levels: Vec<&str> = Vec::new();
            for row in header_rows {
                let Some(text) = row.get(c).map(|s| s.trim()) else { continue };
                if text.is_empty() || levels.last() == Some(&text) {
                    continue;
                }
                levels.push(text);
            }
            levels.join(" ").trim().to_string()
        })
        .collect()
}

fn child_elements(el: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    el.children().filter_map(ElementRef::wrap)
}

fn child_rows(section: ElementRef<'_>) -> Vec<Vec<RawCell>> {
    child_elements(section)
        .filter(|e| e.value().name() == "tr")
        .map(row_cells)
        .collect()
}

fn row_cells(tr: ElementRef<'_>) -> Vec<RawCell> {
    child_elements(tr)
        .filter(|e| matches!(e.value().name(), "td" | "th"))
        .map(|e| RawCell {
            text: normalize_ws(&e.text().collect::<String>()),
            is_th: e.value().name() == "th",
            colspan: span_attr(e, "colspan"),
            rowspan: span_attr(e, "rowspan"),
        })
        .collect()
}

fn span_attr(e: ElementRef<'_>, name: &str) -> usize {
    e.value()
        .attr(name)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(1)
        .clamp(1, MAX_SPAN)
}

/// Lay cells out on a grid, repeating spanned text into every slot it covers.
fn expand_spans(rows: &[Vec<RawCell>]) -> Vec<Vec<String>> {
    // Per column: (rows still covered from above, text).
    let mut carry: Vec<(usize, String)> = Vec::new();
    let mut out = Vec::with_capacity(rows.len());

    for row in rows {
        let mut line: Vec<String> = Vec::new();
        let mut cells = row.iter();
        let mut col = 0usize;

        loop {
            if let Some((left, text)) = carry.get_mut(col) {
                if *left > 0 {
                    *left -= 1;
                    line.push(text.clone());
                    col += 1;
                    continue;
                }
            }
            let Some(cell) = cells.next() else { break };
            for _ in 0..cell.colspan {
                if carry.len() <= col {
                    carry.resize(col + 1, (0, String::new()));
                }
                carry[col] = (cell.rowspan - 1, cell.text.clone());
                line.push(cell.text.clone());
                col += 1;
            }
        }

        // Rowspans reaching past this row's last cell.
        let last_carried = carry.iter().rposition(|(left, _)| *left > 0);
        if let Some(last) = last_carried {
            while col <= last {
                let (left, text) = &mut carry[col];
                if *left > 0 {
                    *left -= 1;
                    line.push(text.clone());
                } else {
                    line.push(String::new());
                }
                col += 1;
            }
        }

        out.push(line);
    }
    out
}
