// src/core/sanitize.rs
use std::sync::LazyLock;

use regex::Regex;

static LEADING_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)").expect("static regex"));

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// "1Arsenal" → (Some(1), "Arsenal"). Without a leading digit run the
/// position is `None` and the text comes back unchanged.
pub fn split_position(s: &str) -> (Option<i64>, &str) {
    match LEADING_DIGITS.captures(s) {
        Some(caps) => {
            let whole = caps.get(0).map_or(0, |m| m.end());
            let pos = caps.get(1).and_then(|m| m.as_str().parse().ok());
            (pos, &s[whole..])
        }
        None => (None, s),
    }
}

/// Lenient integer parse for scraped numeric cells: trims, accepts a
/// leading `+`, and the typographic minus some pages use for negatives.
/// Anything else is `None`.
pub fn parse_int(s: &str) -> Option<i64> {
    let t = s.trim().replace('\u{2212}', "-");
    let t = t.strip_prefix('+').unwrap_or(&t);
    if let Ok(n) = t.parse::<i64>() {
        return Some(n);
    }
    // "3.0" from re-exported sheets
    t.parse::<f64>().ok().filter(|f| f.is_finite() && f.fract() == 0.0).map(|f| f as i64)
}

/// Lenient float parse for numeric cells that aren't whole numbers
/// ("1.5"). Same sign handling as `parse_int`; non-finite values are `None`.
pub fn parse_float(s: &str) -> Option<f64> {
    let t = s.trim().replace('\u{2212}', "-");
    let t = t.strip_prefix('+').unwrap_or(&t);
    t.parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Keep only result letters W/L/D and return the most recent `keep`.
pub fn form_letters(raw: &str, keep: usize) -> String {
    let letters: Vec<char> = raw.chars().filter(|c| matches!(c, 'W' | 'L' | 'D')).collect();
    let start = letters.len().saturating_sub(keep);
    letters[start..].iter().collect()
}

/// Filesystem-safe stem for a sheet name.
pub fn sanitize_sheet_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_us = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() { out.push(ch); last_us = false; }
        else if ch.is_whitespace() { if !last_us { out.push('_'); last_us = true; } }
        else if ch=='-' || ch=='_' { if !(last_us && ch=='_') { out.push(ch); } last_us = ch=='_'; }
    }
    let out = out.trim_matches('_').to_string();
    if out.is_empty() { s!("sheet") } else { out }
}
