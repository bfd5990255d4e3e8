//! Rendering of command output.
//!
//! Everything here returns a `String` so the binary only has to print it.

use std::fmt::Write as _;

use crate::card::CardRow;
use crate::error::Result;
use crate::extract::Extraction;
use crate::filter::{CompanyFilter, ALL_LABEL};

use super::OutputFormat;

/// Shown by `list` when the database holds no cards at all.
pub const EMPTY_LISTING: &str = "No cards registered yet.";

const HEADERS: [&str; 3] = ["Company", "Name", "Role"];

/// Render card rows in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_rows(rows: &[CardRow], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
        OutputFormat::Plain => Ok(rows
            .iter()
            .map(|r| format!("{}\t{}\t{}\n", r.company, r.person_name, r.role))
            .collect()),
        OutputFormat::Table => Ok(render_table(rows)),
    }
}

/// Render the `list` output: the filtered rows, or [`EMPTY_LISTING`] when the
/// database holds no cards and the format is not JSON.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_listing(
    rows: &[CardRow],
    filter: &CompanyFilter,
    format: OutputFormat,
) -> Result<String> {
    if rows.is_empty() && format != OutputFormat::Json {
        return Ok(format!("{EMPTY_LISTING}\n"));
    }
    render_rows(&filter.apply(rows), format)
}

fn render_table(rows: &[CardRow]) -> String {
    let cells: Vec<[&str; 3]> = rows
        .iter()
        .map(|r| [r.company.as_str(), r.person_name.as_str(), r.role.as_str()])
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let rule: Vec<&str> = rule.iter().map(String::as_str).collect();
    push_line(&mut out, &rule, &widths);
    for row in &cells {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[&str], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}

/// Render the result of a scan.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_extraction(
    extraction: &Extraction,
    raw: bool,
    format: OutputFormat,
) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(extraction)?);
    }

    let fields = &extraction.fields;
    let mut out = String::new();
    let _ = writeln!(out, "Company: {}", fields.company);
    let _ = writeln!(out, "Name:    {}", fields.person_name);
    let _ = writeln!(out, "Role:    {}", fields.role);
    if raw {
        let _ = writeln!(out);
        let _ = writeln!(out, "--- OCR text ---");
        let _ = writeln!(out, "{}", extraction.raw_text.trim_end());
    }
    Ok(out)
}

/// Render the company filter choices, `all` first.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_choices(choices: &[String], json: bool) -> Result<String> {
    let all = std::iter::once(ALL_LABEL.to_string()).chain(choices.iter().cloned());
    if json {
        let list: Vec<String> = all.collect();
        Ok(serde_json::to_string_pretty(&list)?)
    } else {
        Ok(all.map(|c| c + "\n").collect())
    }
}
