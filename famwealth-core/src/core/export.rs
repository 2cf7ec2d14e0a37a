//! Tabular (CSV) export of the store, one file per category.

use crate::{Category, FieldKind, Record, Result, WealthError, WealthStore};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// The rows of one category, ready to be written out.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportTable {
    pub category: Category,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// What [`write_csv`] produced.
///
/// ```
/// use famwealth_core::ExportSummary;
///
/// let summary = ExportSummary { files: vec![], record_count: 0 };
/// assert!(summary.files.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    /// Written files, in category order.
    pub files: Vec<PathBuf>,
    /// Number of data rows across all files.
    pub record_count: usize,
}

fn holder_names(store: &WealthStore, record: &Record) -> String {
    record
        .holders
        .iter()
        .flatten()
        .map(|id| store.member_by_id(id).and_then(Record::name).unwrap_or("?"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn export_row(store: &WealthStore, category: Category, record: &Record) -> Vec<String> {
    category
        .schema()
        .fields
        .iter()
        .map(|field| match field.kind {
            FieldKind::Holders => holder_names(store, record),
            _ => record.text(field.name).unwrap_or_default(),
        })
        .collect()
}

/// Builds one table per category that has at least one record.
///
/// The header is the declared column list; attributes outside it and the
/// record `id` are not exported. Holder IDs that no longer resolve, or that
/// point at a member without a name, come out as `?`.
pub fn export_tables(store: &WealthStore) -> Vec<ExportTable> {
    Category::ALL
        .into_iter()
        .filter(|&category| !store.records(category).is_empty())
        .map(|category| ExportTable {
            category,
            header: category.schema().columns(),
            rows: store
                .records(category)
                .iter()
                .map(|record| export_row(store, category, record))
                .collect(),
        })
        .collect()
}

/// Quotes a CSV cell when it contains a quote, comma or line break.
pub fn csv_escape(value: &str) -> String {
    if value.contains(['"', ',', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn csv_line(cells: &[String]) -> String {
    let mut line = cells
        .iter()
        .map(|cell| csv_escape(cell))
        .collect::<Vec<_>>()
        .join(",");
    line.push_str("\r\n");
    line
}

fn render(table: &ExportTable) -> String {
    let mut out = csv_line(&table.header);
    for row in &table.rows {
        out.push_str(&csv_line(row));
    }
    out
}

/// Writes `<category>.csv` into `dir` for every non-empty category.
///
/// Existing files of the same name are overwritten; `dir` is created if
/// missing.
///
/// # Errors
///
/// Returns [`WealthError::NothingToExport`] when the store holds no records,
/// or [`WealthError::Io`] if a file cannot be written.
pub fn write_csv(dir: &Path, store: &WealthStore) -> Result<ExportSummary> {
    if store.is_empty() {
        return Err(WealthError::NothingToExport);
    }
    fs::create_dir_all(dir)?;

    let mut summary = ExportSummary {
        files: Vec::new(),
        record_count: 0,
    };
    for table in export_tables(store) {
        let path = dir.join(format!("{}.csv", table.category.name()));
        fs::write(&path, render(&table))?;
        log::debug!("exported {} row(s) to {}", table.rows.len(), path.display());
        summary.record_count += table.rows.len();
        summary.files.push(path);
    }
    log::info!(
        "exported {} record(s) into {} file(s) under {}",
        summary.record_count,
        summary.files.len(),
        dir.display()
    );
    Ok(summary)
}
