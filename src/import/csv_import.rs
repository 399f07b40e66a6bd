use anyhow::{Context, Result};
use csv::StringRecord;
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use super::detect::{detect_report_kind, TableLayout, BURN_LAYOUT, INVOICE_LAYOUT};
use crate::error::ReconcileError;
use crate::models::{BurnRecord, InvoiceRecord, ReportKind};

/// Cell values read as "missing" rather than as text or numbers.
/// Matches the default missing-value markers of common spreadsheet and dataframe tools.
const NA_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CsvOptions {
    pub(crate) delimiter: u8,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// First look at a report file: header, data row count and the guessed kind.
#[derive(Debug, Clone)]
pub(crate) struct ReportPreview {
    pub(crate) header: Vec<String>,
    pub(crate) rows: usize,
    pub(crate) kind: Option<ReportKind>,
}

pub(crate) struct CsvImporter;

impl CsvImporter {
    /// Read a report file and describe its shape without decoding any cells.
    pub(crate) fn preview(path: &Path, options: &CsvOptions) -> Result<ReportPreview> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .flexible(true)
            .has_headers(false)
            .from_path(path)
            .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

        let mut records = rdr.records();
        let header: Vec<String> = match records.next() {
            Some(record) => record
                .context("Failed to read CSV header")?
                .iter()
                .map(|s| s.to_string())
                .collect(),
            None => anyhow::bail!("CSV file is empty: {}", path.display()),
        };

        let mut rows = 0;
        for result in records {
            result.context("Failed to read CSV record")?;
            rows += 1;
        }

        let kind = detect_report_kind(&header);
        Ok(ReportPreview { header, rows, kind })
    }

    /// Guess the report kind of raw bytes from the width of their first row.
    pub(crate) fn sniff(bytes: &[u8], options: &CsvOptions) -> Option<ReportKind> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .flexible(true)
            .has_headers(false)
            .from_reader(bytes);
        let header = rdr.records().next()?.ok()?;
        let header: Vec<String> = header.iter().map(|s| s.to_string()).collect();
        detect_report_kind(&header)
    }

    /// Decode a burn report. Only table-shape problems are fatal.
    pub(crate) fn load_burn(
        bytes: &[u8],
        options: &CsvOptions,
    ) -> Result<Vec<BurnRecord>, ReconcileError> {
        let rows = read_table(bytes, &BURN_LAYOUT, options)?;
        let records: Vec<BurnRecord> = rows
            .iter()
            .map(|(line, row)| {
                let (project_number, project_description) =
                    BurnRecord::split_project_name(cell(row, 1));
                BurnRecord {
                    office: cell(row, 0).to_string(),
                    project_number,
                    project_description,
                    project_manager: cell(row, 2).to_string(),
                    account_manager: cell(row, 3).to_string(),
                    contractual_status: cell(row, 4).to_string(),
                    currency: cell(row, 5).to_string(),
                    time_burn: coerce_decimal(row, 6, *line, &BURN_LAYOUT),
                    expense_burn: coerce_decimal(row, 7, *line, &BURN_LAYOUT),
                    total_burn: coerce_decimal(row, 8, *line, &BURN_LAYOUT),
                }
            })
            .collect();

        tracing::debug!(rows = records.len(), "loaded burn report");
        Ok(records)
    }

    /// Decode an invoice report. Only the invoiced amount is read as a number.
    pub(crate) fn load_invoices(
        bytes: &[u8],
        options: &CsvOptions,
    ) -> Result<Vec<InvoiceRecord>, ReconcileError> {
        let rows = read_table(bytes, &INVOICE_LAYOUT, options)?;
        let records: Vec<InvoiceRecord> = rows
            .iter()
            .map(|(line, row)| InvoiceRecord {
                organisation: cell(row, 0).to_string(),
                company: cell(row, 1).to_string(),
                project_number: cell(row, 2).to_string(),
                project: cell(row, 3).to_string(),
                invoice_number: optional_text(cell(row, 4)),
                reference: cell(row, 5).to_string(),
                email_recipients: cell(row, 6).to_string(),
                invoice_date: cell(row, 7).to_string(),
                account_manager_current: cell(row, 8).to_string(),
                project_manager_current: cell(row, 9).to_string(),
                project_manager_original: cell(row, 10).to_string(),
                status: cell(row, 11).to_string(),
                due_date: cell(row, 12).to_string(),
                payment_date: cell(row, 13).to_string(),
                invoiced_amount: coerce_decimal(row, 14, *line, &INVOICE_LAYOUT),
                currency: cell(row, 15).to_string(),
                tax_amount: cell(row, 16).to_string(),
                invoiced_amount_with_tax: cell(row, 17).to_string(),
                converted_amount: cell(row, 18).to_string(),
                converted_currency: cell(row, 19).to_string(),
            })
            .collect();

        tracing::debug!(rows = records.len(), "loaded invoice report");
        Ok(records)
    }
}

/// Read all data rows of a report, checking them against the layout's arity.
///
/// The header row is required and must be exactly as wide as the layout.
/// Data rows may be narrower (missing trailing cells) but never wider.
/// Each row comes back with its 1-based line number in the source.
fn read_table(
    bytes: &[u8],
    layout: &TableLayout,
    options: &CsvOptions,
) -> Result<Vec<(u64, StringRecord)>, ReconcileError> {
    let kind = layout.kind;
    let expected = layout.arity();
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .flexible(true)
        .has_headers(false)
        .from_reader(bytes);

    let mut records = rdr.records();
    let header = match records.next() {
        Some(record) => record.map_err(|err| ReconcileError::Read { kind, err })?,
        None => return Err(ReconcileError::Empty { kind, expected }),
    };
    if header.len() != expected {
        return Err(ReconcileError::HeaderArity {
            kind,
            expected,
            found: header.len(),
        });
    }

    let mut rows = Vec::new();
    for (i, result) in records.enumerate() {
        let record = result.map_err(|err| ReconcileError::Read { kind, err })?;
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(i as u64 + 2);
        if record.len() > expected {
            return Err(ReconcileError::RowArity {
                kind,
                row: line as usize,
                expected,
                found: record.len(),
            });
        }
        rows.push((line, record));
    }
    Ok(rows)
}

fn cell(row: &StringRecord, idx: usize) -> &str {
    row.get(idx).unwrap_or("")
}

fn is_na(s: &str) -> bool {
    s.is_empty() || NA_TOKENS.contains(&s)
}

fn optional_text(s: &str) -> Option<String> {
    (!is_na(s)).then(|| s.to_string())
}

/// Parse a numeric cell, tolerating thousands separators.
/// Anything that still fails to parse is missing, never zero.
fn parse_decimal(s: &str) -> Option<Decimal> {
    let cleaned = s.trim().replace(',', "");
    if is_na(&cleaned) {
        return None;
    }
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}

fn coerce_decimal(
    row: &StringRecord,
    idx: usize,
    line: u64,
    layout: &TableLayout,
) -> Option<Decimal> {
    let raw = cell(row, idx);
    let value = parse_decimal(raw);
    if value.is_none() && !is_na(raw.trim()) {
        tracing::debug!(
            report = %layout.kind,
            line,
            column = layout.columns[idx],
            value = raw,
            "unparseable numeric cell treated as missing"
        );
    }
    value
}

#[cfg(test)]
#[path = "csv_import_tests.rs"]
mod tests;
