use rust_decimal::Decimal;

use crate::error::ReconcileError;
use crate::models::ComparisonRecord;

/// Column headers of the comparison table, in output order.
pub(crate) const COMPARISON_COLUMNS: [&str; 10] = [
    "Project Number",
    "Project Description",
    "Project Manager",
    "Account Manager",
    "Time Burn (value)",
    "Expense Burn (value)",
    "Total Burn (value)",
    "Invoiced Amount",
    "Difference",
    "Comment",
];

/// Default file name offered when the comparison is saved.
pub(crate) const DEFAULT_FILE_NAME: &str = "burn_vs_invoice_comparison.csv";

/// Serialize comparison rows as comma-separated UTF-8 with a header row.
///
/// Numbers keep their source scale and carry no thousands separator;
/// missing values are written as empty cells.
pub(crate) fn write_csv(records: &[ComparisonRecord]) -> Result<Vec<u8>, ReconcileError> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    wtr.write_record(COMPARISON_COLUMNS)?;
    for record in records {
        wtr.write_record(row_cells(record))?;
    }

    wtr.into_inner()
        .map_err(|e| ReconcileError::Flush(e.into_error()))
}

/// Render one record as the ten output cells.
pub(crate) fn row_cells(record: &ComparisonRecord) -> [String; 10] {
    let burn = &record.burn;
    [
        burn.project_number.clone(),
        burn.project_description.clone().unwrap_or_default(),
        burn.project_manager.clone(),
        burn.account_manager.clone(),
        format_number(burn.time_burn),
        format_number(burn.expense_burn),
        format_number(burn.total_burn),
        record.invoiced_amount.to_string(),
        format_number(record.difference),
        record.comment.to_string(),
    ]
}

fn format_number(value: Option<Decimal>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
