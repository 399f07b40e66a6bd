//! Burn vs invoice reconciliation, from raw report bytes to the comparison table.
//!
//! Every call is independent: the inputs are borrowed, nothing is cached, and
//! identical inputs always produce byte-identical output.

use crate::error::ReconcileError;
use crate::export;
use crate::import::{CsvImporter, CsvOptions};
use crate::models::ComparisonRecord;
use crate::reconcile::reconcile_records;

/// Load both reports and reconcile them into typed comparison rows.
pub(crate) fn compare(
    burn: &[u8],
    invoices: &[u8],
    options: &CsvOptions,
) -> Result<Vec<ComparisonRecord>, ReconcileError> {
    let burn = CsvImporter::load_burn(burn, options)?;
    let invoices = CsvImporter::load_invoices(invoices, options)?;
    Ok(reconcile_records(&burn, &invoices))
}

/// Reconcile two reports into the comparison CSV.
pub(crate) fn reconcile(
    burn: &[u8],
    invoices: &[u8],
    options: &CsvOptions,
) -> Result<Vec<u8>, ReconcileError> {
    let records = compare(burn, invoices, options)?;
    export::write_csv(&records)
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
