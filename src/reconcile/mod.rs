use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::models::{BurnRecord, Comment, ComparisonRecord, InvoiceRecord};

/// Left-join burn rows to invoice lines on project number and classify each pair.
///
/// Every burn row yields one output row per matching invoice line, in invoice
/// order, or a single unmatched row when nothing matches. Keys compare
/// verbatim: no trimming, no case folding.
pub(crate) fn reconcile_records(
    burn: &[BurnRecord],
    invoices: &[InvoiceRecord],
) -> Vec<ComparisonRecord> {
    let mut by_project: HashMap<&str, Vec<&InvoiceRecord>> = HashMap::new();
    for invoice in invoices {
        by_project
            .entry(invoice.project_number.as_str())
            .or_default()
            .push(invoice);
    }

    let mut out = Vec::with_capacity(burn.len());
    for record in burn {
        match by_project.get(record.project_number.as_str()) {
            Some(matches) => {
                for &invoice in matches {
                    out.push(compare(record, Some(invoice)));
                }
            }
            None => out.push(compare(record, None)),
        }
    }

    let summary = Summary::from_records(&out);
    tracing::info!(
        burn_rows = burn.len(),
        invoice_rows = invoices.len(),
        output_rows = summary.rows,
        no_invoice = summary.count(Comment::NoInvoice),
        ok = summary.count(Comment::Ok),
        burn_exceeds = summary.count(Comment::BurnExceedsInvoice),
        invoice_exceeds = summary.count(Comment::InvoiceExceedsBurn),
        "reconciled burn against invoices"
    );
    out
}

fn compare(burn: &BurnRecord, invoice: Option<&InvoiceRecord>) -> ComparisonRecord {
    let invoiced = invoice.and_then(|i| i.invoiced_amount);

    // Classification sees the raw values; fills happen afterwards.
    let raw_difference = match (burn.total_burn, invoiced) {
        (Some(total), Some(amount)) => total.checked_sub(amount),
        _ => None,
    };
    let has_invoice = invoice.is_some_and(InvoiceRecord::is_issued);
    let comment = Comment::classify(has_invoice, raw_difference);

    ComparisonRecord {
        burn: burn.clone(),
        invoiced_amount: invoiced.unwrap_or(Decimal::ZERO),
        difference: raw_difference.or(burn.total_burn),
        comment,
    }
}

/// Aggregate view over one reconciliation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Summary {
    pub(crate) rows: usize,
    pub(crate) by_comment: [usize; 4],
    pub(crate) total_burn: Decimal,
    pub(crate) invoiced: Decimal,
    pub(crate) difference: Decimal,
}

impl Summary {
    pub(crate) fn from_records(records: &[ComparisonRecord]) -> Self {
        let mut summary = Self {
            rows: records.len(),
            ..Self::default()
        };
        for record in records {
            summary.by_comment[comment_slot(record.comment)] += 1;
            if let Some(total) = record.burn.total_burn {
                summary.total_burn = summary.total_burn.saturating_add(total);
            }
            summary.invoiced = summary.invoiced.saturating_add(record.invoiced_amount);
            if let Some(diff) = record.difference {
                summary.difference = summary.difference.saturating_add(diff);
            }
        }
        summary
    }

    pub(crate) fn count(&self, comment: Comment) -> usize {
        self.by_comment[comment_slot(comment)]
    }
}

fn comment_slot(comment: Comment) -> usize {
    match comment {
        Comment::NoInvoice => 0,
        Comment::Ok => 1,
        Comment::BurnExceedsInvoice => 2,
        Comment::InvoiceExceedsBurn => 3,
    }
}
