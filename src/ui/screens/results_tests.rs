#![allow(clippy::unwrap_used)]

use super::*;
use crate::models::BurnRecord;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn unbilled() -> ComparisonRecord {
    ComparisonRecord {
        burn: BurnRecord {
            office: "London".into(),
            project_number: "1001".into(),
            project_description: Some("Website".into()),
            project_manager: "Alice".into(),
            account_manager: "Bob".into(),
            contractual_status: "Fixed".into(),
            currency: "GBP".into(),
            time_burn: Some(dec!(4000)),
            expense_burn: None,
            total_burn: Some(dec!(4000)),
        },
        invoiced_amount: Decimal::ZERO,
        difference: Some(dec!(4000)),
        comment: Comment::NoInvoice,
    }
}

#[test]
fn test_headers_follow_export_columns() {
    assert_eq!(HEADERS.len(), crate::export::row_cells(&unbilled()).len());
    assert_eq!(HEADERS[0], "Project");
    assert_eq!(HEADERS[7], "Invoiced");
    assert_eq!(HEADERS[9], "Comment");
}

#[test]
fn test_no_invoice_row_shows_zero_invoiced() {
    let cells = grid_cells(&unbilled());
    assert_eq!(cells[0], "1001");
    assert_eq!(cells[5], "—");
    assert_eq!(cells[7], "0.00");
    assert_eq!(cells[8], "4,000.00");
    assert_eq!(cells[9], "NO INVOICE");
}
