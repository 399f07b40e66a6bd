#![allow(clippy::unwrap_used)]

use super::*;
use crate::models::{BurnRecord, Comment};
use rust_decimal_macros::dec;

fn record(description: Option<&str>, difference: Option<Decimal>, comment: Comment) -> ComparisonRecord {
    ComparisonRecord {
        burn: BurnRecord {
            office: "London".into(),
            project_number: "1001".into(),
            project_description: description.map(str::to_string),
            project_manager: "Alice".into(),
            account_manager: "Bob".into(),
            contractual_status: "Fixed".into(),
            currency: "GBP".into(),
            time_burn: Some(dec!(4000.00)),
            expense_burn: Some(dec!(1000)),
            total_burn: Some(dec!(5000.00)),
        },
        invoiced_amount: dec!(4500),
        difference,
        comment,
    }
}

#[test]
fn test_header_only_for_empty_input() {
    let bytes = write_csv(&[]).unwrap();
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        "Project Number,Project Description,Project Manager,Account Manager,\
Time Burn (value),Expense Burn (value),Total Burn (value),Invoiced Amount,Difference,Comment\n"
    );
}

#[test]
fn test_row_rendering() {
    let bytes = write_csv(&[record(
        Some("Website Redesign"),
        Some(dec!(500.00)),
        Comment::BurnExceedsInvoice,
    )])
    .unwrap();
    let text = String::from_utf8(bytes).unwrap();
    let line = text.lines().nth(1).unwrap();
    assert_eq!(
        line,
        "1001,Website Redesign,Alice,Bob,4000.00,1000,5000.00,4500,500.00,BURN > INVOICE"
    );
}

#[test]
fn test_missing_values_render_empty() {
    let mut r = record(None, None, Comment::InvoiceExceedsBurn);
    r.burn.time_burn = None;
    let cells = row_cells(&r);
    assert_eq!(cells[1], "");
    assert_eq!(cells[4], "");
    assert_eq!(cells[8], "");
    assert_eq!(cells[9], "BURN < INVOICE");
}

#[test]
fn test_large_numbers_have_no_thousands_separator() {
    let mut r = record(None, Some(dec!(1234567.89)), Comment::BurnExceedsInvoice);
    r.invoiced_amount = dec!(9876543);
    let cells = row_cells(&r);
    assert_eq!(cells[7], "9876543");
    assert_eq!(cells[8], "1234567.89");
}

#[test]
fn test_fields_with_delimiters_are_quoted() {
    let bytes = write_csv(&[record(Some("Design, Build"), Some(dec!(0)), Comment::Ok)]).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.contains("\"Design, Build\""));
}

#[test]
fn test_every_line_has_ten_fields() {
    let bytes = write_csv(&[
        record(Some("A"), Some(dec!(1)), Comment::BurnExceedsInvoice),
        record(None, None, Comment::NoInvoice),
    ])
    .unwrap();
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(bytes.as_slice());
    for rec in rdr.records() {
        assert_eq!(rec.unwrap().len(), 10);
    }
}
