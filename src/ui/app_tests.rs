#![allow(clippy::unwrap_used)]

use super::*;
use crate::import::CsvOptions;
use rust_decimal_macros::dec;

const BURN: &str = "\
Office,Project Name,PM,AM,Status,Currency,Time,Expense,Total
London,1001 Website,Alice,Bob,Fixed,GBP,100,0,100
London,1002 Brand,Carol,Dan,Fixed,GBP,50,0,50
London,1003 App,Eve,Fay,Fixed,GBP,10,0,10
";

fn invoices() -> String {
    let header: Vec<String> = (1..=20).map(|i| format!("c{i}")).collect();
    let mut out = header.join(",") + "\n";
    for (project, inv, amount) in [("1001", "INV1", "100"), ("1003", "INV3", "25")] {
        let mut cells = vec![String::new(); 20];
        cells[2] = project.into();
        cells[4] = inv.into();
        cells[14] = amount.into();
        out.push_str(&cells.join(","));
        out.push('\n');
    }
    out
}

fn app(dir: &Path) -> App {
    App::new(Settings {
        csv: CsvOptions::default(),
        export_dir: dir.to_path_buf(),
        log_filter: None,
        log_file: None,
        warnings: Vec::new(),
    })
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_pick_routes_by_detected_layout() {
    let dir = tempfile::tempdir().unwrap();
    let inv = write(dir.path(), "invoices.csv", &invoices());
    let mut app = app(dir.path());

    // Active slot is Burn, but the file is invoice-shaped
    assert_eq!(app.active_slot, ReportKind::Burn);
    let slot = app.set_source(&inv, None).unwrap();
    assert_eq!(slot, ReportKind::Invoice);
    assert!(app.invoices.is_some());
    assert!(app.burn.is_none());
    assert_eq!(app.active_slot, ReportKind::Burn);
}

#[test]
fn test_unknown_layout_goes_to_active_slot() {
    let dir = tempfile::tempdir().unwrap();
    let odd = write(dir.path(), "odd.csv", "a,b\n1,2\n");
    let mut app = app(dir.path());
    app.active_slot = ReportKind::Invoice;
    assert_eq!(app.set_source(&odd, None).unwrap(), ReportKind::Invoice);
    assert_eq!(app.active_slot, ReportKind::Burn);
}

#[test]
fn test_explicit_slot_wins() {
    let dir = tempfile::tempdir().unwrap();
    let burn = write(dir.path(), "burn.csv", BURN);
    let mut app = app(dir.path());
    let slot = app.set_source(&burn, Some(ReportKind::Invoice)).unwrap();
    assert_eq!(slot, ReportKind::Invoice);
}

#[test]
fn test_picking_both_runs_comparison() {
    let dir = tempfile::tempdir().unwrap();
    let burn = write(dir.path(), "burn.csv", BURN);
    let inv = write(dir.path(), "invoices.csv", &invoices());
    let mut app = app(dir.path());

    app.pick_file(&burn);
    assert_eq!(app.screen, Screen::Sources);
    app.pick_file(&inv);

    assert_eq!(app.screen, Screen::Results);
    assert_eq!(app.results.len(), 3);
    assert_eq!(app.summary.count(Comment::Ok), 1);
    assert_eq!(app.summary.count(Comment::NoInvoice), 1);
    assert_eq!(app.summary.count(Comment::InvoiceExceedsBurn), 1);
    assert_eq!(app.results[2].difference, Some(dec!(-15)));
    assert!(app.status_message.starts_with("Compared 3 rows"));
}

#[test]
fn test_comparison_failure_is_reported_in_status() {
    let dir = tempfile::tempdir().unwrap();
    let burn = write(dir.path(), "burn.csv", BURN);
    let odd = write(dir.path(), "odd.csv", "a,b\n1,2\n");
    let mut app = app(dir.path());
    app.set_source(&burn, None).unwrap();
    app.pick_file(&odd);
    assert_eq!(app.screen, Screen::Sources);
    assert!(app.status_message.contains("Invoice report has 2 columns"));
}

#[test]
fn test_run_without_both_sources() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(dir.path());
    let err = app.run_comparison().unwrap_err();
    assert!(err.to_string().contains("Both a burn report"));
}

#[test]
fn test_pick_missing_file_sets_status() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(dir.path());
    app.pick_file(&dir.path().join("nope.csv"));
    assert!(app.status_message.starts_with("Error loading file"));
    assert!(app.burn.is_none());
}

#[test]
fn test_filter_cycle_and_visible_results() {
    let dir = tempfile::tempdir().unwrap();
    let burn = write(dir.path(), "burn.csv", BURN);
    let inv = write(dir.path(), "invoices.csv", &invoices());
    let mut app = app(dir.path());
    app.pick_file(&burn);
    app.pick_file(&inv);

    assert_eq!(app.visible_results(), vec![0, 1, 2]);
    app.cycle_result_filter();
    assert_eq!(app.result_filter, Some(Comment::NoInvoice));
    assert_eq!(app.visible_results(), vec![1]);
    app.cycle_result_filter();
    assert_eq!(app.result_filter, Some(Comment::Ok));
    app.cycle_result_filter();
    app.cycle_result_filter();
    assert_eq!(app.result_filter, Some(Comment::InvoiceExceedsBurn));
    assert_eq!(app.visible_results(), vec![2]);
    app.cycle_result_filter();
    assert_eq!(app.result_filter, None);
}

#[test]
fn test_export_writes_all_rows_regardless_of_filter() {
    let dir = tempfile::tempdir().unwrap();
    let burn = write(dir.path(), "burn.csv", BURN);
    let inv = write(dir.path(), "invoices.csv", &invoices());
    let mut app = app(dir.path());
    app.pick_file(&burn);
    app.pick_file(&inv);
    app.set_result_filter(Some(Comment::Ok));

    let target = app.default_export_path();
    assert_eq!(app.export_results(&target).unwrap(), 3);
    let text = std::fs::read_to_string(&target).unwrap();
    assert_eq!(text.lines().count(), 4);
}

#[test]
fn test_export_without_results_fails() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(dir.path());
    assert!(app.export_results(&dir.path().join("x.csv")).is_err());
}

#[test]
fn test_clear_sources() {
    let dir = tempfile::tempdir().unwrap();
    let burn = write(dir.path(), "burn.csv", BURN);
    let inv = write(dir.path(), "invoices.csv", &invoices());
    let mut app = app(dir.path());
    app.pick_file(&burn);
    app.pick_file(&inv);
    app.clear_sources();
    assert!(app.burn.is_none() && app.invoices.is_none());
    assert!(app.results.is_empty());
    assert_eq!(app.active_slot, ReportKind::Burn);
}

#[test]
fn test_file_browser_lists_dirs_then_reports() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("sub")).unwrap();
    write(dir.path(), "b.csv", BURN);
    write(dir.path(), "a.TSV", "x");
    write(dir.path(), "notes.md", "x");
    write(dir.path(), ".hidden.csv", "x");
    let mut app = app(dir.path());
    app.file_browser_path = dir.path().to_path_buf();
    app.refresh_file_browser();

    let names: Vec<String> = app
        .file_browser_entries
        .iter()
        .skip(1)
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["sub", "a.TSV", "b.csv"]);

    app.file_browser_filter = "b.c".into();
    let filtered = app.file_browser_filtered();
    // Parent entry always passes
    assert_eq!(filtered, vec![0, 3]);
}

#[test]
fn test_failed_rerun_drops_previous_results() {
    let dir = tempfile::tempdir().unwrap();
    let burn = write(dir.path(), "burn.csv", BURN);
    let inv = write(dir.path(), "invoices.csv", &invoices());
    let odd = write(dir.path(), "odd.csv", "a,b\n1,2\n");
    let mut app = app(dir.path());
    app.pick_file(&burn);
    app.pick_file(&inv);
    assert_eq!(app.results.len(), 3);

    app.set_source(&odd, Some(ReportKind::Invoice)).unwrap();
    assert!(app.results.is_empty());

    app.run_comparison_or_report();
    assert!(app.status_message.contains("Invoice report has 2 columns"));
    assert!(app.results.is_empty());
    assert_eq!(app.summary.rows, 0);
    assert!(app.export_results(&dir.path().join("out.csv")).is_err());
    assert!(!dir.path().join("out.csv").exists());
}

#[test]
fn test_replacing_a_slot_clears_results() {
    let dir = tempfile::tempdir().unwrap();
    let burn = write(dir.path(), "burn.csv", BURN);
    let inv = write(dir.path(), "invoices.csv", &invoices());
    let mut app = app(dir.path());
    app.pick_file(&burn);
    app.pick_file(&inv);
    app.result_cursor.down(3, 10);

    app.set_source(&burn, Some(ReportKind::Burn)).unwrap();
    assert!(app.results.is_empty());
    assert_eq!(app.result_cursor, ListCursor::default());
}
