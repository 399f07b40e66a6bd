#![allow(clippy::unwrap_used)]

use super::*;

const BURN: &str = "\
Office,Project Name,PM,AM,Status,Currency,Time,Expense,Total
London,1001 Website,Alice,Bob,Fixed,GBP,100,0,100
London,1002 Brand,Carol,Dan,Fixed,GBP,50,0,50
";

fn invoices() -> String {
    let header: Vec<String> = (1..=20).map(|i| format!("c{i}")).collect();
    let mut cells = vec![String::new(); 20];
    cells[2] = "1001".into();
    cells[4] = "INV1".into();
    cells[14] = "100".into();
    format!("{}\n{}\n", header.join(","), cells.join(","))
}

fn settings(dir: &Path) -> Settings {
    Settings {
        csv: CsvOptions::default(),
        export_dir: dir.to_path_buf(),
        log_filter: None,
        log_file: None,
        warnings: Vec::new(),
    }
}

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

// ── argument parsing ──────────────────────────────────────────

#[test]
fn test_report_args_require_both_reports() {
    let err = parse_report_args(&args(&["burn.csv"]), "compare").unwrap_err();
    assert!(err.to_string().contains("Both a burn report and an invoice report"));
    assert!(parse_report_args(&[], "compare").is_err());
}

#[test]
fn test_report_args_skip_output_flag() {
    let parsed = parse_report_args(&args(&["-o", "out.csv", "b.csv", "i.csv"]), "compare").unwrap();
    assert_eq!(
        parsed,
        ReportArgs {
            burn: PathBuf::from("b.csv"),
            invoices: PathBuf::from("i.csv"),
            output: Some("out.csv".into()),
        }
    );
}

#[test]
fn test_report_args_reject_extra_positional() {
    let err = parse_report_args(&args(&["b.csv", "i.csv", "extra.csv"]), "compare").unwrap_err();
    assert!(err.to_string().starts_with("Unexpected argument: extra.csv"));
    assert!(err.to_string().contains("Usage: burnrecon compare"));
}

#[test]
fn test_report_args_reject_dangling_output_flag() {
    let err = parse_report_args(&args(&["b.csv", "i.csv", "-o"]), "compare").unwrap_err();
    assert!(err.to_string().starts_with("-o needs a path"));
    let err = parse_report_args(&args(&["b.csv", "i.csv", "--output"]), "compare").unwrap_err();
    assert!(err.to_string().starts_with("--output needs a path"));
}

#[test]
fn test_compare_dangling_output_flag_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let burn = write_file(dir.path(), "burn.csv", BURN);
    let inv = write_file(dir.path(), "inv.csv", &invoices());
    let a = args(&[burn.to_str().unwrap(), inv.to_str().unwrap(), "-o"]);
    assert!(cli_compare(&a, &settings(dir.path())).is_err());
    assert!(!dir.path().join(export::DEFAULT_FILE_NAME).exists());
}

#[test]
fn test_output_target() {
    let s = settings(Path::new("/exports"));
    assert_eq!(
        output_target(None, &s),
        Output::File(PathBuf::from("/exports/burn_vs_invoice_comparison.csv"))
    );
    assert_eq!(output_target(Some("-"), &s), Output::Stdout);
    assert_eq!(
        output_target(Some("x.csv"), &s),
        Output::File(PathBuf::from("x.csv"))
    );
}

// ── compare ───────────────────────────────────────────────────

#[test]
fn test_compare_writes_default_file() {
    let dir = tempfile::tempdir().unwrap();
    let burn = write_file(dir.path(), "burn.csv", BURN);
    let inv = write_file(dir.path(), "inv.csv", &invoices());
    let s = settings(dir.path());

    let a = args(&[burn.to_str().unwrap(), inv.to_str().unwrap()]);
    cli_compare(&a, &s).unwrap();

    let out = std::fs::read_to_string(dir.path().join(export::DEFAULT_FILE_NAME)).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "1001,Website,Alice,Bob,100,0,100,100,0,OK");
    assert_eq!(lines[2], "1002,Brand,Carol,Dan,50,0,50,0,50,NO INVOICE");
}

#[test]
fn test_compare_creates_output_directory() {
    let dir = tempfile::tempdir().unwrap();
    let burn = write_file(dir.path(), "burn.csv", BURN);
    let inv = write_file(dir.path(), "inv.csv", &invoices());
    let target = dir.path().join("nested/out.csv");
    let a = args(&[
        burn.to_str().unwrap(),
        inv.to_str().unwrap(),
        "--output",
        target.to_str().unwrap(),
    ]);
    cli_compare(&a, &settings(dir.path())).unwrap();
    assert!(target.exists());
}

#[test]
fn test_compare_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let inv = write_file(dir.path(), "inv.csv", &invoices());
    let missing = dir.path().join("nope.csv");
    let a = args(&[missing.to_str().unwrap(), inv.to_str().unwrap()]);
    let err = cli_compare(&a, &settings(dir.path())).unwrap_err();
    assert!(err.to_string().contains("Burn report not found"));
}

#[test]
fn test_compare_reports_swapped_arguments() {
    let dir = tempfile::tempdir().unwrap();
    let burn = write_file(dir.path(), "burn.csv", BURN);
    let inv = write_file(dir.path(), "inv.csv", &invoices());
    let a = args(&[inv.to_str().unwrap(), burn.to_str().unwrap()]);
    let err = cli_compare(&a, &settings(dir.path())).unwrap_err();
    assert!(err.to_string().contains("look swapped"));
    assert!(!dir.path().join(export::DEFAULT_FILE_NAME).exists());
}

#[test]
fn test_compare_shape_error_without_swap() {
    let dir = tempfile::tempdir().unwrap();
    let burn = write_file(dir.path(), "burn.csv", "a,b,c\n1,2,3\n");
    let inv = write_file(dir.path(), "inv.csv", &invoices());
    let a = args(&[burn.to_str().unwrap(), inv.to_str().unwrap()]);
    let err = cli_compare(&a, &settings(dir.path())).unwrap_err();
    assert_eq!(err.to_string(), "Burn report has 3 columns, expected 9");
}

#[test]
fn test_summary_and_detect_run() {
    let dir = tempfile::tempdir().unwrap();
    let burn = write_file(dir.path(), "burn.csv", BURN);
    let inv = write_file(dir.path(), "inv.csv", &invoices());
    let s = settings(dir.path());
    let (b, i) = (burn.to_str().unwrap(), inv.to_str().unwrap());
    cli_summary(&args(&[b, i]), &s).unwrap();
    assert!(cli_summary(&args(&[b, i, "-o", "x"]), &s).is_err());
    cli_detect(&args(&[inv.to_str().unwrap()]), &s).unwrap();
    assert!(cli_detect(&[], &s).is_err());
}

// ── misc ──────────────────────────────────────────────────────

#[test]
fn test_unknown_command() {
    let dir = tempfile::tempdir().unwrap();
    let err = as_cli(&args(&["burnrecon", "frobnicate"]), &settings(dir.path())).unwrap_err();
    assert!(err.to_string().contains("Unknown command"));
}

#[test]
fn test_display_name() {
    assert_eq!(display_name(Path::new("/a/b/burn.csv")), "burn.csv");
}
