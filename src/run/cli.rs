use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::export;
use crate::error::ReconcileError;
use crate::import::{CsvImporter, CsvOptions, TableLayout};
use crate::models::{Comment, ReportKind};
use crate::pipeline;
use crate::reconcile::Summary;
use crate::ui::util::format_amount;

pub(crate) fn as_cli(args: &[String], settings: &Settings) -> Result<()> {
    match args[1].as_str() {
        "compare" | "c" => cli_compare(&args[2..], settings),
        "summary" | "s" => cli_summary(&args[2..], settings),
        "detect" => cli_detect(&args[2..], settings),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("burnrecon {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("burnrecon — reconcile monthly burn against invoices");
    println!();
    println!("Usage: burnrecon [command]");
    println!();
    println!("Commands:");
    println!("  (none)                           Launch interactive TUI");
    println!("  compare <burn.csv> <invoices.csv>");
    println!("                                   Write the burn vs invoice comparison CSV");
    println!("    --output, -o <path|->          Output file, or - for stdout");
    println!("                                   (default: {})", export::DEFAULT_FILE_NAME);
    println!("  summary <burn.csv> <invoices.csv>");
    println!("                                   Print reconciliation totals");
    println!("  detect <file.csv>                Show which report a file looks like");
    println!("  --help, -h                       Show this help");
    println!("  --version, -V                    Show version");
    println!();
    println!("Environment:");
    println!("  BURNRECON_DELIMITER              Input delimiter (default: ,)");
    println!("  BURNRECON_EXPORT_DIR             Default output directory");
    println!("  BURNRECON_LOG                    Log filter, e.g. debug");
    println!("  BURNRECON_LOG_FILE               TUI log file");
}

/// Where `compare` writes its table.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Output {
    Stdout,
    File(PathBuf),
}

fn cli_compare(args: &[String], settings: &Settings) -> Result<()> {
    let ReportArgs {
        burn: burn_path,
        invoices: invoice_path,
        output,
    } = parse_report_args(args, "compare")?;
    let bytes = run_pipeline(&burn_path, &invoice_path, settings, pipeline::reconcile)?;

    match output_target(output.as_deref(), settings) {
        Output::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes).context("Failed to write to stdout")?;
            stdout.flush()?;
        }
        Output::File(path) => {
            write_output(&path, &bytes)?;
            println!(
                "Wrote {} vs {} comparison to {}",
                display_name(&burn_path),
                display_name(&invoice_path),
                path.display()
            );
        }
    }
    Ok(())
}

fn cli_summary(args: &[String], settings: &Settings) -> Result<()> {
    let ReportArgs {
        burn: burn_path,
        invoices: invoice_path,
        output,
    } = parse_report_args(args, "summary")?;
    if output.is_some() {
        anyhow::bail!("summary prints to the terminal and takes no --output");
    }
    let records = run_pipeline(&burn_path, &invoice_path, settings, pipeline::compare)?;
    let summary = Summary::from_records(&records);

    println!(
        "burnrecon — {} vs {}",
        display_name(&burn_path),
        display_name(&invoice_path)
    );
    println!("{}", "─".repeat(40));
    println!(
        "  {:<18}{:>12}",
        "Generated:",
        chrono::Local::now().format("%Y-%m-%d %H:%M")
    );
    println!("  {:<18}{:>12}", "Rows:", summary.rows);
    for comment in Comment::all() {
        println!(
            "  {:<18}{:>12}",
            format!("{comment}:"),
            summary.count(*comment)
        );
    }
    println!("  {:<18}{:>12}", "Total Burn:", format_amount(summary.total_burn));
    println!("  {:<18}{:>12}", "Invoiced:", format_amount(summary.invoiced));
    println!("  {:<18}{:>12}", "Difference:", format_amount(summary.difference));
    Ok(())
}

fn cli_detect(args: &[String], settings: &Settings) -> Result<()> {
    let Some(file) = args.first() else {
        anyhow::bail!("Usage: burnrecon detect <file.csv>");
    };
    let path = PathBuf::from(crate::run::shellexpand(file));
    let preview = CsvImporter::preview(&path, &settings.csv)?;

    match preview.kind {
        Some(kind) => {
            println!(
                "{}: {kind} report ({} columns, {} rows)",
                path.display(),
                preview.header.len(),
                preview.rows
            );
            for (i, name) in TableLayout::for_kind(kind).columns.iter().enumerate() {
                let found = preview.header.get(i).map(String::as_str).unwrap_or("");
                println!("  [{i:>2}] {name:<26} <- {found}");
            }
        }
        None => {
            println!(
                "{}: unrecognised layout ({} columns; burn reports have {}, invoice reports {})",
                path.display(),
                preview.header.len(),
                TableLayout::for_kind(ReportKind::Burn).arity(),
                TableLayout::for_kind(ReportKind::Invoice).arity(),
            );
        }
    }
    Ok(())
}

/// Command line of `compare` and `summary`: two report paths and an optional output.
#[derive(Debug, PartialEq, Eq)]
struct ReportArgs {
    burn: PathBuf,
    invoices: PathBuf,
    output: Option<String>,
}

fn parse_report_args(args: &[String], command: &str) -> Result<ReportArgs> {
    let usage = format!("Usage: burnrecon {command} <burn.csv> <invoices.csv>");
    let mut positional = Vec::new();
    let mut output = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--output" || arg == "-o" {
            let Some(value) = iter.next() else {
                anyhow::bail!("{arg} needs a path, or - for stdout.\n {usage}");
            };
            output = Some(value.clone());
        } else {
            positional.push(arg.as_str());
        }
    }

    match positional.as_slice() {
        [burn, invoice] => Ok(ReportArgs {
            burn: PathBuf::from(crate::run::shellexpand(burn)),
            invoices: PathBuf::from(crate::run::shellexpand(invoice)),
            output,
        }),
        [_, _, extra, ..] => anyhow::bail!("Unexpected argument: {extra}\n {usage}"),
        _ => anyhow::bail!(
            "Both a burn report and an invoice report are required.\n {usage}"
        ),
    }
}

fn output_target(output: Option<&str>, settings: &Settings) -> Output {
    match output {
        Some("-") => Output::Stdout,
        Some(path) => Output::File(PathBuf::from(crate::run::shellexpand(path))),
        None => Output::File(settings.export_dir.join(export::DEFAULT_FILE_NAME)),
    }
}

fn read_report(path: &Path, kind: ReportKind) -> Result<Vec<u8>> {
    if !path.exists() {
        anyhow::bail!("{kind} report not found: {}", path.display());
    }
    std::fs::read(path).with_context(|| format!("Failed to read {kind} report: {}", path.display()))
}

/// Read both reports and run `stage` on them, pointing out swapped arguments.
fn run_pipeline<T>(
    burn_path: &Path,
    invoice_path: &Path,
    settings: &Settings,
    stage: impl FnOnce(&[u8], &[u8], &CsvOptions) -> Result<T, ReconcileError>,
) -> Result<T> {
    let burn = read_report(burn_path, ReportKind::Burn)?;
    let invoices = read_report(invoice_path, ReportKind::Invoice)?;
    tracing::info!(
        burn = %burn_path.display(),
        invoices = %invoice_path.display(),
        "comparing reports"
    );

    stage(&burn, &invoices, &settings.csv).map_err(|e| {
        let swapped = e.kind().is_some()
            && CsvImporter::sniff(&burn, &settings.csv) == Some(ReportKind::Invoice)
            && CsvImporter::sniff(&invoices, &settings.csv) == Some(ReportKind::Burn);
        let err = anyhow::Error::new(e);
        if swapped {
            err.context("The burn and invoice reports look swapped: pass the burn report first")
        } else {
            err
        }
    })
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
