use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

use super::app::{App, InputMode, PendingAction, Screen};
use crate::models::{Comment, ReportKind};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit burnrecon", cmd_quit, r);
    register_command!("quit", "Quit burnrecon", cmd_quit, r);
    register_command!("s", "Go to Sources", cmd_sources, r);
    register_command!("sources", "Go to Sources", cmd_sources, r);
    register_command!("r", "Go to Results", cmd_results, r);
    register_command!("results", "Go to Results", cmd_results, r);
    register_command!("run", "Re-run the comparison", cmd_run, r);
    register_command!(
        "burn",
        "Set burn report (e.g. :burn ~/burn.csv)",
        cmd_burn,
        r
    );
    register_command!(
        "invoice",
        "Set invoice report (e.g. :invoice ~/invoices.csv)",
        cmd_invoice,
        r
    );
    register_command!("clear", "Forget both reports and results", cmd_clear, r);
    register_command!(
        "export",
        "Export comparison CSV (e.g. :export ~/recon.csv)",
        cmd_export,
        r
    );
    register_command!("w", "Export comparison CSV", cmd_export, r);
    register_command!(
        "filter",
        "Filter results (e.g. :filter no invoice, :filter all)",
        cmd_filter,
        r
    );
    register_command!("f", "Filter results by comment", cmd_filter, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let (name, args) = trimmed
        .split_once(char::is_whitespace)
        .map(|(n, a)| (n, a.trim()))
        .unwrap_or((trimmed, ""));

    if name.is_empty() {
        return Ok(());
    }

    match COMMANDS.get(name) {
        Some(cmd) => (cmd.run)(args, app),
        None => {
            app.set_status(format!("Unknown command: {name}. Type :help for commands"));
            Ok(())
        }
    }
}

fn cmd_quit(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_sources(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.switch_screen(Screen::Sources);
    Ok(())
}

fn cmd_results(_args: &str, app: &mut App) -> anyhow::Result<()> {
    if app.results.is_empty() {
        app.set_status("No results yet: pick a burn and an invoice report");
    }
    app.switch_screen(Screen::Results);
    Ok(())
}

fn cmd_run(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.run_comparison_or_report();
    Ok(())
}

fn cmd_burn(args: &str, app: &mut App) -> anyhow::Result<()> {
    set_report(args, app, ReportKind::Burn)
}

fn cmd_invoice(args: &str, app: &mut App) -> anyhow::Result<()> {
    set_report(args, app, ReportKind::Invoice)
}

fn set_report(args: &str, app: &mut App, kind: ReportKind) -> anyhow::Result<()> {
    if args.is_empty() {
        app.active_slot = kind;
        app.switch_screen(Screen::Sources);
        app.set_status(format!("Pick the {kind} report"));
        return Ok(());
    }
    let path = PathBuf::from(crate::run::shellexpand(args));
    match app.set_source(&path, Some(kind)) {
        Ok(_) => {
            app.set_status(format!("{kind} report: {}", path.display()));
            if app.burn.is_some() && app.invoices.is_some() {
                app.run_comparison_or_report();
            }
        }
        Err(e) => app.set_status(format!("Error loading file: {e}")),
    }
    Ok(())
}

fn cmd_clear(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.clear_sources();
    app.switch_screen(Screen::Sources);
    app.set_status("Cleared both reports");
    Ok(())
}

fn cmd_export(args: &str, app: &mut App) -> anyhow::Result<()> {
    if app.results.is_empty() {
        app.set_status("Nothing to export: run a comparison first");
        return Ok(());
    }
    let path = if args.is_empty() {
        app.default_export_path()
    } else {
        PathBuf::from(crate::run::shellexpand(args))
    };

    if path.exists() {
        app.confirm_message = format!("Overwrite {}?", path.display());
        app.pending_action = Some(PendingAction::OverwriteExport { path });
        app.input_mode = InputMode::Confirm;
        return Ok(());
    }

    export_to(app, &path);
    Ok(())
}

/// Export and report the outcome in the status bar.
pub(crate) fn export_to(app: &mut App, path: &std::path::Path) {
    match app.export_results(path) {
        Ok(count) => app.set_status(format!("Exported {count} rows to {}", path.display())),
        Err(e) => app.set_status(format!("Export failed: {e:#}")),
    }
}

fn cmd_filter(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() || args.eq_ignore_ascii_case("all") {
        app.set_result_filter(None);
        app.set_status("Showing all rows");
    } else if let Some(comment) = Comment::parse(args) {
        app.set_result_filter(Some(comment));
        app.set_status(format!("Showing {comment} rows"));
    } else {
        app.set_status(format!(
            "Unknown filter '{args}'. Use one of: all, {}",
            Comment::all()
                .iter()
                .map(|c| c.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ));
        return Ok(());
    }
    app.switch_screen(Screen::Results);
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
