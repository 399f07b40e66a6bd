use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::export;
use crate::import::{CsvImporter, ReportPreview};
use crate::models::{Comment, ComparisonRecord, ReportKind};
use crate::pipeline;
use crate::reconcile::Summary;
use crate::ui::util::ListCursor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Sources,
    Results,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Sources, Self::Results]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sources => write!(f, "Sources"),
            Self::Results => write!(f, "Results"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    OverwriteExport { path: PathBuf },
}

/// One input report picked for this session.
#[derive(Debug, Clone)]
pub(crate) struct Source {
    pub(crate) path: PathBuf,
    pub(crate) preview: ReportPreview,
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) settings: Settings,

    // Sources
    pub(crate) active_slot: ReportKind,
    pub(crate) burn: Option<Source>,
    pub(crate) invoices: Option<Source>,

    // Results
    pub(crate) results: Vec<ComparisonRecord>,
    pub(crate) summary: Summary,
    pub(crate) result_filter: Option<Comment>,
    pub(crate) result_cursor: ListCursor,

    // File browser
    pub(crate) file_browser_path: PathBuf,
    pub(crate) file_browser_entries: Vec<PathBuf>,
    pub(crate) file_browser_cursor: ListCursor,
    pub(crate) file_browser_filter: String,
    pub(crate) file_browser_show_hidden: bool,
    pub(crate) file_browser_input_focused: bool,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(settings: Settings) -> Self {
        let start_dir = std::env::current_dir()
            .ok()
            .or_else(|| directories::UserDirs::new().map(|d| d.home_dir().to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("/"));

        Self {
            running: true,
            screen: Screen::Sources,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            settings,

            active_slot: ReportKind::Burn,
            burn: None,
            invoices: None,

            results: Vec::new(),
            summary: Summary::default(),
            result_filter: None,
            result_cursor: ListCursor::default(),

            file_browser_path: start_dir,
            file_browser_entries: Vec::new(),
            file_browser_cursor: ListCursor::default(),
            file_browser_filter: String::new(),
            file_browser_show_hidden: false,
            file_browser_input_focused: false,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Change screen; entering Sources re-reads the current directory.
    pub(crate) fn switch_screen(&mut self, screen: Screen) {
        if screen == Screen::Sources && self.screen != Screen::Sources {
            self.refresh_file_browser();
        }
        self.screen = screen;
    }

    pub(crate) fn source(&self, kind: ReportKind) -> Option<&Source> {
        match kind {
            ReportKind::Burn => self.burn.as_ref(),
            ReportKind::Invoice => self.invoices.as_ref(),
        }
    }

    fn source_mut(&mut self, kind: ReportKind) -> &mut Option<Source> {
        match kind {
            ReportKind::Burn => &mut self.burn,
            ReportKind::Invoice => &mut self.invoices,
        }
    }

    /// Put a file into a slot. `kind: None` routes it by detected layout,
    /// falling back to the active slot. Returns the slot it went into.
    pub(crate) fn set_source(&mut self, path: &Path, kind: Option<ReportKind>) -> Result<ReportKind> {
        let preview = CsvImporter::preview(path, &self.settings.csv)?;
        let slot = kind.or(preview.kind).unwrap_or(self.active_slot);
        if preview.kind.is_some_and(|detected| detected != slot) {
            tracing::warn!(path = %path.display(), %slot, "file layout does not match its slot");
        }
        tracing::info!(path = %path.display(), %slot, rows = preview.rows, "picked report");

        *self.source_mut(slot) = Some(Source {
            path: path.to_path_buf(),
            preview,
        });
        self.clear_results();
        self.active_slot = if self.source(slot.other()).is_none() {
            slot.other()
        } else {
            slot
        };
        Ok(slot)
    }

    /// Pick a file from the browser; runs the comparison once both slots are filled.
    pub(crate) fn pick_file(&mut self, path: &Path) {
        match self.set_source(path, None) {
            Ok(slot) => {
                let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("?");
                self.set_status(format!("{slot} report: {name}"));
                if self.burn.is_some() && self.invoices.is_some() {
                    self.run_comparison_or_report();
                }
            }
            Err(e) => self.set_status(format!("Error loading file: {e}")),
        }
    }

    pub(crate) fn clear_sources(&mut self) {
        self.burn = None;
        self.invoices = None;
        self.active_slot = ReportKind::Burn;
        self.clear_results();
    }

    /// Drop results that no longer belong to the picked sources.
    pub(crate) fn clear_results(&mut self) {
        self.results.clear();
        self.summary = Summary::default();
        self.result_cursor.top();
    }

    /// Read both picked reports and reconcile them into `results`.
    pub(crate) fn run_comparison(&mut self) -> Result<()> {
        let (Some(burn), Some(invoices)) = (&self.burn, &self.invoices) else {
            anyhow::bail!("Both a burn report and an invoice report are required");
        };
        let burn_bytes = std::fs::read(&burn.path)
            .with_context(|| format!("Failed to read {}", burn.path.display()))?;
        let invoice_bytes = std::fs::read(&invoices.path)
            .with_context(|| format!("Failed to read {}", invoices.path.display()))?;

        let records = pipeline::compare(&burn_bytes, &invoice_bytes, &self.settings.csv)?;
        self.summary = Summary::from_records(&records);
        self.results = records;
        self.result_cursor.top();
        self.screen = Screen::Results;
        self.set_status(format!(
            "Compared {} rows: {} OK, {} no invoice, {} burn > invoice, {} burn < invoice",
            self.summary.rows,
            self.summary.count(Comment::Ok),
            self.summary.count(Comment::NoInvoice),
            self.summary.count(Comment::BurnExceedsInvoice),
            self.summary.count(Comment::InvoiceExceedsBurn),
        ));
        Ok(())
    }

    pub(crate) fn run_comparison_or_report(&mut self) {
        if let Err(e) = self.run_comparison() {
            self.clear_results();
            tracing::warn!(error = %e, "comparison failed");
            self.set_status(format!("Comparison failed: {e}"));
        }
    }

    /// Indices into `results` that pass the current comment filter.
    pub(crate) fn visible_results(&self) -> Vec<usize> {
        self.results
            .iter()
            .enumerate()
            .filter(|(_, r)| self.result_filter.is_none_or(|c| r.comment == c))
            .map(|(i, _)| i)
            .collect()
    }

    pub(crate) fn set_result_filter(&mut self, filter: Option<Comment>) {
        self.result_filter = filter;
        self.result_cursor.top();
    }

    /// Cycle the filter: all → each comment in turn → all.
    pub(crate) fn cycle_result_filter(&mut self) {
        let all = Comment::all();
        let next = match self.result_filter {
            None => all.first().copied(),
            Some(current) => all
                .iter()
                .position(|c| *c == current)
                .and_then(|i| all.get(i + 1))
                .copied(),
        };
        self.set_result_filter(next);
    }

    pub(crate) fn default_export_path(&self) -> PathBuf {
        self.settings.export_dir.join(export::DEFAULT_FILE_NAME)
    }

    /// Write every result row (the filter is view-only) to `path`.
    pub(crate) fn export_results(&self, path: &Path) -> Result<usize> {
        if self.results.is_empty() {
            anyhow::bail!("Nothing to export: run a comparison first");
        }
        let bytes = export::write_csv(&self.results)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        std::fs::write(path, bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), rows = self.results.len(), "exported comparison");
        Ok(self.results.len())
    }

    pub(crate) fn refresh_file_browser(&mut self) {
        let mut entries: Vec<PathBuf> = Vec::new();

        if let Some(parent) = self.file_browser_path.parent() {
            entries.push(parent.to_path_buf());
        }

        if let Ok(read_dir) = std::fs::read_dir(&self.file_browser_path) {
            let is_hidden = |p: &PathBuf| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with('.'))
            };

            let (mut dirs, mut files): (Vec<PathBuf>, Vec<PathBuf>) = read_dir
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| {
                    (self.file_browser_show_hidden || !is_hidden(p))
                        && (p.is_dir() || is_report_file(p))
                })
                .partition(|p| p.is_dir());

            dirs.sort();
            files.sort();
            entries.extend(dirs);
            entries.extend(files);
        }

        self.file_browser_entries = entries;
        self.file_browser_cursor.top();
        self.file_browser_filter.clear();
        self.file_browser_input_focused = false;
    }

    /// Returns filtered file browser entries (indices into `file_browser_entries`).
    /// The `..` entry always passes.
    pub(crate) fn file_browser_filtered(&self) -> Vec<usize> {
        if self.file_browser_filter.is_empty() {
            return (0..self.file_browser_entries.len()).collect();
        }
        let filter = self.file_browser_filter.to_ascii_lowercase();
        self.file_browser_entries
            .iter()
            .enumerate()
            .filter(|(_, path)| {
                if Some(path.as_path()) == self.file_browser_path.parent() {
                    return true;
                }
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|name| name.to_ascii_lowercase().contains(&filter))
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// Open a directory or pick a file from the browser.
    pub(crate) fn open_browser_entry(&mut self, path: PathBuf) {
        if path.is_dir() {
            self.file_browser_path = path;
            self.refresh_file_browser();
        } else {
            self.pick_file(&path);
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

fn is_report_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| matches!(ext.to_ascii_lowercase().as_str(), "csv" | "tsv" | "txt"))
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
