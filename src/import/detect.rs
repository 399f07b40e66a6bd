use crate::models::ReportKind;

/// Positional column layout of one input report.
///
/// Columns are identified by position only; the header text in the file is
/// never consulted beyond its width.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TableLayout {
    pub(crate) kind: ReportKind,
    pub(crate) columns: &'static [&'static str],
}

impl TableLayout {
    pub(crate) fn arity(&self) -> usize {
        self.columns.len()
    }

    pub(crate) fn for_kind(kind: ReportKind) -> &'static TableLayout {
        match kind {
            ReportKind::Burn => &BURN_LAYOUT,
            ReportKind::Invoice => &INVOICE_LAYOUT,
        }
    }
}

pub(crate) static BURN_LAYOUT: TableLayout = TableLayout {
    kind: ReportKind::Burn,
    columns: &[
        "Office",
        "Project Name",
        "Project Manager",
        "Account Manager",
        "Contractual Status",
        "Currency",
        "Time Burn (value)",
        "Expense Burn (value)",
        "Total Burn (value)",
    ],
};

pub(crate) static INVOICE_LAYOUT: TableLayout = TableLayout {
    kind: ReportKind::Invoice,
    columns: &[
        "Organisation",
        "Company",
        "Project Number",
        "Project",
        "Invoice #",
        "Reference",
        "Email Recipients",
        "Invoice Date",
        "AM (current)",
        "PM (current)",
        "PM (original)",
        "Status",
        "Due Date",
        "Payment Date",
        "Invoiced Amount",
        "Currency",
        "Tax Amount",
        "Invoiced Amount With Tax",
        "Converted Amount",
        "Converted Currency",
    ],
};

/// Guess which report a header row belongs to, by column count alone.
pub(crate) fn detect_report_kind(header: &[String]) -> Option<ReportKind> {
    ReportKind::all()
        .iter()
        .copied()
        .find(|kind| TableLayout::for_kind(*kind).arity() == header.len())
}

#[cfg(test)]
#[path = "detect_tests.rs"]
mod tests;
