use crate::models::ReportKind;

/// Failures surfaced by the reconciliation core.
///
/// Only table-shape and decoding problems are fatal; malformed cells degrade
/// to missing values and never show up here.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ReconcileError {
    #[error("{kind} report is empty (expected a header row with {expected} columns)")]
    Empty { kind: ReportKind, expected: usize },

    #[error("{kind} report has {found} columns, expected {expected}")]
    HeaderArity {
        kind: ReportKind,
        expected: usize,
        found: usize,
    },

    #[error("{kind} report row {row} has {found} fields, expected at most {expected}")]
    RowArity {
        kind: ReportKind,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("failed to read {kind} report")]
    Read {
        kind: ReportKind,
        #[source]
        err: csv::Error,
    },

    #[error("failed to write comparison table")]
    Write(#[from] csv::Error),

    #[error("failed to flush comparison table")]
    Flush(#[from] std::io::Error),
}

impl ReconcileError {
    /// The report whose shape or encoding was rejected, if any.
    pub(crate) fn kind(&self) -> Option<ReportKind> {
        match self {
            Self::Empty { kind, .. }
            | Self::HeaderArity { kind, .. }
            | Self::RowArity { kind, .. }
            | Self::Read { kind, .. } => Some(*kind),
            Self::Write(_) | Self::Flush(_) => None,
        }
    }
}
