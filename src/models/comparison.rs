use rust_decimal::Decimal;
use std::cmp::Ordering;

use super::BurnRecord;

/// Reconciliation state of one comparison row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comment {
    NoInvoice,
    Ok,
    BurnExceedsInvoice,
    InvoiceExceedsBurn,
}

impl Comment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoInvoice => "NO INVOICE",
            Self::Ok => "OK",
            Self::BurnExceedsInvoice => "BURN > INVOICE",
            Self::InvoiceExceedsBurn => "BURN < INVOICE",
        }
    }

    pub fn all() -> &'static [Comment] {
        &[
            Self::NoInvoice,
            Self::Ok,
            Self::BurnExceedsInvoice,
            Self::InvoiceExceedsBurn,
        ]
    }

    /// Accepts the rendered label as well as short aliases (`none`, `ok`, `over`, `under`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "no invoice" | "no-invoice" | "none" => Some(Self::NoInvoice),
            "ok" => Some(Self::Ok),
            "burn > invoice" | "over" | "burn" => Some(Self::BurnExceedsInvoice),
            "burn < invoice" | "under" | "invoice" => Some(Self::InvoiceExceedsBurn),
            _ => None,
        }
    }

    /// Classify a joined row from invoice presence and the pre-fill difference.
    ///
    /// Invoice presence wins over any numeric state. A missing difference makes
    /// every ordering comparison false, so it lands on `InvoiceExceedsBurn`.
    pub fn classify(has_invoice: bool, raw_difference: Option<Decimal>) -> Self {
        if !has_invoice {
            return Self::NoInvoice;
        }
        match raw_difference.map(|d| d.cmp(&Decimal::ZERO)) {
            Some(Ordering::Equal) => Self::Ok,
            Some(Ordering::Greater) => Self::BurnExceedsInvoice,
            Some(Ordering::Less) | None => Self::InvoiceExceedsBurn,
        }
    }
}

impl std::fmt::Display for Comment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One output row: a burn record joined with at most one invoice line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRecord {
    pub burn: BurnRecord,
    pub invoiced_amount: Decimal,
    pub difference: Option<Decimal>,
    pub comment: Comment,
}

impl ComparisonRecord {
    pub fn has_invoice(&self) -> bool {
        self.comment != Comment::NoInvoice
    }
}
