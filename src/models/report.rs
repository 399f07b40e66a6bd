/// Which of the two input reports a table is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Burn,
    Invoice,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Burn => "Burn",
            Self::Invoice => "Invoice",
        }
    }

    pub fn all() -> &'static [ReportKind] {
        &[Self::Burn, Self::Invoice]
    }

    pub fn other(&self) -> Self {
        match self {
            Self::Burn => Self::Invoice,
            Self::Invoice => Self::Burn,
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
