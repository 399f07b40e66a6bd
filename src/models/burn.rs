use rust_decimal::Decimal;

/// One project row from the monthly burn report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BurnRecord {
    pub office: String,
    pub project_number: String,
    pub project_description: Option<String>,
    pub project_manager: String,
    pub account_manager: String,
    pub contractual_status: String,
    pub currency: String,
    pub time_burn: Option<Decimal>,
    pub expense_burn: Option<Decimal>,
    pub total_burn: Option<Decimal>,
}

impl BurnRecord {
    /// Split a raw "Project Name" cell into project number and description.
    ///
    /// The number is the first whitespace-delimited token; the description is
    /// whatever follows the first whitespace run, if anything does.
    pub fn split_project_name(raw: &str) -> (String, Option<String>) {
        let trimmed = raw.trim_start();
        match trimmed.split_once(char::is_whitespace) {
            Some((number, rest)) => {
                let rest = rest.trim_start();
                let description = (!rest.is_empty()).then(|| rest.to_string());
                (number.to_string(), description)
            }
            None => (trimmed.to_string(), None),
        }
    }
}
