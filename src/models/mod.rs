mod burn;
mod comparison;
mod invoice;
mod report;

pub use burn::BurnRecord;
pub use comparison::{Comment, ComparisonRecord};
pub use invoice::InvoiceRecord;
pub use report::ReportKind;
