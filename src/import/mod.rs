mod csv_import;
mod detect;

pub(crate) use csv_import::{CsvImporter, CsvOptions, ReportPreview};
pub(crate) use detect::TableLayout;
