use std::path::PathBuf;

use crate::import::CsvOptions;

pub(crate) const ENV_DELIMITER: &str = "BURNRECON_DELIMITER";
pub(crate) const ENV_EXPORT_DIR: &str = "BURNRECON_EXPORT_DIR";
pub(crate) const ENV_LOG: &str = "BURNRECON_LOG";
pub(crate) const ENV_LOG_FILE: &str = "BURNRECON_LOG_FILE";

/// Runtime settings, read from the environment once at startup.
#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) csv: CsvOptions,
    pub(crate) export_dir: PathBuf,
    pub(crate) log_filter: Option<String>,
    pub(crate) log_file: Option<PathBuf>,
    /// Problems found while reading settings, reported once logging is up.
    pub(crate) warnings: Vec<String>,
}

impl Settings {
    pub(crate) fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let mut warnings = Vec::new();

        let csv = match get(ENV_DELIMITER) {
            Some(raw) => match parse_delimiter(&raw) {
                Some(delimiter) => CsvOptions { delimiter },
                None => {
                    warnings.push(format!(
                        "Ignoring {ENV_DELIMITER}={raw:?}: expected a single ASCII character"
                    ));
                    CsvOptions::default()
                }
            },
            None => CsvOptions::default(),
        };

        let export_dir = get(ENV_EXPORT_DIR)
            .filter(|s| !s.trim().is_empty())
            .map(|s| PathBuf::from(crate::run::shellexpand(&s)))
            .unwrap_or_else(default_export_dir);

        let log_filter = get(ENV_LOG).filter(|s| !s.trim().is_empty());

        let log_file = get(ENV_LOG_FILE)
            .filter(|s| !s.trim().is_empty())
            .map(|s| PathBuf::from(crate::run::shellexpand(&s)))
            .or_else(default_log_file);

        Self {
            csv,
            export_dir,
            log_filter,
            log_file,
            warnings,
        }
    }
}

fn parse_delimiter(raw: &str) -> Option<u8> {
    match raw {
        "\\t" | "tab" | "\t" => Some(b'\t'),
        _ => {
            let mut bytes = raw.bytes();
            match (bytes.next(), bytes.next()) {
                (Some(b), None) if b.is_ascii() && b != b'"' && b != b'\n' => Some(b),
                _ => None,
            }
        }
    }
}

fn default_export_dir() -> PathBuf {
    directories::UserDirs::new()
        .and_then(|d| {
            d.download_dir()
                .map(|p| p.to_path_buf())
                .or_else(|| Some(d.home_dir().to_path_buf()))
        })
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn default_log_file() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "burnrecon", "burnrecon")
        .map(|dirs| dirs.data_local_dir().join("burnrecon.log"))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
