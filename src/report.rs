use crate::app_dirs::AppDirs;
use crate::session::{SessionConfig, SessionResult};
use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// Result sink invoked exactly once per completed session. The engine has
/// no retry or failure-handling obligation toward it; a failed report does
/// not affect the already-completed session state.
pub trait Reporter {
    fn report(&self, result: &SessionResult, config: &SessionConfig) -> io::Result<()>;
}

/// Appends one dated row per completed session to a CSV practice log.
#[derive(Debug, Clone)]
pub struct CsvReporter {
    path: PathBuf,
}

impl CsvReporter {
    pub fn new() -> Option<Self> {
        AppDirs::log_path().map(|path| Self { path })
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Reporter for CsvReporter {
    fn report(&self, result: &SessionResult, config: &SessionConfig) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // If the log doesn't exist yet, we need to emit a header
        let needs_header = !self.path.exists();

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if needs_header {
            writer
                .write_record([
                    "date",
                    "language",
                    "category",
                    "accuracy",
                    "speed",
                    "wpm",
                    "elapsed_secs",
                    "key_presses",
                ])
                .map_err(io::Error::other)?;
        }

        writer
            .write_record([
                Local::now().format("%c").to_string(),
                config.language.to_string().to_lowercase(),
                config.category.clone(),
                format!("{}", result.accuracy_percent),
                format!("{}", result.speed),
                format!("{}", result.words_per_minute),
                format!("{:.2}", result.elapsed_seconds),
                format!("{}", result.total_key_presses),
            ])
            .map_err(io::Error::other)?;

        writer.flush()
    }
}

/// Sink that swallows results; used by tests and headless drives.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&self, _result: &SessionResult, _config: &SessionConfig) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_result() -> SessionResult {
        SessionResult {
            accuracy_percent: 96.0,
            speed: 210.0,
            words_per_minute: 42.0,
            elapsed_seconds: 73.5,
            total_key_presses: 312,
        }
    }

    #[test]
    fn test_report_writes_header_then_row() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.csv");
        let reporter = CsvReporter::with_path(&path);

        reporter
            .report(&sample_result(), &SessionConfig::default())
            .unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("date,language,category"));
        assert!(lines[1].contains("korean"));
        assert!(lines[1].contains("home-row"));
        assert!(lines[1].contains("96"));
    }

    #[test]
    fn test_report_appends_without_second_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.csv");
        let reporter = CsvReporter::with_path(&path);
        let config = SessionConfig::default();

        reporter.report(&sample_result(), &config).unwrap();
        reporter.report(&sample_result(), &config).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 3);
        assert_eq!(contents.matches("date,").count(), 1);
    }

    #[test]
    fn test_report_creates_missing_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("state").join("log.csv");
        let reporter = CsvReporter::with_path(&path);

        reporter
            .report(&sample_result(), &SessionConfig::default())
            .unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_null_reporter_is_silent() {
        assert!(NullReporter
            .report(&sample_result(), &SessionConfig::default())
            .is_ok());
    }
}
