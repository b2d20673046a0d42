//! Snapshot and history CSV files.

use dailyprice_traits::{Corpus, DailyPriceError, Result, columns};
use polars::prelude::*;
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Default snapshot file.
pub const DEFAULT_SNAPSHOT: &str = "output.csv";

/// Default history file.
pub const DEFAULT_HISTORY: &str = "stock_history.csv";

/// Header line shared by the snapshot and history files.
pub fn history_header() -> String {
    columns::ALL.join(",")
}

/// How the history file was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryWrite {
    /// The file was absent or empty and was written with a header.
    Created,
    /// Rows were appended below the existing header.
    Appended,
}

/// Outcome of [`Sink::write`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SinkReport {
    /// Snapshot location.
    pub snapshot: PathBuf,
    /// History location.
    pub history: PathBuf,
    /// Rows written to each file.
    pub rows: usize,
    /// How the history file was written.
    pub history_write: HistoryWrite,
}

/// Writes the derived corpus to the snapshot and history files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sink {
    snapshot: PathBuf,
    history: PathBuf,
}

impl Default for Sink {
    fn default() -> Self {
        Self::new(DEFAULT_SNAPSHOT, DEFAULT_HISTORY)
    }
}

impl Sink {
    /// Sink writing to `snapshot` and `history`.
    pub fn new(snapshot: impl Into<PathBuf>, history: impl Into<PathBuf>) -> Self {
        Self {
            snapshot: snapshot.into(),
            history: history.into(),
        }
    }

    /// Snapshot location.
    pub fn snapshot(&self) -> &Path {
        &self.snapshot
    }

    /// History location.
    pub fn history(&self) -> &Path {
        &self.history
    }

    /// Writes `corpus` to both files.
    ///
    /// The snapshot is replaced. The history file is created with a header
    /// when absent, otherwise the rows are appended below the existing header
    /// without any de-duplication. The history header is checked before the
    /// snapshot is touched, so a mismatch leaves both files as they were.
    ///
    /// # Errors
    ///
    /// Returns [`DailyPriceError::HistorySchema`] if the existing history
    /// header differs from [`history_header`], and I/O or Polars errors if a
    /// file cannot be written.
    pub fn write(&self, corpus: &Corpus) -> Result<SinkReport> {
        let history_write = self.check_history()?;
        let mut frame = corpus.to_frame()?;

        create_parent(&self.snapshot)?;
        let mut snapshot = File::create(&self.snapshot)?;
        CsvWriter::new(&mut snapshot)
            .include_header(true)
            .finish(&mut frame)?;

        create_parent(&self.history)?;
        match history_write {
            HistoryWrite::Created => {
                let mut history = File::create(&self.history)?;
                CsvWriter::new(&mut history)
                    .include_header(true)
                    .finish(&mut frame)?;
            }
            HistoryWrite::Appended => {
                let mut history = OpenOptions::new().read(true).append(true).open(&self.history)?;
                if !ends_with_newline(&mut history)? {
                    history.write_all(b"\n")?;
                }
                CsvWriter::new(&mut history)
                    .include_header(false)
                    .finish(&mut frame)?;
            }
        }

        info!(
            snapshot = %self.snapshot.display(),
            history = %self.history.display(),
            rows = corpus.len(),
            mode = ?history_write,
            "wrote corpus"
        );

        Ok(SinkReport {
            snapshot: self.snapshot.clone(),
            history: self.history.clone(),
            rows: corpus.len(),
            history_write,
        })
    }

    fn check_history(&self) -> Result<HistoryWrite> {
        let file = match File::open(&self.history) {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(HistoryWrite::Created);
            }
            Err(err) => return Err(err.into()),
        };

        let mut first = String::new();
        BufReader::new(file).read_line(&mut first)?;
        let found = first.trim_end_matches(['\r', '\n']);
        if found.is_empty() {
            return Ok(HistoryWrite::Created);
        }

        let expected = history_header();
        if found != expected {
            return Err(DailyPriceError::HistorySchema {
                path: self.history.clone(),
                found: found.to_string(),
                expected,
            });
        }
        Ok(HistoryWrite::Appended)
    }
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn ends_with_newline(file: &mut File) -> Result<bool> {
    if file.seek(SeekFrom::End(0))? == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dailyprice_traits::{CleanRecord, DerivedRecord};
    use tempfile::TempDir;

    fn corpus() -> Corpus {
        let first = CleanRecord {
            symbol: "ABC".to_string(),
            close: 10.0,
            volume: 1000,
            date: NaiveDate::from_ymd_opt(2024, 5, 20).unwrap(),
        };
        let second = CleanRecord {
            close: 11.0,
            volume: 2000,
            date: NaiveDate::from_ymd_opt(2024, 5, 21).unwrap(),
            ..first.clone()
        };
        Corpus::new(vec![
            DerivedRecord {
                record: first,
                day: 1,
                pct_change: None,
                growth: 1.0,
                cumulative_return: 0.0,
            },
            DerivedRecord {
                record: second,
                day: 2,
                pct_change: Some(10.0),
                growth: 1.1,
                cumulative_return: 10.0,
            },
        ])
    }

    fn lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_first_run_creates_both_files() {
        let dir = TempDir::new().unwrap();
        let sink = Sink::new(dir.path().join("output.csv"), dir.path().join("history.csv"));

        let report = sink.write(&corpus()).unwrap();

        assert_eq!(report.rows, 2);
        assert_eq!(report.history_write, HistoryWrite::Created);

        let snapshot = lines(sink.snapshot());
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot[0], history_header());
        assert!(snapshot[1].starts_with("ABC,"));
        assert!(snapshot[1].contains("2024-05-20"));
        assert_eq!(lines(sink.history()), snapshot);
    }

    #[test]
    fn test_second_run_appends_history_and_replaces_snapshot() {
        let dir = TempDir::new().unwrap();
        let sink = Sink::new(dir.path().join("output.csv"), dir.path().join("history.csv"));

        sink.write(&corpus()).unwrap();
        let report = sink.write(&corpus()).unwrap();

        assert_eq!(report.history_write, HistoryWrite::Appended);
        assert_eq!(lines(sink.snapshot()).len(), 3);

        let history = lines(sink.history());
        assert_eq!(history.len(), 5);
        assert_eq!(history.iter().filter(|l| **l == history_header()).count(), 1);
    }

    #[test]
    fn test_append_after_missing_trailing_newline() {
        let dir = TempDir::new().unwrap();
        let history = dir.path().join("history.csv");
        fs::write(&history, format!("{}\nOLD,1.0,1,2024-05-17,1,,1.0,0.0", history_header()))
            .unwrap();

        let sink = Sink::new(dir.path().join("output.csv"), &history);
        sink.write(&corpus()).unwrap();

        let rows = lines(&history);
        assert_eq!(rows.len(), 4);
        assert!(rows[1].starts_with("OLD,"));
        assert!(rows[2].starts_with("ABC,"));
    }

    #[test]
    fn test_header_mismatch_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let history = dir.path().join("history.csv");
        fs::write(&history, "Symbol,Close\nABC,1.0\n").unwrap();

        let sink = Sink::new(dir.path().join("output.csv"), &history);
        let err = sink.write(&corpus()).unwrap_err();

        assert!(matches!(err, DailyPriceError::HistorySchema { .. }));
        assert!(!sink.snapshot().exists());
        assert_eq!(fs::read_to_string(&history).unwrap(), "Symbol,Close\nABC,1.0\n");
    }

    #[test]
    fn test_empty_history_file_gets_header() {
        let dir = TempDir::new().unwrap();
        let history = dir.path().join("history.csv");
        fs::write(&history, "").unwrap();

        let sink = Sink::new(dir.path().join("output.csv"), &history);
        let report = sink.write(&corpus()).unwrap();

        assert_eq!(report.history_write, HistoryWrite::Created);
        assert_eq!(lines(&history)[0], history_header());
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let sink = Sink::new(
            dir.path().join("out/snap/output.csv"),
            dir.path().join("out/hist/history.csv"),
        );

        sink.write(&corpus()).unwrap();

        assert!(sink.snapshot().is_file());
        assert!(sink.history().is_file());
    }
}
