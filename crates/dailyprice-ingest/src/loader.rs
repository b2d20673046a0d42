//! Loads every price-list document in a directory.
//!
//! Documents are processed independently, optionally in parallel. Results are
//! collected in file-name order and diagnostics are logged in that same order,
//! so repeated runs over the same directory produce identical output.

use crate::assemble::{AssemblyStats, RecordAssembler};
use crate::filename::{DateResolver, file_name};
use dailyprice_traits::{DailyPriceError, Date, DocumentExtractor, RawRecord, Result};
use rayon::prelude::*;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Files found in the source directory, split by whether the extractor reads
/// them. Both lists are sorted by file name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidates {
    /// Files with a supported extension.
    pub documents: Vec<PathBuf>,
    /// Other files.
    pub ignored: Vec<PathBuf>,
}

/// Summary of one successfully loaded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSummary {
    /// File name.
    pub file: String,
    /// Date resolved from the file name.
    pub date: Date,
    /// Row counts from assembly.
    pub stats: AssemblyStats,
}

/// Everything read from one directory.
#[derive(Debug, Default)]
pub struct Batch {
    /// Loaded documents, in file-name order.
    pub documents: Vec<DocumentSummary>,
    /// Per-document failures, in file-name order.
    pub failures: Vec<DailyPriceError>,
    /// Files skipped for an unsupported extension.
    pub ignored: usize,
    /// Records of every loaded document, concatenated in file-name order.
    pub records: Vec<RawRecord>,
}

impl Batch {
    /// Row counts summed over every loaded document.
    pub fn stats(&self) -> AssemblyStats {
        let mut total = AssemblyStats::default();
        for doc in &self.documents {
            total += doc.stats;
        }
        total
    }

    /// Number of candidate documents, loaded or failed.
    pub fn attempted(&self) -> usize {
        self.documents.len() + self.failures.len()
    }
}

struct Loaded {
    summary: DocumentSummary,
    records: Vec<RawRecord>,
}

/// Reads a directory of documents through a [`DocumentExtractor`].
pub struct BatchLoader {
    extractor: Box<dyn DocumentExtractor>,
    resolver: DateResolver,
    assembler: RecordAssembler,
    parallel: bool,
}

impl BatchLoader {
    /// Loader using `extractor` with the default resolver and assembler.
    pub fn new(extractor: Box<dyn DocumentExtractor>) -> Self {
        Self {
            extractor,
            resolver: DateResolver::default(),
            assembler: RecordAssembler::default(),
            parallel: true,
        }
    }

    /// Replaces the filename date resolver.
    #[must_use]
    pub fn with_resolver(mut self, resolver: DateResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Replaces the record assembler.
    #[must_use]
    pub fn with_assembler(mut self, assembler: RecordAssembler) -> Self {
        self.assembler = assembler;
        self
    }

    /// Enables or disables parallel extraction.
    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// The filename date resolver.
    pub const fn resolver(&self) -> &DateResolver {
        &self.resolver
    }

    /// Lists the files of `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`DailyPriceError::SourceMissing`] if `dir` is not a directory,
    /// or an I/O error if it cannot be read.
    pub fn candidates(&self, dir: &Path) -> Result<Candidates> {
        if !dir.is_dir() {
            return Err(DailyPriceError::SourceMissing(dir.to_path_buf()));
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() {
                files.push(path);
            }
        }
        files.sort_by_key(|path| file_name(path));

        let (documents, ignored): (Vec<PathBuf>, Vec<PathBuf>) = files
            .into_iter()
            .partition(|path| self.extractor.supports(path));

        Ok(Candidates { documents, ignored })
    }

    /// Loads every supported document in `dir`.
    ///
    /// Documents whose name has no valid date or that fail extraction are
    /// logged and recorded in [`Batch::failures`]; they never fail the batch.
    ///
    /// # Errors
    ///
    /// Only directory-level failures are returned, see
    /// [`candidates`](Self::candidates).
    pub fn load_dir(&self, dir: &Path) -> Result<Batch> {
        let candidates = self.candidates(dir)?;
        info!(
            dir = %dir.display(),
            documents = candidates.documents.len(),
            ignored = candidates.ignored.len(),
            extractor = self.extractor.name(),
            "scanning source directory"
        );

        let results: Vec<Result<Loaded>> = if self.parallel {
            candidates
                .documents
                .par_iter()
                .map(|path| self.load_document(path))
                .collect()
        } else {
            candidates
                .documents
                .iter()
                .map(|path| self.load_document(path))
                .collect()
        };

        let mut batch = Batch {
            ignored: candidates.ignored.len(),
            ..Batch::default()
        };

        for result in results {
            match result {
                Ok(loaded) => {
                    info!(
                        file = %loaded.summary.file,
                        date = %loaded.summary.date,
                        rows = loaded.records.len(),
                        "processed document"
                    );
                    debug!(file = %loaded.summary.file, stats = ?loaded.summary.stats, "assembly counts");
                    batch.records.extend(loaded.records);
                    batch.documents.push(loaded.summary);
                }
                Err(err) => {
                    warn!(file = err.file().unwrap_or("?"), error = %err, "skipping document");
                    batch.failures.push(err);
                }
            }
        }

        Ok(batch)
    }

    fn load_document(&self, path: &Path) -> Result<Loaded> {
        let file = file_name(path);
        let date = self.resolver.resolve(&file)?;

        let pages = self.extractor.extract(path).map_err(|err| {
            if err.is_per_document() {
                err
            } else {
                DailyPriceError::extraction(&file, err)
            }
        })?;

        let doc = self.assembler.assemble(&pages, date);
        Ok(Loaded {
            summary: DocumentSummary {
                file,
                date,
                stats: doc.stats,
            },
            records: doc.records,
        })
    }
}

impl fmt::Debug for BatchLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchLoader")
            .field("extractor", &self.extractor.name())
            .field("resolver", &self.resolver)
            .field("assembler", &self.assembler)
            .field("parallel", &self.parallel)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::CsvExtractor;
    use std::fs;
    use tempfile::TempDir;

    const HEADER: &str = "S/N,Symbol,P_Close,Open,High,Low,Close,Change,%,Deals,Volume,Value,VWAP";

    fn write_list(dir: &Path, name: &str, rows: &[&str]) {
        let mut text = String::from(HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text.push('\n');
        fs::write(dir.join(name), text).unwrap();
    }

    fn loader() -> BatchLoader {
        BatchLoader::new(Box::new(CsvExtractor::default()))
    }

    #[test]
    fn test_load_dir_concatenates_in_name_order() {
        let dir = TempDir::new().unwrap();
        write_list(
            dir.path(),
            "DAILY_PRICE_LIST_May_21_2024.csv",
            &["1,ABC,10,10,11,10,11.00,1,10,5,\"2,000\",22000,11"],
        );
        write_list(
            dir.path(),
            "DAILY_PRICE_LIST_May_20_2024.csv",
            &["1,ABC,9,9,10,9,10.00,1,11,4,\"1,000\",10000,10"],
        );

        let batch = loader().load_dir(dir.path()).unwrap();

        assert_eq!(batch.documents.len(), 2);
        assert!(batch.failures.is_empty());
        // "May_20" sorts before "May_21"
        assert_eq!(batch.records[0].date, "2024-05-20");
        assert_eq!(batch.records[1].date, "2024-05-21");
        assert_eq!(batch.stats().records, 2);
    }

    #[test]
    fn test_load_dir_skips_bad_name() {
        let dir = TempDir::new().unwrap();
        write_list(
            dir.path(),
            "DAILY_PRICE_LIST_May_20_2024.csv",
            &["1,ABC,9,9,10,9,10.00,1,11,4,\"1,000\",10000,10"],
        );
        write_list(
            dir.path(),
            "DAILY_PRICE_LIST_latest.csv",
            &["1,XYZ,9,9,10,9,10.00,1,11,4,100,1000,10"],
        );

        let batch = loader().with_parallel(false).load_dir(dir.path()).unwrap();

        assert_eq!(batch.documents.len(), 1);
        assert_eq!(batch.failures.len(), 1);
        assert_eq!(batch.failures[0].file(), Some("DAILY_PRICE_LIST_latest.csv"));
        assert_eq!(batch.attempted(), 2);
        assert!(batch.records.iter().all(|r| r.symbol == "ABC"));
    }

    #[test]
    fn test_candidates_split_by_extension() {
        let dir = TempDir::new().unwrap();
        write_list(dir.path(), "DAILY_PRICE_LIST_May_20_2024.csv", &[]);
        fs::write(dir.path().join("DAILY_PRICE_LIST_May_20_2024.pdf"), b"%PDF").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let candidates = loader().candidates(dir.path()).unwrap();

        assert_eq!(candidates.documents.len(), 1);
        assert_eq!(candidates.ignored.len(), 1);
    }

    #[test]
    fn test_missing_directory_is_fatal() {
        let err = loader()
            .load_dir(Path::new("/nonexistent/stock_files"))
            .unwrap_err();
        assert!(matches!(err, DailyPriceError::SourceMissing(_)));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let dir = TempDir::new().unwrap();
        for day in 20..28 {
            write_list(
                dir.path(),
                &format!("DAILY_PRICE_LIST_May_{day}_2024.csv"),
                &[&format!("1,ABC,9,9,10,9,{day}.00,1,11,4,100,1000,10")],
            );
        }

        let parallel = loader().load_dir(dir.path()).unwrap();
        let sequential = loader().with_parallel(false).load_dir(dir.path()).unwrap();

        assert_eq!(parallel.records, sequential.records);
        assert_eq!(parallel.documents, sequential.documents);
    }
}
