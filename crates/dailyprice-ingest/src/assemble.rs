//! Turns the pages of one document into [`RawRecord`]s.

use dailyprice_traits::{Date, Page, RawRecord};
use serde::Serialize;

/// Text printed in the exchange banner rows that some tables pick up.
pub const DEFAULT_FOOTER_MARKER: &str = "NIGERIAN EXCHANGE";

/// Row counts for one assembled document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AssemblyStats {
    /// Pages returned by the extractor.
    pub pages: usize,
    /// Pages that carried a table.
    pub tables: usize,
    /// Header rows skipped, one per non-empty table.
    pub header_rows: usize,
    /// Rows dropped because they contain the footer marker.
    pub footer_rows: usize,
    /// Rows dropped because their width is not the price-list width.
    pub malformed_rows: usize,
    /// Rows kept as records.
    pub records: usize,
}

impl AssemblyStats {
    /// Every table row seen, headers included.
    pub const fn raw_rows(&self) -> usize {
        self.header_rows + self.footer_rows + self.malformed_rows + self.records
    }
}

impl std::ops::AddAssign for AssemblyStats {
    fn add_assign(&mut self, other: Self) {
        self.pages += other.pages;
        self.tables += other.tables;
        self.header_rows += other.header_rows;
        self.footer_rows += other.footer_rows;
        self.malformed_rows += other.malformed_rows;
        self.records += other.records;
    }
}

/// Records of one document plus what was discarded on the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssembledDocument {
    /// Kept rows, in page then row order.
    pub records: Vec<RawRecord>,
    /// Row counts.
    pub stats: AssemblyStats,
}

/// Merges the table rows of every page of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordAssembler {
    footer_marker: String,
}

impl RecordAssembler {
    /// Assembler that drops rows containing `footer_marker`.
    ///
    /// An empty marker disables the footer filter.
    pub fn new(footer_marker: impl Into<String>) -> Self {
        Self {
            footer_marker: footer_marker.into(),
        }
    }

    /// The footer marker text.
    pub fn footer_marker(&self) -> &str {
        &self.footer_marker
    }

    /// Assembles the pages of one document dated `date`.
    ///
    /// For every page with a table the first row is skipped as the header.
    /// Each remaining row gets the ISO date appended as a trailing cell, is
    /// dropped if its concatenated cells contain the footer marker, and is
    /// dropped if it does not have the price-list width.
    pub fn assemble(&self, pages: &[Page], date: Date) -> AssembledDocument {
        let stamp = date.format("%Y-%m-%d").to_string();
        let mut doc = AssembledDocument::default();
        doc.stats.pages = pages.len();

        for table in pages.iter().filter_map(|page| page.table.as_ref()) {
            doc.stats.tables += 1;

            let Some((_header, rows)) = table.split_first() else {
                continue;
            };
            doc.stats.header_rows += 1;

            for row in rows {
                let mut row = row.clone();
                row.push(stamp.clone());

                if self.is_footer(&row) {
                    doc.stats.footer_rows += 1;
                    continue;
                }

                match RawRecord::from_row(row) {
                    Some(record) => doc.records.push(record),
                    None => doc.stats.malformed_rows += 1,
                }
            }
        }

        doc.stats.records = doc.records.len();
        doc
    }

    fn is_footer(&self, row: &[String]) -> bool {
        !self.footer_marker.is_empty() && row.concat().contains(&self.footer_marker)
    }
}

impl Default for RecordAssembler {
    fn default() -> Self {
        Self::new(DEFAULT_FOOTER_MARKER)
    }
}
