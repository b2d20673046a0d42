//! Console report printed after a run.

use dailyprice::store::{HistoryWrite, RANKING_LIMIT, SinkReport};
use dailyprice::{AggregateRow, DailyPriceError, NoData, RunSummary, Written};

const WIDTH: usize = 62;

/// Boxed section title.
fn banner(title: &str) -> String {
    let pad = WIDTH.saturating_sub(title.chars().count());
    let left = pad / 2;
    format!(
        "╔{line}╗\n║{}{title}{}║\n╚{line}╝",
        " ".repeat(left),
        " ".repeat(pad - left),
        line = "═".repeat(WIDTH),
    )
}

/// Correlation with two decimals, or `n/a` when undefined.
fn format_correlation(correlation: Option<f64>) -> String {
    correlation.map_or_else(|| "n/a".to_string(), |r| format!("{:.2}", r))
}

fn print_rows(rows: &[AggregateRow]) {
    println!("  {:<12} {:>18} {:>14}", "Symbol", "Total Volume", "Mean Close");
    println!("  {}", "-".repeat(46));
    for row in rows {
        println!(
            "  {:<12} {:>18} {:>14.4}",
            row.symbol, row.total_volume, row.mean_close
        );
    }
    println!();
}

/// The only line printed when a run writes nothing.
pub(crate) fn no_data(reason: NoData) -> String {
    format!("{}. No analysis performed.", reason)
}

/// Prints the skipped documents.
pub(crate) fn failures(failures: &[DailyPriceError]) {
    for failure in failures {
        println!(
            "Error processing {}: {}",
            failure.file().unwrap_or("document"),
            failure
        );
    }
}

/// Prints the aggregate analysis and the latest cumulative returns.
pub(crate) fn analysis(written: &Written, top: usize) {
    let aggregates = &written.aggregates;

    println!("\n{}\n", banner("Combined Analysis (Top by Volume)"));
    print_rows(aggregates.top_by_volume(top));

    println!(
        "Correlation between total volume and average close price: {}\n",
        format_correlation(aggregates.correlation)
    );

    println!("Top {} symbols by total volume:", RANKING_LIMIT);
    print_rows(aggregates.top_by_volume(RANKING_LIMIT));

    println!("Bottom {} symbols by total volume:", RANKING_LIMIT);
    print_rows(&aggregates.bottom_by_volume(RANKING_LIMIT));

    println!("\n{}\n", banner("Cumulative Return"));
    println!(
        "  {:<12} {:>6} {:>12} {:>12}  {}",
        "Symbol", "Days", "Close", "Return %", "Last Date"
    );
    println!("  {}", "-".repeat(60));
    for series in written.corpus.series() {
        if let Some(last) = series.last() {
            println!(
                "  {:<12} {:>6} {:>12.4} {:>12.2}  {}",
                last.symbol(),
                last.day,
                last.record.close,
                last.cumulative_return,
                last.record.date
            );
        }
    }
    println!();
}

/// Prints where the corpus was saved.
pub(crate) fn saved(sink: &SinkReport) {
    println!("Full processed data saved to '{}'", sink.snapshot.display());
    match sink.history_write {
        HistoryWrite::Created => {
            println!("Created and saved data to '{}'", sink.history.display());
        }
        HistoryWrite::Appended => {
            println!("Appended data to '{}'", sink.history.display());
        }
    }
}

/// Prints the run counts.
pub(crate) fn summary(summary: &RunSummary) {
    let assembly = &summary.assembly;
    let cleaning = &summary.cleaning;

    println!("\n{}\n", banner("Run Summary"));
    println!("Documents found:      {}", summary.documents_found);
    println!("Documents processed:  {}", summary.documents_processed);
    println!("Documents skipped:    {}", summary.documents_skipped);
    println!("Other files ignored:  {}", summary.files_ignored);
    println!();
    println!("Raw table rows:       {}", assembly.raw_rows());
    println!("  header rows:        {}", assembly.header_rows);
    println!("  footer rows:        {}", assembly.footer_rows);
    println!("  malformed rows:     {}", assembly.malformed_rows);
    println!("Rows dropped:         {}", cleaning.rows_dropped());
    println!("  missing symbol:     {}", cleaning.missing_symbol);
    println!("  missing close:      {}", cleaning.missing_close);
    println!("  missing volume:     {}", cleaning.missing_volume);
    println!("  missing date:       {}", cleaning.missing_date);
    println!("Clean rows:           {}", summary.clean_rows());
    println!("Symbols:              {}", summary.symbols);
    if let Some(mode) = summary.history_write {
        let mode = match mode {
            HistoryWrite::Created => "created",
            HistoryWrite::Appended => "appended",
        };
        println!("History:              {}", mode);
    }
    println!();
}
