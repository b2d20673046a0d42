//! Document date listing command implementation.

use super::SourceArgs;
use anyhow::Result;
use dailyprice::ingest::file_name;

/// Lists every candidate document with its resolved date or the parse error.
pub(crate) fn execute(args: &SourceArgs) -> Result<()> {
    let config = args.config();
    let loader = config.loader();
    let candidates = loader.candidates(&config.data_dir)?;

    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                    Document Dates                            ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("Directory: {}", config.data_dir.display());
    println!("Format:    {}", config.format);
    println!();

    let mut resolved = 0;
    for path in &candidates.documents {
        let name = file_name(path);
        match loader.resolver().resolve(&name) {
            Ok(date) => {
                resolved += 1;
                println!("  {:50} {}", name, date);
            }
            Err(e) => println!("  {:50} ERROR: {}", name, e),
        }
    }

    println!();
    println!(
        "{} of {} documents resolved, {} other files ignored",
        resolved,
        candidates.documents.len(),
        candidates.ignored.len()
    );

    Ok(())
}
