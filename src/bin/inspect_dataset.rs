use panganscraper::dataset::inspect::{read_parquet, summarize};
use std::{env, path::Path, process::exit};

fn main() {
    // Expect exactly one CLI argument: path to a dataset Parquet file.
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <DATASET.parquet>", args[0]);
        exit(1);
    }
    if let Err(e) = inspect(Path::new(&args[1])) {
        eprintln!("Error: {:#}", e);
        exit(1);
    }
}

fn inspect(path: &Path) -> anyhow::Result<()> {
    let batches = read_parquet(path)?;
    let stats = summarize(&batches)?;
    let size = std::fs::metadata(path)?.len();

    println!("=== Dataset: {} ===", path.display());
    println!("File-size on disk:    {} bytes", size);
    println!("Total rows:           {}", stats.rows);
    println!("Unresolved locations: {}", stats.unresolved);
    println!();

    println!("=== Columns ===");
    for name in &stats.columns {
        println!("- {}", name);
    }
    println!();

    println!("=== Rows per date ===");
    for (date, n) in &stats.by_date {
        println!("{:<12} {:>6}", date, n);
    }
    println!();

    println!("=== Rows per commodity ===");
    for (commodity, n) in &stats.by_commodity {
        println!("{:<30} {:>6}", commodity, n);
    }

    Ok(())
}
