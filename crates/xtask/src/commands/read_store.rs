//! Read and inspect a persisted bundle store
//!
//! Deserializes a `FileBundleStore` file and displays its slot flags.

use std::path::PathBuf;

use anyhow::{Context, Result};
use bundle_runtime::{FileBundleStore, StoreTable};
use clap::Parser;
use console::style;

use crate::dirs;

/// Read and inspect a bundle store file
#[derive(Parser)]
pub struct ReadStore {
    /// Store file to read (defaults to `<data dir>/bundles.bin`)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// One line per bundle with its slot flags
    Summary,
    /// Full JSON output
    Json,
}

impl ReadStore {
    pub fn execute(self) -> Result<()> {
        let file = self.file.unwrap_or_else(dirs::store_file);

        if !file.exists() {
            anyhow::bail!("Store file not found: {}", file.display());
        }

        let bytes = std::fs::metadata(&file)
            .with_context(|| format!("Failed to stat store file: {}", file.display()))?
            .len();
        let table = FileBundleStore::load_table(&file)
            .with_context(|| format!("Failed to read store file: {}", file.display()))?;

        match self.format {
            OutputFormat::Summary => {
                println!("{} {}", style("Store File:").bold().cyan(), file.display());
                println!("{} {}", style("File Size:").bold().cyan(), format_bytes(bytes));
                println!();
                print_summary(&table)?;
            }
            OutputFormat::Json => print_json(&table)?,
        }

        Ok(())
    }
}

fn print_summary(table: &StoreTable) -> Result<()> {
    println!("{}", style("=== Bundle Store Summary ===").bold().green());
    println!();

    if table.is_empty() {
        println!("  (no bundles registered)");
        return Ok(());
    }

    for (bundle, flags) in table.records() {
        let filled = flags.iter().filter(|flag| **flag).count();
        let slots: String = flags.iter().map(|&flag| if flag { '■' } else { '□' }).collect();
        let claimed = if table.is_claimed(bundle)? {
            style("reward claimed").green().to_string()
        } else {
            style("reward unclaimed").dim().to_string()
        };

        let completed = if table.is_marked_complete(bundle) {
            format!(", {}", style("completed").green())
        } else {
            String::new()
        };

        println!(
            "  {} {} {}/{} filled, {}{}",
            style(bundle).bold(),
            slots,
            filled,
            flags.len(),
            claimed,
            completed
        );
    }
    println!();

    let milestones: Vec<String> = table.milestones().map(|count| count.to_string()).collect();
    if !milestones.is_empty() {
        println!(
            "{} {}",
            style("Milestones announced:").bold().cyan(),
            milestones.join(", ")
        );
    }

    Ok(())
}

fn print_json(table: &StoreTable) -> Result<()> {
    let json =
        serde_json::to_string_pretty(table).context("Failed to serialize store to JSON")?;
    println!("{}", json);
    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
