//! Quote every client in a batch CSV
//!
//! Writes one output row per client: the quote plus the three tier prices

use anyhow::{Context, Result};
use atlas_pricing::assumptions::loader::DEFAULT_DATA_PATH;
use atlas_pricing::client::load_clients;
use atlas_pricing::export::{write_quote_rows, QuoteRow};
use atlas_pricing::{Quote, QuoteRunner};
use clap::Parser;
use log::{info, warn};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "quote_block", about = "Quote a block of clients from CSV")]
struct Args {
    #[arg(default_value = "data/sample_clients.csv")]
    input: PathBuf,

    #[arg(default_value = "quote_block_output.csv")]
    output: PathBuf,

    #[arg(long, default_value = DEFAULT_DATA_PATH)]
    data_dir: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    println!("Loading clients from {}...", args.input.display());

    let clients = load_clients(&args.input)
        .with_context(|| format!("loading clients from {}", args.input.display()))?;
    println!("Loaded {} clients in {:?}", clients.len(), start.elapsed());

    let runner = QuoteRunner::from_json_path(&args.data_dir)
        .with_context(|| format!("loading reference data from {}", args.data_dir.display()))?;

    let quote_start = Instant::now();
    let results = runner.quote_batch(&clients);
    info!("quoted {} clients in {:?}", results.len(), quote_start.elapsed());

    let mut failed = 0;
    let mut rows = Vec::with_capacity(results.len());
    for (client_id, result) in &results {
        match result {
            Ok(quote) => rows.push(QuoteRow::new(client_id, quote)),
            Err(e) => {
                warn!("client {}: {}", client_id, e);
                failed += 1;
            }
        }
    }

    let file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    write_quote_rows(BufWriter::new(file), &rows)
        .with_context(|| format!("writing {}", args.output.display()))?;

    println!("Output written to {}", args.output.display());

    let quoted: Vec<&Quote> = results.iter().filter_map(|(_, r)| r.as_ref().ok()).collect();
    let total_annual: f64 = quoted.iter().map(|q| q.premium.annual).sum();
    let substandard = quoted.iter().filter(|q| q.premium.underwriting.is_substandard()).count();

    println!("\nBlock Summary:");
    println!("  Clients quoted: {} ({} failed)", quoted.len(), failed);
    println!("  Substandard: {}", substandard);
    println!("  Total annual premium: ${:.2}", total_annual);
    println!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}
