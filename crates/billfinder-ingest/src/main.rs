use clap::Parser;
use tracing_subscriber::EnvFilter;

use billfinder_congress::client::DEFAULT_PAGE_SIZE;
use billfinder_ingest::config::Settings;
use billfinder_ingest::pipeline::{BillOutcome, IngestOptions, ingest};

/// Classify recently updated bills and store the results.
#[derive(Parser, Debug)]
#[command(name = "billfinder-ingest", version, about, long_about = None)]
struct Cli {
    /// Number of bills from the page to process.
    #[arg(long, default_value_t = 10)]
    batch: usize,

    /// Number of bills to request from Congress.gov.
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: u32,

    /// Skip the per-bill summary and text lookups.
    #[arg(long)]
    no_enrich: bool,

    /// Classify without writing to the store.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let cli = Cli::parse();
    let settings = Settings::from_env()?;

    let vocabulary = settings.load_vocabulary()?;
    let source = settings.build_bill_source()?;
    let model = settings.build_model().await?;
    let store = settings.build_store().await;

    let options = IngestOptions {
        batch: cli.batch,
        page_size: cli.page_size,
        enrich: !cli.no_enrich,
        persist: !cli.dry_run,
    };

    let report = ingest(
        source.as_ref(),
        model.as_ref(),
        store.as_ref(),
        &vocabulary,
        &options,
    )
    .await?;

    for bill in &report.bills {
        let outcome = match &bill.outcome {
            BillOutcome::Stored => "stored".to_string(),
            BillOutcome::NotPersisted => "dry-run".to_string(),
            BillOutcome::Skipped { reason } => format!("skipped ({reason})"),
            BillOutcome::Failed { reason } => format!("failed ({reason})"),
        };
        let classified = if bill.demographics.is_some() { "classified" } else { "unclassified" };
        println!("{}\t{classified}\t{outcome}\t{}", bill.id, bill.title);
    }
    println!(
        "{} processed, {} stored, {} classified",
        report.bills.len(),
        report.stored(),
        report.classified()
    );

    Ok(())
}
