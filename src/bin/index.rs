//! Index builder binary.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use env_logger::Builder;

use wikidex::error::Result;
use wikidex::index::builder::Indexer;
use wikidex::source::{DocumentSource, HttpSource, JsonlSource, StoreConfig};

/// Build a boolean search index from a document corpus.
#[derive(Parser, Debug)]
#[command(name = "wikidex-index")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct IndexArgs {
    /// Document store host
    #[arg(long, default_value = "localhost")]
    host: String,

    /// Document store port
    #[arg(long, default_value_t = 27017)]
    port: u16,

    /// Database name
    #[arg(long, default_value = "search_engine_db")]
    db: String,

    /// Collection name
    #[arg(long, default_value = "documents")]
    collection: String,

    /// Output index file
    #[arg(long, default_value = "index.bin")]
    output: PathBuf,

    /// Index at most N documents (0 = no limit)
    #[arg(long, default_value_t = 0)]
    limit: u64,

    /// Read the corpus from a local JSONL file instead of the store
    #[arg(long)]
    jsonl: Option<PathBuf>,
}

fn run(args: IndexArgs) -> Result<()> {
    let mut source: Box<dyn DocumentSource> = match &args.jsonl {
        Some(path) => Box::new(JsonlSource::open(path)?),
        None => {
            let config = StoreConfig {
                host: args.host.clone(),
                port: args.port,
                database: args.db.clone(),
                collection: args.collection.clone(),
            };
            Box::new(HttpSource::connect(&config, args.limit)?)
        }
    };

    let indexer = Indexer::new();
    let stats = indexer.build(source.as_mut(), &args.output, args.limit)?;

    println!("Indexing complete in {:.2} sec", stats.indexing_time_sec);
    println!("Documents:       {}", stats.total_documents);
    println!("Unique terms:    {}", stats.unique_terms);
    println!("Total tokens:    {}", stats.total_tokens);
    println!("Total postings:  {}", stats.total_postings);
    println!("Avg term length: {:.2}", stats.avg_term_length);
    println!("Skipped rows:    {}", stats.skipped_rows);
    println!("Speed:           {:.0} docs/sec", stats.docs_per_second());
    println!("Speed:           {:.2} KB/sec", stats.kb_per_second());
    println!("Index written to {}", args.output.display());

    Ok(())
}

fn main() {
    let args = IndexArgs::parse();

    Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
