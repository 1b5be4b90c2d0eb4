//! Command-line search client.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use env_logger::Builder;

use wikidex::error::Result;
use wikidex::search::searcher::Searcher;

/// Run boolean queries against an index file.
#[derive(Parser, Debug)]
#[command(name = "wikidex-search")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct SearchArgs {
    /// Path to the index file
    #[arg(value_name = "INDEX")]
    index: PathBuf,

    /// Execute a single query and exit
    #[arg(short, long)]
    query: Option<String>,

    /// Interactive mode
    #[arg(short, long)]
    interactive: bool,

    /// Results limit
    #[arg(short, long, default_value_t = 10)]
    limit: usize,

    /// Show index statistics
    #[arg(long)]
    stats: bool,
}

fn execute_query(searcher: &Searcher, query: &str, limit: usize) -> Result<()> {
    let response = searcher.search(query, limit, 0)?;

    println!("\n=== Query: {query} ===");
    println!(
        "Found: {} in {:.2} ms\n",
        response.total_count, response.query_time_ms
    );

    for (i, result) in response.results.iter().enumerate() {
        println!("{}. {}", i + 1, result.title);
        println!("   {}\n", result.url);
    }

    Ok(())
}

fn run(args: SearchArgs) -> Result<()> {
    let searcher = Searcher::open(&args.index)?;

    if args.stats {
        println!("Documents: {}", searcher.num_documents());
        println!("Terms: {}", searcher.num_terms());
    }

    if let Some(query) = &args.query {
        return execute_query(&searcher, query, args.limit);
    }

    if args.interactive {
        println!("Interactive mode. Ctrl+D to exit.\n");
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        if args.interactive {
            write!(stdout, ">>> ")?;
            stdout.flush()?;
        }

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let line = line.trim();
        if !line.is_empty() {
            execute_query(&searcher, line, args.limit)?;
        }
    }

    Ok(())
}

fn main() {
    let args = SearchArgs::parse();

    Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
