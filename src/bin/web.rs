//! Web front-end binary.

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;
use env_logger::Builder;
use log::info;

use wikidex::search::searcher::Searcher;
use wikidex::web::create_router;

/// Serve the search UI and JSON API over HTTP.
#[derive(Parser, Debug)]
#[command(name = "wikidex-web")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct WebArgs {
    /// Path to the index file
    #[arg(long, default_value = "index.bin")]
    index: PathBuf,

    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

async fn run(args: WebArgs) -> Result<(), Box<dyn std::error::Error>> {
    let searcher = Arc::new(Searcher::open(&args.index)?);

    info!(
        "index loaded: {} documents, {} terms",
        searcher.num_documents(),
        searcher.num_terms()
    );

    let app = create_router(searcher);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("listening on http://{addr}");

    axum::serve(listener, app).await?;

    Ok(())
}

#[tokio::main]
async fn main() {
    let args = WebArgs::parse();

    Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(args).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
