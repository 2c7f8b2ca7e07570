//! CLI entry point for civfetch.

use std::io;

use anyhow::Result;
use civfetch::{Resolver, TokenStore, TransferEngine, normalize_input};
use clap::Parser;
use tracing::{debug, info};

use civfetch::cli::Args;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    // All failures surface the same way: one diagnostic line, one exit code.
    if let Err(error) = run(args).await {
        eprintln!("ERROR: {error}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let store = TokenStore::default_location()?;
    let token = match store.load()? {
        Some(token) => token,
        None => {
            let stdin = io::stdin();
            store.prompt_and_store(&mut stdin.lock(), &mut io::stdout())?
        }
    };

    // Normalize input (convert bare model ID to a full endpoint URL)
    let url = normalize_input(&args.url);
    debug!(url = %url, "normalized input");

    let resolver = Resolver::new()?;
    let target = resolver.resolve(&url, &token).await?;
    info!(filename = %target.filename, "resolved download target");

    let engine = TransferEngine::new()?;
    engine.transfer(&target, &args.output_path).await?;

    Ok(())
}
