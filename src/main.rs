// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr only, stdout is reserved for the document)
// 3. Parse the repository URL and build the GitHub client
// 4. Run the extraction pipeline and print the result
// 5. Exit with proper code (0 = success, 1 = error)
//
// Rust concepts used:
// - async/await: Because we make many network requests concurrently
// - Result<T, E>: For error handling (T = success type, E = error type)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;           // src/cli.rs - command-line parsing
mod extract;       // src/extract/ - tree walk and document assembly
mod github;        // src/github/ - GitHub API access

use clap::Parser;  // Parser trait enables the parse() method
use cli::Cli;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::{Context, Result};

use extract::{Extractor, FormattedDocument};
use github::{GithubClient, RepositoryReference};

// The #[tokio::main] attribute transforms our async main into a real main function
// It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

fn init_logging(verbose: bool) {
    let filter = log_filter(std::env::var("RUST_LOG").ok().as_deref(), verbose);
    // try_init only fails if a global subscriber is already installed;
    // logging is best effort, so a second init is not worth aborting over
    if let Err(e) = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()
    {
        eprintln!("Warning: logging disabled: {}", e);
    }
}

// RUST_LOG, when set and valid, wins over --verbose
fn log_filter(rust_log: Option<&str>, verbose: bool) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(if verbose { "debug" } else { "warn" }))
}

async fn run(cli: Cli) -> Result<()> {
    // Fails before any network traffic if the URL is malformed
    let repo = RepositoryReference::parse(&cli.repo_url)?;
    let options = cli.extract_options();

    let client = GithubClient::new(&cli.api_url, cli.token.clone())
        .context("could not set up the GitHub client")?;

    info!(repo = %repo, concurrency = options.concurrency, "starting extraction");
    let extractor = Extractor::new(client, repo, options);

    if cli.tree_only {
        let listing = extractor
            .walk("", 0)
            .await
            .with_context(|| format!("failed to walk {}", extractor.repo()))?;
        print!("{}", listing.tree);
        return Ok(());
    }

    let document = extractor
        .aggregate()
        .await
        .with_context(|| format!("failed to extract {}", extractor.repo()))?;

    if cli.json {
        print_json(extractor.repo(), &document)?;
    } else {
        println!("{}", document.text);
    }
    Ok(())
}

// Shape of the --json output: repository fields next to the document fields
#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    repo: &'a RepositoryReference,
    #[serde(flatten)]
    document: &'a FormattedDocument,
}

fn print_json(repo: &RepositoryReference, document: &FormattedDocument) -> Result<()> {
    let report = JsonReport { repo, document };
    let json_output = serde_json::to_string_pretty(&report)?;
    println!("{}", json_output);
    Ok(())
}
