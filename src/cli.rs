// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things). The `env` feature lets
// --token and --api-url fall back to environment variables.
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Derive macros: Automatically generate code for our types
// =============================================================================

use clap::Parser;

use crate::extract::{ExtractOptions, MergeOrder, DEFAULT_CONCURRENCY};
use crate::github::DEFAULT_API_URL;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "repo2prompt",
    version,
    about = "Flatten a GitHub repository into a single prompt-ready document",
    long_about = "repo2prompt walks a GitHub repository through the REST contents API and prints \
                  its README, its directory tree and the contents of every source file in one \
                  document, ready to paste into a language model prompt."
)]
pub struct Cli {
    /// Repository URL (e.g., https://github.com/user/repo/tree/main)
    ///
    /// The part after tree/ selects the branch, tag or commit and is required.
    pub repo_url: String,

    /// GitHub personal access token
    ///
    /// Sent as "Authorization: Bearer <token>". Raises the API rate limit
    /// and gives access to private repositories.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Base URL of the GitHub REST API (change for GitHub Enterprise)
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Maximum number of API requests in flight at once
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY, value_parser = parse_concurrency)]
    pub concurrency: usize,

    /// File extensions to include, comma separated (e.g., "rs,toml,md")
    ///
    /// Replaces the default set: py, ipynb, html, css, js, jsx, rst, md, rs
    #[arg(long, value_delimiter = ',')]
    pub extensions: Option<Vec<String>>,

    /// Folder name to skip anywhere in the tree (repeatable)
    ///
    /// Replaces the default, which skips .github
    #[arg(long = "exclude", value_name = "NAME")]
    pub excluded: Vec<String>,

    /// Produce the same output on every run (sorted tree and file order)
    #[arg(long)]
    pub sorted: bool,

    /// Output results in JSON format instead of plain text
    #[arg(long, conflicts_with = "tree_only")]
    pub json: bool,

    /// Print only the directory tree (skips README and file contents)
    #[arg(long)]
    pub tree_only: bool,

    /// Log progress to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Turns the flags into pipeline options.
    pub fn extract_options(&self) -> ExtractOptions {
        let mut options = ExtractOptions {
            concurrency: self.concurrency,
            order: if self.sorted {
                MergeOrder::Sorted
            } else {
                MergeOrder::Completion
            },
            ..ExtractOptions::default()
        };

        if let Some(extensions) = &self.extensions {
            options = options.with_extensions(extensions);
        }
        if !self.excluded.is_empty() {
            options.excluded = self.excluded.clone();
        }
        options
    }
}

// A concurrency of zero would never issue a request
fn parse_concurrency(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}
