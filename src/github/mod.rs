// src/github/mod.rs
// =============================================================================
// This module handles everything that talks to GitHub.
//
// Currently implements:
// - Parsing repository URLs into owner / repo / ref
// - Fetching paths through the REST contents API (with optional token)
// - Decoding the base64 file bodies the API returns
//
// Rust concepts:
// - Modules: Organizing related functionality
// - Public API: What other parts of the app can use
// =============================================================================

mod contents;
mod decode;
mod error;
#[cfg(test)]
pub mod memory;
mod reference;

// Re-export so callers can write `github::GithubClient` etc.
pub use contents::{
    ContentSource, Contents, DirectoryEntry, EntryKind, GithubClient, DEFAULT_API_URL,
};
pub use decode::decode;
pub use error::ExtractError;
pub use reference::RepositoryReference;
