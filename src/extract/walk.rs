// src/extract/walk.rs
// =============================================================================
// Recursive directory walk.
//
// How it works:
// 1. Fetch the listing for a directory
// 2. Drop entries whose path contains an excluded segment (e.g. .github)
// 3. For every remaining entry, concurrently:
//    - directory: emit "[name/]" and walk it one level deeper
//    - anything else: emit "name", and record it if it is an allowed file
// 4. Merge each entry's own (tree, files) result into the parent's
//
// Each entry builds its own TreeListing and the parent merges them after the
// batch is awaited, so nothing is shared between concurrent tasks.
//
// Rust concepts:
// - BoxFuture: an async fn cannot call itself directly, its future would
//   contain itself; boxing gives the recursive future a fixed size
// =============================================================================

use futures::future::BoxFuture;
use serde::Serialize;
use tracing::debug;

use super::{indent, Extractor};
use crate::github::{ContentSource, DirectoryEntry, EntryKind, ExtractError};

/// A file picked for the document, with the tree depth it was found at.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct FlatFileEntry {
    pub depth: usize,
    pub path: String,
}

/// Tree text plus the files found under one directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeListing {
    pub tree: String,
    pub files: Vec<FlatFileEntry>,
}

impl TreeListing {
    fn line(depth: usize, label: &str) -> Self {
        TreeListing {
            tree: format!("{}{}\n", indent(depth), label),
            files: Vec::new(),
        }
    }

    fn merge(&mut self, other: TreeListing) {
        self.tree.push_str(&other.tree);
        self.files.extend(other.files);
    }
}

impl<S: ContentSource> Extractor<S> {
    /// Walks `path` (empty for the repository root), labelling entries at `depth`.
    pub fn walk<'a>(&'a self, path: &'a str, depth: usize) -> BoxFuture<'a, Result<TreeListing, ExtractError>> {
        Box::pin(async move {
            let entries = self.fetch(path).await?.into_listing(path)?;

            let visible: Vec<DirectoryEntry> = entries
                .into_iter()
                .filter(|entry| !self.options.is_excluded(&entry.path))
                .collect();

            debug!(path, depth, entries = visible.len(), "walking directory");

            let partials = self
                .fan_out(visible.into_iter().map(|entry| self.walk_entry(entry, depth)))
                .await?;

            let mut listing = TreeListing::default();
            for partial in partials {
                listing.merge(partial);
            }
            Ok(listing)
        })
    }

    async fn walk_entry(&self, entry: DirectoryEntry, depth: usize) -> Result<TreeListing, ExtractError> {
        match entry.kind {
            EntryKind::Dir => {
                let mut listing = TreeListing::line(depth, &format!("[{}/]", entry.name));
                listing.merge(self.walk(&entry.path, depth + 1).await?);
                Ok(listing)
            }
            kind => {
                let mut listing = TreeListing::line(depth, &entry.name);
                // Symlinks and submodules show up in the tree but have no text to include
                if kind == EntryKind::File && self.options.is_included(&entry.name) {
                    listing.files.push(FlatFileEntry {
                        depth,
                        path: entry.path,
                    });
                }
                Ok(listing)
            }
        }
    }
}
