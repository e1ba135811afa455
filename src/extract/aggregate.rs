// src/extract/aggregate.rs
// =============================================================================
// Builds the final prompt document.
//
// Layout:
//
//   README.md:
//   ```
//   <readme text>
//   ```
//
//   Directory Structure:
//   <tree>
//
//   <indent>path/to/file.rs:
//   <indent>```
//   <file text>
//   <indent>```
//
// The README lookup is the one place where a failed fetch is not fatal: it
// becomes a placeholder line. Any other file that fails to fetch or decode
// ends the run.
// =============================================================================

use serde::Serialize;
use tracing::{info, warn};

use super::walk::{FlatFileEntry, TreeListing};
use super::{indent, Extractor, MergeOrder};
use crate::github::{decode, ContentSource, ExtractError};

pub const README_PATH: &str = "README.md";

/// Written instead of the README block when the README cannot be read.
pub const README_PLACEHOLDER: &str = "README.md: Not found or error fetching README";

/// The assembled document plus the pieces it was built from.
#[derive(Debug, Clone, Serialize)]
pub struct FormattedDocument {
    /// README block, tree block and one block per file.
    #[serde(rename = "document")]
    pub text: String,
    pub tree: String,
    pub files: Vec<FlatFileEntry>,
}

impl<S: ContentSource> Extractor<S> {
    /// Fetches everything and returns the finished document.
    pub async fn aggregate(&self) -> Result<FormattedDocument, ExtractError> {
        let mut text = self.readme_block().await;

        let TreeListing { tree, mut files } = self.walk("", 0).await?;
        info!(repo = %self.repo, files = files.len(), "directory tree walked");

        // Sorting here decouples output order from fetch completion order
        if self.options.order == MergeOrder::Sorted {
            files.sort();
        }

        let blocks = self.fan_out(files.iter().map(|entry| self.file_block(entry))).await?;
        info!(repo = %self.repo, blocks = blocks.len(), "file contents fetched");

        text.push_str("Directory Structure:\n");
        text.push_str(&tree);
        text.push('\n');
        for block in &blocks {
            text.push_str(block);
        }

        Ok(FormattedDocument { text, tree, files })
    }

    async fn readme_block(&self) -> String {
        match self.fetch_text(README_PATH).await {
            Ok(readme) => format!("{}:\n```\n{}\n```\n\n", README_PATH, readme),
            Err(e) => {
                warn!(error = %e, "README unavailable, using placeholder");
                format!("{}\n\n", README_PLACEHOLDER)
            }
        }
    }

    async fn file_block(&self, entry: &FlatFileEntry) -> Result<String, ExtractError> {
        let content = self.fetch_text(&entry.path).await?;
        let pad = indent(entry.depth);
        Ok(format!(
            "\n{pad}{path}:\n{pad}```\n{content}\n{pad}```\n",
            pad = pad,
            path = entry.path,
            content = content,
        ))
    }

    async fn fetch_text(&self, path: &str) -> Result<String, ExtractError> {
        let file = self.fetch(path).await?.into_file(path)?;
        decode(&file)
    }
}
