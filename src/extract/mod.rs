// src/extract/mod.rs
// =============================================================================
// The fetch-and-flatten pipeline.
//
// Submodules:
// - options: allow-set, excluded folders, concurrency, merge order
// - walk: recursive directory walk producing the tree text and file list
// - aggregate: README + tree + file contents assembled into one document
//
// All network access in a run goes through Extractor::fetch, which holds one
// semaphore permit for the duration of the request. The semaphore is shared
// by every level of the recursive walk, so the number of requests in flight
// never exceeds the configured concurrency no matter how wide or deep the
// repository is.
// =============================================================================

mod aggregate;
mod options;
mod walk;

use std::future::Future;

use futures::stream::{self, StreamExt, TryStreamExt};
use tokio::sync::Semaphore;

use crate::github::{ContentSource, Contents, ExtractError, RepositoryReference};

pub use aggregate::FormattedDocument;
pub use options::{ExtractOptions, MergeOrder, DEFAULT_CONCURRENCY};

/// One level of tree / file-block indentation.
const INDENT: &str = "    ";

/// Runs the pipeline for a single repository.
pub struct Extractor<S> {
    source: S,
    repo: RepositoryReference,
    options: ExtractOptions,
    permits: Semaphore,
}

impl<S: ContentSource> Extractor<S> {
    pub fn new(source: S, repo: RepositoryReference, options: ExtractOptions) -> Self {
        let permits = Semaphore::new(options.concurrency_limit());
        Extractor {
            source,
            repo,
            options,
            permits,
        }
    }

    pub fn repo(&self) -> &RepositoryReference {
        &self.repo
    }

    #[cfg(test)]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// One contents request, throttled by the shared semaphore.
    async fn fetch(&self, path: &str) -> Result<Contents, ExtractError> {
        // acquire() only fails once the semaphore is closed, and we never close it
        let _permit = self.permits.acquire().await.ok();
        self.source.fetch(&self.repo, path).await
    }

    /// Drives a batch of fallible futures, at most `concurrency` at a time.
    ///
    /// Returns on the first error, dropping whatever is still in flight.
    async fn fan_out<I, F, T>(&self, tasks: I) -> Result<Vec<T>, ExtractError>
    where
        I: IntoIterator<Item = F>,
        F: Future<Output = Result<T, ExtractError>>,
    {
        let limit = self.options.concurrency_limit();
        let tasks = stream::iter(tasks);
        match self.options.order {
            MergeOrder::Completion => tasks.buffer_unordered(limit).try_collect().await,
            MergeOrder::Sorted => tasks.buffered(limit).try_collect().await,
        }
    }
}

fn indent(depth: usize) -> String {
    INDENT.repeat(depth)
}
