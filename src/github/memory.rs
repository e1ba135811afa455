// src/github/memory.rs
// =============================================================================
// An in-memory ContentSource for tests.
//
// Files are added by path; directories are derived from those paths, so a
// repository is described with a handful of `with_file` calls. Individual
// paths can be made to fail with an HTTP status.
// =============================================================================

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::StatusCode;

use super::contents::{ContentSource, Contents, DirectoryEntry, EntryKind, FileDescriptor};
use super::error::ExtractError;
use super::reference::RepositoryReference;

#[derive(Debug, Default)]
pub struct MemorySource {
    files: BTreeMap<String, FileDescriptor>,
    dirs: BTreeMap<String, Vec<DirectoryEntry>>,
    failures: HashMap<String, StatusCode>,
    calls: AtomicUsize,
}

impl MemorySource {
    pub fn new() -> Self {
        let mut source = MemorySource::default();
        source.dirs.insert(String::new(), Vec::new());
        source
    }

    /// Adds a base64-encoded file, creating its parent directories.
    pub fn with_file(self, path: &str, text: &str) -> Self {
        let encoded = STANDARD.encode(text);
        self.with_raw_file(path, Some("base64"), &encoded)
    }

    /// Adds a file with an arbitrary encoding tag and payload.
    pub fn with_raw_file(mut self, path: &str, encoding: Option<&str>, content: &str) -> Self {
        let name = self.link(path, EntryKind::File);
        self.files.insert(
            path.to_string(),
            FileDescriptor {
                name,
                path: path.to_string(),
                encoding: encoding.map(str::to_string),
                content: Some(content.to_string()),
            },
        );
        self
    }

    /// Adds an empty directory.
    pub fn with_dir(mut self, path: &str) -> Self {
        self.link(path, EntryKind::Dir);
        self.dirs.entry(path.to_string()).or_default();
        self
    }

    /// Makes every fetch of `path` fail with `status`.
    pub fn with_failure(mut self, path: &str, status: StatusCode) -> Self {
        self.failures.insert(path.to_string(), status);
        self
    }

    /// Number of fetches served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    // Registers `path` in its parent listing (recursively creating parents)
    // and returns its file name.
    fn link(&mut self, path: &str, kind: EntryKind) -> String {
        let (parent, name) = match path.rsplit_once('/') {
            Some((parent, name)) => (parent.to_string(), name.to_string()),
            None => (String::new(), path.to_string()),
        };

        if !parent.is_empty() && !self.dirs.contains_key(&parent) {
            self.link(&parent, EntryKind::Dir);
            self.dirs.insert(parent.clone(), Vec::new());
        }

        let listing = self.dirs.entry(parent).or_default();
        if !listing.iter().any(|e| e.path == path) {
            listing.push(DirectoryEntry {
                name: name.clone(),
                path: path.to_string(),
                kind,
            });
        }
        name
    }
}

#[async_trait]
impl ContentSource for MemorySource {
    async fn fetch(&self, _repo: &RepositoryReference, path: &str) -> Result<Contents, ExtractError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        // Give other futures a chance to run so completion order varies
        tokio::task::yield_now().await;

        if let Some(status) = self.failures.get(path) {
            return Err(ExtractError::remote(*status, path));
        }
        if let Some(file) = self.files.get(path) {
            return Ok(Contents::File(file.clone()));
        }
        if let Some(entries) = self.dirs.get(path) {
            return Ok(Contents::Listing(entries.clone()));
        }
        Err(ExtractError::remote(StatusCode::NOT_FOUND, path))
    }
}
