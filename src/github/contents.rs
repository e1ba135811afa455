// src/github/contents.rs
// =============================================================================
// This module talks to the GitHub "contents" API.
//
// GET /repos/{owner}/{repo}/contents/{path}[?ref=...] returns either:
// - a JSON array  -> the path is a directory, one object per entry
// - a JSON object -> the path is a file, with base64 `content`
//
// The pipeline never calls reqwest directly. It goes through the
// ContentSource trait so tests can swap in an in-memory repository.
//
// Rust concepts:
// - Traits: ContentSource is the seam between "how to fetch" and "what to do"
// - #[serde(untagged)]: lets serde pick the enum variant by JSON shape
// - async-trait: async methods inside a trait
// =============================================================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Request};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::error::ExtractError;
use super::reference::RepositoryReference;

/// Public GitHub API root.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const ACCEPT_GITHUB_JSON: &str = "application/vnd.github.v3+json";

/// What kind of object a directory entry is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
    Submodule,
    #[serde(other)]
    Other,
}

/// One item of a directory listing.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryEntry {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

/// A single file as returned by the contents endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct FileDescriptor {
    pub name: String,
    pub path: String,
    /// Usually "base64"; "none" for files too large for the endpoint.
    #[serde(default)]
    pub encoding: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Either side of the contents endpoint's answer.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Contents {
    Listing(Vec<DirectoryEntry>),
    File(FileDescriptor),
}

impl Contents {
    /// Returns the listing, or an error naming `path` if this was a file.
    pub fn into_listing(self, path: &str) -> Result<Vec<DirectoryEntry>, ExtractError> {
        match self {
            Contents::Listing(entries) => Ok(entries),
            Contents::File(_) => Err(ExtractError::UnexpectedContents {
                path: path.to_string(),
                expected: "a directory listing",
            }),
        }
    }

    /// Returns the file, or an error naming `path` if this was a directory.
    pub fn into_file(self, path: &str) -> Result<FileDescriptor, ExtractError> {
        match self {
            Contents::File(file) => Ok(file),
            Contents::Listing(_) => Err(ExtractError::UnexpectedContents {
                path: path.to_string(),
                expected: "a file",
            }),
        }
    }
}

/// Anything that can answer "what is at this path of this repository?".
///
/// `path` is relative to the repository root; the empty string is the root.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch(&self, repo: &RepositoryReference, path: &str) -> Result<Contents, ExtractError>;
}

/// ContentSource backed by the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GithubClient {
    client: Client,
    api_url: Url,
    token: Option<String>,
}

impl GithubClient {
    /// Builds a client for the given API root.
    ///
    /// An empty token is treated as no token, so `GITHUB_TOKEN=""` does not
    /// produce a broken Authorization header.
    pub fn new(api_url: &str, token: Option<String>) -> Result<Self, ExtractError> {
        let api_url = Url::parse(api_url).map_err(|e| ExtractError::InvalidReference {
            url: api_url.to_string(),
            reason: format!("bad API URL: {}", e),
        })?;

        if api_url.cannot_be_a_base() {
            return Err(ExtractError::InvalidReference {
                url: api_url.to_string(),
                reason: "API URL cannot be used as a base".to_string(),
            });
        }

        // reqwest::Client holds a connection pool; one per run is enough
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(ExtractError::ClientSetup)?;

        Ok(GithubClient {
            client,
            api_url,
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    /// Endpoint for `path`, e.g.
    ///   https://api.github.com/repos/owner/repo/contents/src/main.rs?ref=dev
    pub fn contents_url(&self, repo: &RepositoryReference, path: &str) -> Url {
        let mut url = self.api_url.clone();
        {
            // cannot_be_a_base() was rejected in new(), so this always succeeds
            if let Ok(mut segments) = url.path_segments_mut() {
                segments
                    .pop_if_empty()
                    .extend(["repos", repo.owner.as_str(), repo.name.as_str(), "contents"])
                    .extend(path.split('/').filter(|s| !s.is_empty()));
            }
        }
        url.query_pairs_mut().append_pair("ref", &repo.git_ref);
        url
    }

    /// Builds the GET request without sending it.
    pub fn build_request(&self, repo: &RepositoryReference, path: &str) -> Result<Request, ExtractError> {
        let mut builder = self
            .client
            .get(self.contents_url(repo, path))
            .header(ACCEPT, ACCEPT_GITHUB_JSON)
            .header(USER_AGENT, concat!("repo2prompt/", env!("CARGO_PKG_VERSION")));

        // Only attach credentials when we actually have some
        if let Some(token) = &self.token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        builder.build().map_err(|source| ExtractError::Network {
            path: path.to_string(),
            source,
        })
    }
}

#[async_trait]
impl ContentSource for GithubClient {
    async fn fetch(&self, repo: &RepositoryReference, path: &str) -> Result<Contents, ExtractError> {
        let request = self.build_request(repo, path)?;
        debug!(url = %request.url(), "fetching contents");

        let network = |source| ExtractError::Network {
            path: path.to_string(),
            source,
        };

        let response = self.client.execute(request).await.map_err(network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::RemoteFetch {
                status,
                path: path.to_string(),
            });
        }

        response.json::<Contents>().await.map_err(network)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does #[serde(untagged)] do?
//    - Normally serde expects enums to be tagged ({"Listing": [...]})
//    - untagged tries each variant in order and keeps the first that fits
//    - A JSON array can only be a Listing, an object can only be a File
//
// 2. Why #[serde(other)] on EntryKind?
//    - GitHub may add new entry types later
//    - Without it, an unknown "type" would fail the whole listing
//
// 3. Why path_segments_mut() instead of format!()?
//    - File names can contain spaces, '#', '?' and other characters that
//      must be percent-encoded in a URL
//    - The url crate does that encoding for us
//
// 4. What is async_trait?
//    - Lets us write `async fn` inside a trait and still use the trait
//      with generics across threads (the futures it returns are Send)
// -----------------------------------------------------------------------------
