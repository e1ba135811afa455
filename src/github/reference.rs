// src/github/reference.rs
// =============================================================================
// Turns a repository URL into the (owner, repo, ref) triple the contents API
// needs.
//
// Supported formats:
//   - https://github.com/owner/repo/tree/main
//   - https://github.com/owner/repo.git/tree/main
//   - https://github.com/owner/repo/tree/feature/nested-branch
//   - github.com/owner/repo/tree/main   (scheme is optional)
//
// The tree/<ref> part is required: a bare https://github.com/owner/repo is
// rejected, so the branch being read is always explicit.
//
// The host is not checked, so GitHub Enterprise URLs work as long as
// --api-url points at the matching API.
// =============================================================================

use serde::Serialize;
use url::Url;

use super::error::ExtractError;

/// Which repository, and which branch/tag/commit of it, to read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryReference {
    pub owner: String,
    pub name: String,
    /// Everything after `tree/`.
    #[serde(rename = "ref")]
    pub git_ref: String,
}

impl RepositoryReference {
    /// Parses a repository URL.
    ///
    /// Example:
    ///   "https://github.com/rust-lang/rust/tree/master"
    ///     -> owner "rust-lang", name "rust", ref "master"
    pub fn parse(input: &str) -> Result<Self, ExtractError> {
        let invalid = |reason: &str| ExtractError::InvalidReference {
            url: input.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = input.trim();
        let with_scheme = if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            format!("https://{}", trimmed)
        };

        let url = Url::parse(&with_scheme).map_err(|e| invalid(&e.to_string()))?;

        // Empty segments come from doubled or trailing slashes
        let segments: Vec<&str> = url
            .path_segments()
            .map(|parts| parts.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();

        if segments.len() < 2 {
            return Err(invalid("expected /<owner>/<repo> in the path"));
        }

        let owner = segments[0].to_string();
        let name = segments[1].trim_end_matches(".git").to_string();
        if name.is_empty() {
            return Err(invalid("repository name is empty"));
        }

        let git_ref = match &segments[2..] {
            [] => return Err(invalid("missing 'tree/<branch>' after the repository name")),
            ["tree"] => return Err(invalid("missing branch name after 'tree/'")),
            ["tree", rest @ ..] => rest.join("/"),
            _ => return Err(invalid("expected 'tree/<branch>' after the repository name")),
        };

        Ok(RepositoryReference {
            owner,
            name,
            git_ref,
        })
    }
}

impl std::fmt::Display for RepositoryReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}@{}", self.owner, self.name, self.git_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tree_url() {
        let reference =
            RepositoryReference::parse("https://github.com/dongri/openai-api-rs/tree/main").unwrap();
        assert_eq!(reference.owner, "dongri");
        assert_eq!(reference.name, "openai-api-rs");
        assert_eq!(reference.git_ref, "main");
    }

    #[test]
    fn test_parse_nested_branch() {
        let reference =
            RepositoryReference::parse("https://github.com/user/repo/tree/feature/login/").unwrap();
        assert_eq!(reference.git_ref, "feature/login");
    }

    #[test]
    fn test_parse_without_scheme_and_git_suffix() {
        let reference = RepositoryReference::parse("github.com/user/repo.git/tree/dev").unwrap();
        assert_eq!(reference.owner, "user");
        assert_eq!(reference.name, "repo");
        assert_eq!(reference.git_ref, "dev");
    }

    #[test]
    fn test_parse_bare_repository_is_rejected() {
        for url in ["https://github.com/owner/repo", "github.com/owner/repo.git/"] {
            match RepositoryReference::parse(url) {
                Err(ExtractError::InvalidReference { reason, .. }) => {
                    assert!(reason.contains("tree/"), "unexpected reason: {reason}");
                }
                other => panic!("expected InvalidReference for {url}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_parse_missing_repo_segment() {
        let result = RepositoryReference::parse("https://github.com/user");
        assert!(matches!(result, Err(ExtractError::InvalidReference { .. })));
    }

    #[test]
    fn test_parse_tree_without_branch() {
        let result = RepositoryReference::parse("https://github.com/user/repo/tree/");
        assert!(matches!(result, Err(ExtractError::InvalidReference { .. })));
    }

    #[test]
    fn test_parse_blob_url_is_rejected() {
        let result = RepositoryReference::parse("https://github.com/user/repo/blob/main/README.md");
        assert!(matches!(result, Err(ExtractError::InvalidReference { .. })));
    }

    #[test]
    fn test_display() {
        let reference = RepositoryReference::parse("https://github.com/a/b/tree/v1.0").unwrap();
        assert_eq!(reference.to_string(), "a/b@v1.0");
    }
}
