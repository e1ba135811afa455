// src/extract/options.rs
// =============================================================================
// Knobs for one extraction run.
//
// The CLI builds one of these from its flags; tests usually start from
// ExtractOptions::default() and change a field or two.
// =============================================================================

/// Extensions included when the user does not pass --extensions.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    ".py", ".ipynb", ".html", ".css", ".js", ".jsx", ".rst", ".md", ".rs",
];

/// Path segments skipped when the user does not pass --exclude.
pub const DEFAULT_EXCLUDED: &[&str] = &[".github"];

/// Number of requests allowed in flight at once.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// How concurrent results are stitched back together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeOrder {
    /// Whatever finishes first is merged first. Output order varies per run.
    #[default]
    Completion,
    /// Siblings keep listing order and files are sorted by (depth, path).
    Sorted,
}

#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// File name suffixes eligible for inclusion, each starting with '.'.
    pub extensions: Vec<String>,
    /// Any path with one of these as a segment is skipped with its subtree.
    pub excluded: Vec<String>,
    pub concurrency: usize,
    pub order: MergeOrder,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        ExtractOptions {
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            excluded: DEFAULT_EXCLUDED.iter().map(|s| s.to_string()).collect(),
            concurrency: DEFAULT_CONCURRENCY,
            order: MergeOrder::default(),
        }
    }
}

impl ExtractOptions {
    /// Replaces the allow-set. Accepts "rs", ".rs" or "*.rs".
    pub fn with_extensions<I, T>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim().trim_start_matches('*').trim_start_matches('.').to_string())
            .filter(|ext| !ext.is_empty())
            .map(|ext| format!(".{}", ext))
            .collect();
        self
    }

    /// True if a file called `name` belongs in the document.
    pub fn is_included(&self, name: &str) -> bool {
        self.extensions.iter().any(|ext| name.ends_with(ext.as_str()))
    }

    /// True if any segment of `path` is an excluded name.
    pub fn is_excluded(&self, path: &str) -> bool {
        path.split('/')
            .any(|segment| self.excluded.iter().any(|name| name == segment))
    }

    /// Concurrency clamped to at least one, so a zero never stalls the run.
    pub fn concurrency_limit(&self) -> usize {
        self.concurrency.max(1)
    }
}
