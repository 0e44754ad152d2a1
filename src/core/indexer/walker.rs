//! File system scanner with ignore-rule filtering.
//!
//! Traverses a directory tree depth-first in file-name order, prunes
//! ignored directories without descending into them, and token-counts
//! every file whose extension is requested. Symlinked files are read
//! through their link; symlinked directories are not entered. A matching
//! file that cannot be read becomes a [`FileFailure`]; walk errors and
//! size-limit skips are logged and noted. Neither stops the scan.

use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path};
use std::sync::Arc;

use walkdir::{DirEntry, WalkDir};

use crate::core::config::IndexingConfig;
use crate::core::error::{IngestError, Result};
use crate::core::indexer::ignore::IgnoreFilter;
use crate::core::indexer::tokens::TokenCounter;
use crate::core::types::{FileFailure, FileRecord, FileStage};

const DEFAULT_MAX_FILE_SIZE_MB: usize = 10;

/// Files found by a scan, plus the entries that had to be left out
#[derive(Debug, Clone, Default)]
pub struct ScanOutput {
    /// Matching files in traversal order
    pub records: Vec<FileRecord>,

    /// Matching files that could not be stat'ed or read
    pub failures: Vec<FileFailure>,

    /// Human-readable reasons for walk errors and size-limit skips
    pub skipped: Vec<String>,
}

/// What a matching directory entry turned out to be
enum Examined {
    Record(FileRecord),
    TooLarge(u64),
    NotAFile,
}

/// Recursive, deterministic directory scanner
pub struct FileScanner {
    /// Extensions to include, without the leading dot (case-sensitive)
    extensions: HashSet<String>,

    filter: IgnoreFilter,

    counter: Arc<dyn TokenCounter>,

    /// Maximum file size in bytes (skip larger files)
    max_file_size_bytes: u64,
}

impl FileScanner {
    /// Create a new scanner
    ///
    /// # Arguments
    ///
    /// * `extensions` - Extensions to include (`"md"` or `".md"`)
    /// * `filter` - Exclusion rules, fixed for the scan's lifetime
    /// * `counter` - Token counter used for each file's content
    /// * `max_file_size_mb` - Maximum file size in megabytes
    pub fn new<I, S>(
        extensions: I,
        filter: IgnoreFilter,
        counter: Arc<dyn TokenCounter>,
        max_file_size_mb: usize,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim().trim_start_matches('.').to_string())
            .filter(|e| !e.is_empty())
            .collect();

        Self {
            extensions,
            filter,
            counter,
            max_file_size_bytes: (max_file_size_mb as u64) * 1024 * 1024,
        }
    }

    /// Build a scanner for `root` from configuration, loading the
    /// root's ignore file on top of the built-in defaults
    pub fn for_root(
        config: &IndexingConfig,
        root: &Path,
        counter: Arc<dyn TokenCounter>,
    ) -> Result<Self> {
        let ignore_file = root.join(&config.ignore_file);
        let filter = IgnoreFilter::load(&ignore_file, &config.extra_ignore_patterns)
            .map_err(|e| IngestError::Setup(format!("Cannot read {ignore_file:?}: {e}")))?;
        tracing::debug!("Using {} ignore patterns", filter.len());

        Ok(Self::new(
            config.normalized_extensions(),
            filter,
            counter,
            config.max_file_size_mb,
        ))
    }

    /// Scan `root` and return every matching file
    ///
    /// Fails only when `root` itself is not a readable directory.
    pub fn scan(&self, root: &Path) -> Result<ScanOutput> {
        if !root.is_dir() {
            return Err(IngestError::Setup(format!(
                "Scan root {root:?} is not a readable directory"
            )));
        }

        let mut output = ScanOutput::default();

        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| self.should_descend(e, root));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Walk error: {}", e);
                    output.skipped.push(format!("walk error: {e}"));
                    continue;
                }
            };

            let file_type = entry.file_type();
            if !file_type.is_file() && !file_type.is_symlink() {
                continue;
            }

            let Some(relative) = relative_path(entry.path(), root) else {
                continue;
            };
            if self.filter.is_ignored(&relative) || !self.matches_extension(entry.path()) {
                continue;
            }

            match self.examine(entry.path(), root) {
                Ok(Examined::Record(record)) => output.records.push(record),
                Ok(Examined::TooLarge(bytes)) => {
                    tracing::warn!("Skipping {}: file too large ({} bytes)", relative, bytes);
                    output
                        .skipped
                        .push(format!("{relative}: file too large ({bytes} bytes)"));
                }
                Ok(Examined::NotAFile) => {
                    tracing::debug!("Skipping {}: link does not point to a file", relative);
                }
                Err(e) => {
                    tracing::warn!("Failed to read {}: {}", relative, e);
                    output.failures.push(FileFailure {
                        path: relative,
                        stage: FileStage::Read,
                        message: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            "Scan of {:?} found {} files ({} unreadable, {} skipped)",
            root,
            output.records.len(),
            output.failures.len(),
            output.skipped.len()
        );

        Ok(output)
    }

    /// Prune ignored directories before walkdir descends into them
    fn should_descend(&self, entry: &DirEntry, root: &Path) -> bool {
        if entry.path() == root || !entry.file_type().is_dir() {
            return true;
        }

        match relative_path(entry.path(), root) {
            Some(relative) if self.filter.is_ignored_dir(&relative) => {
                tracing::debug!("Skipping ignored directory: {}", relative);
                false
            }
            _ => true,
        }
    }

    /// Final dot-delimited extension, compared case-sensitively
    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.extensions.contains(e))
            .unwrap_or(false)
    }

    /// Stat, read and token-count one matching file, following symlinks
    fn examine(&self, path: &Path, root: &Path) -> Result<Examined> {
        let metadata =
            fs::metadata(path).map_err(|e| IngestError::Scan(format!("cannot stat: {e}")))?;

        if !metadata.is_file() {
            return Ok(Examined::NotAFile);
        }
        if metadata.len() > self.max_file_size_bytes {
            return Ok(Examined::TooLarge(metadata.len()));
        }

        let bytes = fs::read(path).map_err(|e| IngestError::Scan(format!("cannot read: {e}")))?;
        let (content, lossy) = decode_lossy(bytes);
        if lossy {
            tracing::debug!("{:?} is not valid UTF-8, decoded with replacements", path);
        }

        let relative = path.strip_prefix(root).unwrap_or(path).to_path_buf();

        Ok(Examined::Record(FileRecord {
            path: relative,
            token_count: self.counter.count(&content),
            byte_len: content.len() as u64,
            char_len: content.chars().count(),
        }))
    }
}

/// Decode file bytes as UTF-8, replacing invalid sequences with U+FFFD
///
/// The flag is true when any replacement happened.
pub fn decode_lossy(bytes: Vec<u8>) -> (String, bool) {
    match String::from_utf8(bytes) {
        Ok(text) => (text, false),
        Err(e) => (String::from_utf8_lossy(e.as_bytes()).into_owned(), true),
    }
}

/// Scan `root` with explicit extension and ignore-pattern sets.
///
/// No ignore file is read and the default size limit applies. Unreadable
/// and skipped entries are logged but not returned.
pub fn scan<E, P>(
    root: &Path,
    extensions: &[E],
    ignore_patterns: &[P],
    counter: Arc<dyn TokenCounter>,
) -> Result<Vec<FileRecord>>
where
    E: AsRef<str>,
    P: AsRef<str>,
{
    let filter = IgnoreFilter::new(ignore_patterns.iter().map(|p| p.as_ref()));
    let scanner = FileScanner::new(
        extensions.iter().map(|e| e.as_ref()),
        filter,
        counter,
        DEFAULT_MAX_FILE_SIZE_MB,
    );
    Ok(scanner.scan(root)?.records)
}

/// `/`-separated path of `path` relative to `root`
fn relative_path(path: &Path, root: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    Some(parts.join("/"))
}
