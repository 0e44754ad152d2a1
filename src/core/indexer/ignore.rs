//! Path exclusion rules.
//!
//! Patterns come from a project ignore file (gitignore-style file,
//! one pattern per line) unioned with a built-in default set, so the
//! filter still excludes VCS metadata, dependencies and build output
//! when no ignore file exists.
//!
//! Matching is deliberately simpler than gitignore:
//!
//! - `build/` (trailing separator): substring match, so any `build`
//!   directory anywhere in the tree is excluded
//! - `*.log` (leading wildcard-dot): suffix match on `.log`
//! - anything else: substring match
//!
//! Negated patterns (`!keep.md`) are not supported.

use std::fs;
use std::io;
use std::path::Path;

/// Patterns applied even when no ignore file is present
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    ".git/",
    "node_modules/",
    "__pycache__/",
    "target/",
    "build/",
    "dist/",
    ".DS_Store",
    ".env",
    "*.log",
];

/// A single compiled exclusion rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnorePattern {
    /// `dir/`: matches paths containing the pattern
    Directory(String),
    /// `*.ext`: matches paths ending with `.ext` (stored with the dot)
    Extension(String),
    /// Matches paths containing the pattern
    Substring(String),
}

impl IgnorePattern {
    /// Compile a raw pattern string
    pub fn parse(raw: &str) -> Self {
        if raw.ends_with('/') {
            IgnorePattern::Directory(raw.to_string())
        } else if let Some(ext) = raw.strip_prefix("*.") {
            IgnorePattern::Extension(format!(".{ext}"))
        } else {
            IgnorePattern::Substring(raw.to_string())
        }
    }

    /// Check a `/`-separated path against this rule
    pub fn matches(&self, path: &str) -> bool {
        match self {
            IgnorePattern::Directory(dir) => path.contains(dir.as_str()),
            IgnorePattern::Extension(ext) => path.ends_with(ext.as_str()),
            IgnorePattern::Substring(s) => path.contains(s.as_str()),
        }
    }
}

/// Whether `path` matches any of the raw `patterns`
pub fn matches<S: AsRef<str>>(path: &str, patterns: &[S]) -> bool {
    patterns
        .iter()
        .any(|p| IgnorePattern::parse(p.as_ref()).matches(path))
}

/// Immutable set of compiled exclusion rules
#[derive(Debug, Clone)]
pub struct IgnoreFilter {
    patterns: Vec<IgnorePattern>,
}

impl IgnoreFilter {
    /// Build a filter from raw patterns, without defaults
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut compiled: Vec<IgnorePattern> = Vec::new();
        for raw in patterns {
            let Some(pattern) = normalize(raw.as_ref()) else {
                continue;
            };
            let pattern = IgnorePattern::parse(&pattern);
            if !compiled.contains(&pattern) {
                compiled.push(pattern);
            }
        }
        Self { patterns: compiled }
    }

    /// Filter with only the built-in defaults
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_IGNORE_PATTERNS.iter().copied())
    }

    /// Load `ignore_file`, then add the defaults and `extra` patterns.
    ///
    /// A missing ignore file falls back to the defaults; any other
    /// read error is returned.
    pub fn load(ignore_file: &Path, extra: &[String]) -> io::Result<Self> {
        let from_file = match fs::read_to_string(ignore_file) {
            Ok(contents) => {
                let patterns = parse_ignore_file(&contents);
                tracing::debug!(
                    "Loaded {} ignore patterns from {:?}",
                    patterns.len(),
                    ignore_file
                );
                patterns
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No ignore file at {:?}, using defaults", ignore_file);
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        let all = from_file
            .into_iter()
            .chain(DEFAULT_IGNORE_PATTERNS.iter().map(|p| p.to_string()))
            .chain(extra.iter().cloned());
        Ok(Self::new(all))
    }

    /// Whether a `/`-separated path relative to the scan root is excluded
    pub fn is_ignored(&self, path: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(path))
    }

    /// Directories are tested with a trailing separator so `build/`
    /// also excludes the `build` directory itself.
    pub fn is_ignored_dir(&self, path: &str) -> bool {
        self.is_ignored(&format!("{path}/"))
    }

    pub fn patterns(&self) -> &[IgnorePattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Extract patterns from ignore file contents
pub fn parse_ignore_file(contents: &str) -> Vec<String> {
    contents.lines().filter_map(normalize).collect()
}

fn normalize(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    if line.starts_with('!') {
        tracing::debug!("Negated ignore pattern not supported: {}", line);
        return None;
    }
    // Root anchors are treated as plain patterns
    let line = line.trim_start_matches('/');
    if line.is_empty() {
        return None;
    }
    Some(line.to_string())
}
