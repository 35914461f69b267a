//! Normalized path handling for cross-platform compatibility

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Scheme prefix the IDE project model uses for local directories.
const FILE_URL_PREFIX: &str = "file://";

/// A path normalized to use forward slashes internally.
///
/// All project-model keys (content roots, source folders, library roots) are
/// compared as strings, so every path entering the reconciler goes through
/// this type first. Redundant separators, `.` and `..` segments are folded
/// lexically; the filesystem is never consulted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// Converts backslashes to forward slashes and folds `.`/`..` segments.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self {
            inner: normalize(&path_str.replace('\\', "/")),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// True for `/...` paths and Windows drive paths such as `C:/...`.
    pub fn is_absolute(&self) -> bool {
        self.inner.starts_with('/') || drive_prefix_len(&self.inner) > 0
    }

    /// True for the empty relative path (the base directory itself).
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: &str) -> Self {
        let segment_normalized = segment.replace('\\', "/");
        let joined = if self.inner.is_empty() {
            segment_normalized
        } else if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment_normalized)
        } else {
            format!("{}/{}", self.inner, segment_normalized)
        };
        Self {
            inner: normalize(&joined),
        }
    }

    /// Resolve `other` against this path.
    ///
    /// An absolute `other` is returned unchanged; a relative one is joined.
    pub fn resolve(&self, other: impl AsRef<Path>) -> Self {
        let other = Self::new(other);
        if other.is_absolute() {
            other
        } else {
            self.join(other.as_str())
        }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(idx) if idx > 0 => Some(Self {
                inner: trimmed[..idx].to_string(),
            }),
            Some(0) if trimmed.len() > 1 => Some(Self {
                inner: "/".to_string(),
            }),
            _ => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// The URL the IDE project model stores for this path.
    pub fn to_ide_url(&self) -> String {
        format!("{FILE_URL_PREFIX}{}", self.inner)
    }
}

/// Convert a local path into an IDE `file://` URL.
pub fn path_to_ide_url(path: impl AsRef<Path>) -> String {
    NormalizedPath::new(path).to_ide_url()
}

fn drive_prefix_len(path: &str) -> usize {
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        if bytes.len() == 2 || bytes[2] == b'/' { 2 } else { 0 }
    } else {
        0
    }
}

fn normalize(path: &str) -> String {
    let drive = drive_prefix_len(path);
    let (prefix, rest) = path.split_at(drive);
    let absolute = drive > 0 || rest.starts_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in rest.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(last) if *last != ".." => {
                    segments.pop();
                }
                // `..` above the root of an absolute path stays at the root
                _ if absolute => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let body = segments.join("/");
    match (absolute, prefix.is_empty()) {
        (true, true) => format!("/{body}"),
        (true, false) => format!("{prefix}/{body}"),
        (false, _) => body,
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

impl From<NormalizedPath> for String {
    fn from(p: NormalizedPath) -> Self {
        p.inner
    }
}
