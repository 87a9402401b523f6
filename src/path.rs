use std::{
    io,
    path::{Path, PathBuf},
};

use tokio::fs;
use tracing::{debug, warn};

use crate::error::ServeError;

// --- Request paths ---

/// A URL path with `.`/`..` and empty segments already folded away.
///
/// `..` can never climb above the root: it is dropped once there are no
/// segments left to pop, so the joined filesystem path stays under the root
/// as far as lexical resolution goes. Symlinks are handled by
/// [`ServeRoot::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestPath {
    segments: Vec<String>,
}

impl RequestPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Percent-decodes and normalizes a raw request path.
    ///
    /// Escapes that decode to invalid UTF-8 become U+FFFD rather than being
    /// left encoded, so `/%FF.txt` never reaches a file literally named
    /// `%FF.txt`.
    pub fn parse(raw: &str) -> Self {
        let bytes = urlencoding::decode_binary(raw.as_bytes());
        let decoded = String::from_utf8_lossy(&bytes);
        let mut segments: Vec<String> = Vec::new();
        for segment in decoded.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                name => segments.push(name.to_string()),
            }
        }
        Self { segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Path relative to the root without a leading slash, `""` for the root.
    pub fn relative(&self) -> String {
        self.segments.join("/")
    }

    /// Human-readable form, always starting with `/`.
    pub fn display(&self) -> String {
        format!("/{}", self.relative())
    }

    /// Public URL for this path with every segment percent-encoded.
    pub fn url(&self) -> String {
        let encoded: Vec<_> = self
            .segments
            .iter()
            .map(|s| urlencoding::encode(s).into_owned())
            .collect();
        format!("/{}", encoded.join("/"))
    }

    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// `None` at the root, which has no parent.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        let mut segments = self.segments.clone();
        segments.pop();
        Some(Self { segments })
    }

    pub fn join(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Self { segments }
    }

    fn to_relative_path(&self) -> PathBuf {
        self.segments.iter().collect()
    }
}

// --- Served root ---

/// The directory the server exposes. Holds the canonical path so that
/// containment checks compare canonical against canonical.
#[derive(Debug, Clone)]
pub struct ServeRoot {
    path: PathBuf,
}

impl ServeRoot {
    pub fn new(dir: impl AsRef<Path>) -> io::Result<Self> {
        let path = dir.as_ref().canonicalize()?;
        if !path.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("'{}' is not a directory", path.display()),
            ));
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolves `request` to an existing filesystem entry inside the root.
    ///
    /// Anything that does not exist, cannot be canonicalized, or lands
    /// outside the root after following symlinks is reported as
    /// [`ServeError::NotFound`].
    pub async fn resolve(&self, request: &RequestPath) -> Result<PathBuf, ServeError> {
        let joined = self.path.join(request.to_relative_path());
        match fs::canonicalize(&joined).await {
            Ok(canonical) if canonical.starts_with(&self.path) => Ok(canonical),
            Ok(canonical) => {
                warn!(
                    "Path '{}' resolved to '{}' which is outside root '{}'",
                    request.display(),
                    canonical.display(),
                    self.path.display()
                );
                Err(ServeError::not_found())
            }
            Err(e) => {
                debug!("Could not resolve '{}': {}", joined.display(), e);
                Err(ServeError::not_found())
            }
        }
    }
}
