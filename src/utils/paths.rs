//! Project-root anchored path resolution
//!
//! Configuration files are always looked up relative to a fixed project
//! root, never the process working directory. The root is captured once
//! when a `ProjectRoot` is constructed and does not change afterwards.

use std::path::{Path, PathBuf};

/// The directory all relative configuration lookups are anchored to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoot {
    root: PathBuf,
}

impl ProjectRoot {
    /// Anchor lookups at an explicit directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Anchor lookups at the crate manifest directory, captured at compile
    /// time so the result is independent of the caller's working directory.
    pub fn from_manifest() -> Self {
        Self::new(env!("CARGO_MANIFEST_DIR"))
    }

    pub fn as_path(&self) -> &Path {
        &self.root
    }

    /// Join path segments onto the project root.
    pub fn join_from_root<I, S>(&self, segments: I) -> PathBuf
    where
        I: IntoIterator<Item = S>,
        S: AsRef<Path>,
    {
        let mut path = self.root.clone();
        for segment in segments {
            path.push(segment);
        }
        path
    }

    /// Express `path` relative to the root. Returns an empty path when
    /// `path` does not live under the root.
    pub fn rel_from_root(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }
}

impl Default for ProjectRoot {
    fn default() -> Self {
        Self::from_manifest()
    }
}

/// Directory containing the source file `source_file`, as reported by
/// `file!()`. Relative compiler paths are anchored under the manifest root.
pub fn caller_dir(source_file: &str) -> PathBuf {
    let file = Path::new(source_file);
    let dir = file.parent().unwrap_or_else(|| Path::new(""));
    if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        Path::new(env!("CARGO_MANIFEST_DIR")).join(dir)
    }
}

/// Like [`caller_dir`], but relative to `root`. Returns an empty path when
/// the caller's directory is outside the root.
pub fn caller_rel_dir(root: &ProjectRoot, source_file: &str) -> PathBuf {
    root.rel_from_root(&caller_dir(source_file))
}

/// Directory of the invoking source file.
#[macro_export]
macro_rules! own_path {
    () => {
        $crate::utils::paths::caller_dir(::std::file!())
    };
}

/// Directory of the invoking source file, relative to the given
/// [`ProjectRoot`](crate::utils::paths::ProjectRoot). Empty when the caller
/// lives outside the root.
#[macro_export]
macro_rules! own_rel_path {
    ($root:expr) => {
        $crate::utils::paths::caller_rel_dir($root, ::std::file!())
    };
}
