//! File catalog port

use std::io;
use std::path::Path;

/// Port for the directory reads and existence checks naming needs
pub trait FileCatalog: Send + Sync {
    /// Stems of the files in `dir` whose extension is one of `extensions`
    /// (case-insensitive). A missing or unreadable directory yields nothing.
    fn stems(&self, dir: &Path, extensions: &[&str]) -> Vec<String>;

    /// Whether anything exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Create `dir` and its parents if absent
    fn ensure_dir(&self, dir: &Path) -> io::Result<()>;
}
