//! Local file system catalog

use std::fs;
use std::io;
use std::path::Path;

use crate::application::ports::FileCatalog;

#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFiles;

impl LocalFiles {
    pub fn new() -> Self {
        Self
    }
}

impl FileCatalog for LocalFiles {
    fn stems(&self, dir: &Path, extensions: &[&str]) -> Vec<String> {
        let Ok(entries) = fs::read_dir(dir) else {
            return Vec::new();
        };

        entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| !t.is_dir()).unwrap_or(false))
            .filter_map(|entry| {
                let path = entry.path();
                let ext = path.extension()?.to_str()?.to_ascii_lowercase();
                if !extensions.contains(&ext.as_str()) {
                    return None;
                }
                path.file_stem()?.to_str().map(str::to_string)
            })
            .collect()
    }

    fn exists(&self, path: &Path) -> bool {
        // dangling symlinks count as taken
        path.symlink_metadata().is_ok()
    }

    fn ensure_dir(&self, dir: &Path) -> io::Result<()> {
        fs::create_dir_all(dir)
    }
}
