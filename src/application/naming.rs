//! Name sequencer: proposes the next numeric file name

use std::path::{Path, PathBuf};

use crate::domain::audio::AudioFormat;
use crate::domain::naming::next_in_sequence;

use super::ports::FileCatalog;

/// Next name for `scan_dir`: one past the largest all-digit stem among
/// files with a supported extension, never below `floor`.
///
/// A missing or unreadable directory yields `floor`.
pub fn compute_next_name<C>(catalog: &C, scan_dir: &Path, extensions: &[&str], floor: u64) -> String
where
    C: FileCatalog + ?Sized,
{
    next_in_sequence(catalog.stems(scan_dir, extensions), floor).to_string()
}

/// Scan directory and floor the suggestion is derived from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameSequencer {
    scan_dir: PathBuf,
    floor: u64,
    extensions: Vec<&'static str>,
}

impl NameSequencer {
    /// Counts files of every supported format, not just the selected one
    pub fn new(scan_dir: impl Into<PathBuf>, floor: u64) -> Self {
        Self {
            scan_dir: scan_dir.into(),
            floor,
            extensions: AudioFormat::all_extensions(),
        }
    }

    pub fn scan_dir(&self) -> &Path {
        &self.scan_dir
    }

    pub fn floor(&self) -> u64 {
        self.floor
    }

    pub fn set_scan_dir(&mut self, scan_dir: impl Into<PathBuf>) {
        self.scan_dir = scan_dir.into();
    }

    pub fn next_name<C: FileCatalog + ?Sized>(&self, catalog: &C) -> String {
        compute_next_name(catalog, &self.scan_dir, &self.extensions, self.floor)
    }
}
