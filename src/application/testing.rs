//! In-memory doubles for the ports

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::audio::{AudioFormat, PcmSpec};

use super::ports::{
    AudioFileWriter, CaptureDevice, CaptureError, CaptureStream, ChunkSink, FileCatalog, SaveError,
};

/// Delivers a fixed list of chunks whenever it is opened
#[derive(Clone, Default)]
pub struct MockDevice {
    pub chunks: Arc<Mutex<Vec<Vec<i16>>>>,
    pub fail_open: Arc<AtomicBool>,
    pub fail_close: Arc<AtomicBool>,
    pub opened: Arc<AtomicUsize>,
    pub closed: Arc<AtomicUsize>,
}

impl MockDevice {
    pub fn delivering(chunks: Vec<Vec<i16>>) -> Self {
        let device = Self::default();
        *device.chunks.lock().unwrap() = chunks;
        device
    }

    pub fn failing() -> Self {
        let device = Self::default();
        device.fail_open.store(true, Ordering::SeqCst);
        device
    }

    pub fn set_chunks(&self, chunks: Vec<Vec<i16>>) {
        *self.chunks.lock().unwrap() = chunks;
    }
}

struct MockStream {
    closed: Arc<AtomicUsize>,
    fail_close: bool,
}

impl CaptureStream for MockStream {
    fn close(self: Box<Self>) -> Result<(), CaptureError> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        if self.fail_close {
            return Err(CaptureError::Device("capture thread panicked".to_string()));
        }
        Ok(())
    }
}

impl CaptureDevice for MockDevice {
    fn open(&self, _spec: PcmSpec, sink: ChunkSink) -> Result<Box<dyn CaptureStream>, CaptureError> {
        if self.fail_open.load(Ordering::SeqCst) {
            return Err(CaptureError::Device("device busy".to_string()));
        }
        self.opened.fetch_add(1, Ordering::SeqCst);
        for chunk in self.chunks.lock().unwrap().iter() {
            sink.push(chunk.clone());
        }
        sink.warn("input overflow");
        Ok(Box::new(MockStream {
            closed: Arc::clone(&self.closed),
            fail_close: self.fail_close.load(Ordering::SeqCst),
        }))
    }
}

/// Directory tree kept in memory: dir -> file names
#[derive(Clone, Default)]
pub struct MockCatalog {
    pub files: Arc<Mutex<BTreeMap<PathBuf, BTreeSet<String>>>>,
    pub created_dirs: Arc<Mutex<Vec<PathBuf>>>,
    pub fail_ensure: Arc<AtomicBool>,
}

impl MockCatalog {
    pub fn with_files(dir: impl AsRef<Path>, names: &[&str]) -> Self {
        let catalog = Self::default();
        for name in names {
            catalog.add(dir.as_ref(), name);
        }
        catalog
    }

    pub fn add(&self, dir: &Path, name: &str) {
        self.files
            .lock()
            .unwrap()
            .entry(dir.to_path_buf())
            .or_default()
            .insert(name.to_string());
    }
}

impl FileCatalog for MockCatalog {
    fn stems(&self, dir: &Path, extensions: &[&str]) -> Vec<String> {
        let files = self.files.lock().unwrap();
        let Some(names) = files.get(dir) else {
            return Vec::new();
        };
        names
            .iter()
            .filter_map(|name| {
                let path = Path::new(name);
                let ext = path.extension()?.to_str()?.to_ascii_lowercase();
                if extensions.contains(&ext.as_str()) {
                    path.file_stem()?.to_str().map(str::to_string)
                } else {
                    None
                }
            })
            .collect()
    }

    fn exists(&self, path: &Path) -> bool {
        let (Some(dir), Some(name)) = (path.parent(), path.file_name().and_then(|n| n.to_str()))
        else {
            return false;
        };
        self.files
            .lock()
            .unwrap()
            .get(dir)
            .is_some_and(|names| names.contains(name))
    }

    fn ensure_dir(&self, dir: &Path) -> io::Result<()> {
        if self.fail_ensure.load(Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
        }
        self.created_dirs.lock().unwrap().push(dir.to_path_buf());
        Ok(())
    }
}

/// Records writes into a `MockCatalog`, or fails on demand
#[derive(Clone, Default)]
pub struct MockWriter {
    pub catalog: MockCatalog,
    pub fail: Arc<AtomicBool>,
    pub written: Arc<Mutex<Vec<(PathBuf, AudioFormat, Vec<i16>)>>>,
}

impl MockWriter {
    pub fn writing_to(catalog: MockCatalog) -> Self {
        Self {
            catalog,
            ..Default::default()
        }
    }
}

impl AudioFileWriter for MockWriter {
    fn write(
        &self,
        samples: &[i16],
        _spec: PcmSpec,
        format: AudioFormat,
        target: &Path,
    ) -> Result<(), SaveError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(SaveError::Write("disk full".to_string()));
        }
        if self.catalog.exists(target) {
            return Err(SaveError::Write(format!("{} exists", target.display())));
        }
        if let (Some(dir), Some(name)) = (target.parent(), target.file_name()) {
            self.catalog.add(dir, &name.to_string_lossy());
        }
        self.written
            .lock()
            .unwrap()
            .push((target.to_path_buf(), format, samples.to_vec()));
        Ok(())
    }
}
