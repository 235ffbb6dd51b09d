//! File system adapters

pub mod local_files;

pub use local_files::LocalFiles;
