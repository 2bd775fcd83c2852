//! Struct archiving functionality
//!
//! To add archiving functionality to a struct implement the `Archived` trait.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use csv::WriterBuilder;
pub use csv::Writer;
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;

// Internal imports
use crate::session::Session;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// An object used to write CSV archive files.
pub struct Archiver {
    path: PathBuf,
    writer: Writer<File>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors which can occur while archiving.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Cannot create the archive file {0:?}: {1}")]
    CreateError(PathBuf, std::io::Error),

    #[error("Cannot write a record to {0:?}: {1}")]
    WriteError(PathBuf, csv::Error),

    #[error("Cannot flush the archive {0:?}: {1}")]
    FlushError(PathBuf, std::io::Error),
}

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// A trait which enables a struct to be archived as csv.
///
/// Implementors usually hold one `Archiver` per output file, set up in their `new` function.
pub trait Archived {
    /// The data written by one call to `write`.
    type Data: ?Sized;

    /// Write the archives for the given data
    fn write(&mut self, data: &Self::Data) -> Result<(), ArchiveError>;
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Archiver {
    /// Create a new archiver from a paricular path relative to the session's archive root.
    ///
    /// Any missing parent directories are created, an existing file is truncated.
    pub fn from_path<P: AsRef<Path>>(session: &Session, path: P) -> Result<Self, ArchiveError> {
        Self::create(session.arch_root.join(path))
    }

    /// Create a new archiver writing to the given absolute path.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, ArchiveError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ArchiveError::CreateError(path.clone(), e))?;
        }

        let file = File::create(&path).map_err(|e| ArchiveError::CreateError(path.clone(), e))?;

        let writer = WriterBuilder::new().has_headers(true).from_writer(file);

        Ok(Self { path, writer })
    }

    /// Path of the file this archiver writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialise a record into the archive.
    ///
    /// The header row is written along with the first record.
    pub fn serialise<T: Serialize>(&mut self, record: T) -> Result<(), ArchiveError> {
        self.writer
            .serialize(record)
            .map_err(|e| ArchiveError::WriteError(self.path.clone(), e))
    }

    /// Flush any buffered records to disk.
    pub fn flush(&mut self) -> Result<(), ArchiveError> {
        self.writer
            .flush()
            .map_err(|e| ArchiveError::FlushError(self.path.clone(), e))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        index: usize,
        value: f64,
    }

    #[test]
    fn test_archiver_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("rows.csv");

        let mut arch = Archiver::create(&path).unwrap();
        arch.serialise(Row {
            index: 0,
            value: 1.5,
        })
        .unwrap();
        arch.serialise(Row {
            index: 1,
            value: -2.0,
        })
        .unwrap();
        arch.flush().unwrap();

        assert_eq!(arch.path(), path.as_path());
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "index,value\n0,1.5\n1,-2.0\n");
    }
}
