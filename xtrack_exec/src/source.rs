//! # Record source
//!
//! Reads trajectory records from headed CSV files. Every column is kept as raw text, any
//! interpretation is left to the analysis.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use csv::ReaderBuilder;
use log::debug;
use thiserror::Error;

use crate::record::TrajectoryRecord;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Name used in errors for records which do not come from a file
const READER_ORIGIN: &str = "<reader>";

// ------------------------------------------------------------------------------------------------
// ENUMERATIONS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Cannot open {0:?}: {1}")]
    Open(PathBuf, std::io::Error),

    #[error("Malformed CSV data: {0}")]
    Csv(#[from] csv::Error),

    #[error("{0:?} has no header row")]
    NoHeader(PathBuf),
}

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Load every record of a CSV file.
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<TrajectoryRecord>, SourceError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| SourceError::Open(path.to_path_buf(), e))?;

    let records = read_records(file, path)?;
    debug!("Loaded {} records from {:?}", records.len(), path);

    Ok(records)
}

/// Read records from any CSV source.
pub fn records_from_reader<R: Read>(reader: R) -> Result<Vec<TrajectoryRecord>, SourceError> {
    read_records(reader, Path::new(READER_ORIGIN))
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

fn read_records<R: Read>(reader: R, origin: &Path) -> Result<Vec<TrajectoryRecord>, SourceError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(SourceError::NoHeader(origin.to_path_buf()));
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;

        // Cells past the header are ignored, missing trailing cells leave the field absent
        records.push(
            headers
                .iter()
                .zip(row.iter())
                .filter(|(h, _)| !h.is_empty())
                .map(|(h, v)| (h.as_str(), v))
                .collect(),
        );
    }

    Ok(records)
}
