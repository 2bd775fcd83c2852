//! Generic parameters functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::de::DeserializeOwned;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use thiserror::Error;
use toml;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// An error that occurs during loading of a parameter file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Cannot load the parameter file {0:?}: {1}")]
    FileLoadError(PathBuf, std::io::Error),

    #[error("Cannot read the parameter file {0:?}: {1}")]
    DeserialiseError(PathBuf, toml::de::Error),
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Load a parameter file.
///
/// The path is used as given, relative paths resolve against the working directory.
pub fn load<P, F>(param_file_path: F) -> Result<P, LoadError>
where
    P: DeserializeOwned,
    F: AsRef<Path>,
{
    let path = param_file_path.as_ref().to_path_buf();

    // Load the file into a string
    let params_str = match read_to_string(&path) {
        Ok(s) => s,
        Err(e) => return Err(LoadError::FileLoadError(path, e)),
    };

    from_str(&params_str).map_err(|e| LoadError::DeserialiseError(path, e))
}

/// Parse parameters from a TOML string.
pub fn from_str<P>(params_str: &str) -> Result<P, toml::de::Error>
where
    P: DeserializeOwned,
{
    toml::from_str(params_str)
}

#[cfg(test)]
mod test {
    use super::*;
    use serde::Deserialize;
    use std::io::Write;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Dummy {
        gain: f64,
        #[serde(default)]
        name: String,
    }

    #[test]
    fn test_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "gain = 2.5").unwrap();

        let params: Dummy = load(file.path()).unwrap();
        assert_eq!(
            params,
            Dummy {
                gain: 2.5,
                name: String::new()
            }
        );
    }

    #[test]
    fn test_load_errors() {
        let missing = load::<Dummy, _>("this/file/does/not/exist.toml");
        assert!(matches!(missing, Err(LoadError::FileLoadError(..))));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "gain = \"high\"").unwrap();
        let bad = load::<Dummy, _>(file.path());
        assert!(matches!(bad, Err(LoadError::DeserialiseError(..))));
    }
}
