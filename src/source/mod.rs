//! Catalog input sources.
//!
//! The catalog is read once at startup, either from a file path or from
//! piped stdin, and parsed at the boundary so the rest of the program
//! only sees a validated [`Catalog`].

use crate::model::error::InputError;
use crate::model::Catalog;
use crate::parser::parse_catalog;
use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use tracing::info;

/// Where the catalog payload comes from.
///
/// Sum type enforces exactly one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// JSON file on disk.
    File(PathBuf),
    /// JSON piped on stdin.
    Stdin,
}

impl InputSource {
    /// Read and parse the catalog.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` for a missing file,
    /// `InputError::Io` for read failures and `InputError::Catalog` when the
    /// payload is invalid.
    pub fn load(&self) -> Result<Catalog, InputError> {
        match self {
            InputSource::File(path) => {
                if !path.exists() {
                    return Err(InputError::FileNotFound { path: path.clone() });
                }
                info!(path = %path.display(), "Loading catalog from file");
                let contents = std::fs::read_to_string(path)?;
                Ok(parse_catalog(&contents)?)
            }
            InputSource::Stdin => {
                info!("Loading catalog from stdin");
                load_from_reader(std::io::stdin().lock())
            }
        }
    }
}

/// Read a whole payload from any reader and parse it.
///
/// # Errors
///
/// Returns `InputError::Io` for read failures and `InputError::Catalog`
/// when the payload is invalid.
pub fn load_from_reader(mut reader: impl Read) -> Result<Catalog, InputError> {
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(parse_catalog(&contents)?)
}

/// Detect the input source.
///
/// # Logic:
/// 1. If a file path is provided: read the file
/// 2. If stdin is piped: read stdin
/// 3. Else: `InputError::NoInput`
///
/// # Errors
///
/// Returns `InputError::NoInput` when no path is given and stdin is an
/// interactive terminal.
pub fn detect_input_source(file: Option<PathBuf>) -> Result<InputSource, InputError> {
    match file {
        Some(path) => Ok(InputSource::File(path)),
        None if std::io::stdin().is_terminal() => Err(InputError::NoInput),
        None => Ok(InputSource::Stdin),
    }
}
