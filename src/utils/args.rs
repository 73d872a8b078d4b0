//! Utilities related to the parsing of arguments.

use std::path::PathBuf;

/// Utility method to parse a path passed in on the command line and ensure
/// that something exists at that path.
pub fn existing_path(raw: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(raw);

    match path.exists() {
        true => Ok(path),
        false => Err(format!("{} does not exist", raw)),
    }
}
