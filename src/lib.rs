//! The supporting library for `snakediff`.
//!
//! The heart of the library is [diff], a linear-space implementation of Myers' difference
//! algorithm over arbitrary slices. The remaining modules exist to support the `snakediff` binary:
//! splitting text into tokens, loading the config and rendering edit scripts.

pub mod cli;
pub mod config;
mod diagonals;
pub mod diff;
pub mod input_processing;
pub mod position;
pub mod render;

#[cfg(test)]
mod test_utils;

use anyhow::{Context, Result};
use log::debug;
use std::{fs, path::PathBuf};

/// A text document read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// The path the document was read from.
    pub path: PathBuf,
    /// The full text of the document.
    pub text: String,
}

impl Document {
    /// A printable name for the document.
    pub fn filename(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

/// Read a document from a path.
///
/// The document has to be valid UTF-8.
pub fn read_document(path: PathBuf) -> Result<Document> {
    debug!("Reading {} to string", path.display());
    let text = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(Document { path, text })
}
