//! PDF document access used by the merger

use super::page_selection::PageSelector;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("No PDF backend is available")]
    Unavailable,

    #[error("Cannot read PDF {path}: {message}")]
    Document { path: PathBuf, message: String },

    #[error("Merge failed: {0}")]
    Merge(String),
}

/// One document to merge and the pages to take from it
///
/// An empty `pages` list means every page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeInput {
    pub path: PathBuf,
    pub pages: Vec<PageSelector>,
}

/// PDF reading and writing
pub trait PdfBackend: Send + Sync {
    /// Number of pages in the document at `path`
    ///
    /// # Errors
    /// Returns `PdfError` when the document cannot be opened or parsed
    fn page_count(&self, path: &Path) -> Result<u32, PdfError>;

    /// Write the selected pages of `inputs`, in order, to `output`
    ///
    /// # Errors
    /// Returns `PdfError` when any input cannot be read or the output cannot
    /// be written
    fn merge(&self, inputs: &[MergeInput], output: &Path) -> Result<(), PdfError>;
}

/// Backend for builds without PDF support; every call fails
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailablePdfBackend;

impl PdfBackend for UnavailablePdfBackend {
    fn page_count(&self, _path: &Path) -> Result<u32, PdfError> {
        Err(PdfError::Unavailable)
    }

    fn merge(&self, _inputs: &[MergeInput], _output: &Path) -> Result<(), PdfError> {
        Err(PdfError::Unavailable)
    }
}
