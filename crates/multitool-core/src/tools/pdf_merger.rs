//! PDF Merger tool

use super::page_selection::{parse_page_selection, PageSelector};
use super::pdf::{MergeInput, PdfBackend};
use crate::error::{CoreError, CoreResult};
use crate::tool::{load_icon, FileDropper, Icon, Section, Surface, Tool, ToolCategory};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use tracing::{info, warn};

pub const NAME: &str = "PDF Merger";
pub const DESCRIPTION: &str = "Combine and reorder PDFs with page selection";
pub const ICON_ASSET: &str = "pdf.svg";

const HELP: &str = "Drop PDF files here. Select pages with ranges (2-5), single pages (8), \
                    open ranges (12-) or exclusions (!10).";

/// A queued document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfItem {
    pub path: PathBuf,
    pub pages: Vec<PageSelector>,
    /// 0 when the page count could not be read
    pub page_count: u32,
}

impl PdfItem {
    /// Page selection as typed, e.g. `1-5, !3`
    #[must_use]
    pub fn page_selection(&self) -> String {
        self.pages
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn label(&self) -> String {
        let name = self
            .path
            .file_name()
            .map_or_else(|| self.path.display().to_string(), |n| n.to_string_lossy().into_owned());
        if self.page_count > 0 {
            format!("{name} ({} pages)", self.page_count)
        } else {
            name
        }
    }
}

/// Ordered queue of PDFs to combine into one document
pub struct PdfMergerTool {
    backend: Arc<dyn PdfBackend>,
    icon_path: PathBuf,
    icon: OnceLock<Icon>,
    queue: Mutex<Vec<PdfItem>>,
}

impl PdfMergerTool {
    #[must_use]
    pub fn new(backend: Arc<dyn PdfBackend>, icon_path: PathBuf) -> Self {
        Self {
            backend,
            icon_path,
            icon: OnceLock::new(),
            queue: Mutex::default(),
        }
    }

    /// Queue a document, reading its page count
    ///
    /// A count the backend cannot read is logged and recorded as 0.
    pub fn add_file(&self, path: impl Into<PathBuf>) {
        let path = path.into();
        let page_count = self.backend.page_count(&path).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "Failed to count pages");
            0
        });
        self.lock().push(PdfItem {
            path,
            pages: Vec::new(),
            page_count,
        });
    }

    /// Snapshot of the queue
    #[must_use]
    pub fn items(&self) -> Vec<PdfItem> {
        self.lock().clone()
    }

    /// Remove the item at `index`, if there is one
    pub fn remove(&self, index: usize) -> Option<PdfItem> {
        let mut queue = self.lock();
        (index < queue.len()).then(|| queue.remove(index))
    }

    /// Swap the item with the one before it; false when it cannot move
    pub fn move_up(&self, index: usize) -> bool {
        let mut queue = self.lock();
        if index == 0 || index >= queue.len() {
            return false;
        }
        queue.swap(index, index - 1);
        true
    }

    /// Swap the item with the one after it; false when it cannot move
    pub fn move_down(&self, index: usize) -> bool {
        let mut queue = self.lock();
        if index >= queue.len().saturating_sub(1) {
            return false;
        }
        queue.swap(index, index + 1);
        true
    }

    /// Parse and store the page selection for one item
    ///
    /// # Errors
    /// Returns `Validation` for a malformed selection or an index outside
    /// the queue; the item is left unchanged
    pub fn set_page_selection(&self, index: usize, selection: &str) -> CoreResult<()> {
        let pages = parse_page_selection(selection)?;
        let mut queue = self.lock();
        let item = queue
            .get_mut(index)
            .ok_or_else(|| CoreError::Validation(format!("No file at position {}", index + 1)))?;
        item.pages = pages;
        Ok(())
    }

    /// Merge the queue, in order, into `output`
    ///
    /// Returns the number of documents merged.
    ///
    /// # Errors
    /// Returns `Validation` when the queue is empty or `output` is empty,
    /// and `Pdf` when the backend fails
    pub fn merge(&self, output: &Path) -> CoreResult<usize> {
        let inputs: Vec<MergeInput> = self
            .lock()
            .iter()
            .map(|item| MergeInput {
                path: item.path.clone(),
                pages: item.pages.clone(),
            })
            .collect();

        if inputs.is_empty() {
            return Err(CoreError::Validation(
                "Please add at least one PDF file".to_string(),
            ));
        }
        if output.as_os_str().is_empty() {
            return Err(CoreError::Validation(
                "Please select an output file location".to_string(),
            ));
        }

        self.backend
            .merge(&inputs, output)
            .map_err(|e| CoreError::Pdf(e.to_string()))?;
        info!(files = inputs.len(), output = %output.display(), "Merged PDFs");
        Ok(inputs.len())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<PdfItem>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Strip the leading slash some toolkits put before a Windows drive letter
/// (`/C:/docs/a.pdf`)
#[must_use]
pub fn normalize_dropped_path(raw: &str) -> &str {
    match raw.as_bytes() {
        [b'/', drive, b':', ..] if drive.is_ascii_alphabetic() => &raw[1..],
        _ => raw,
    }
}

fn is_pdf(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

impl Tool for PdfMergerTool {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Files
    }

    fn icon(&self) -> Icon {
        self.icon.get_or_init(|| load_icon(&self.icon_path)).clone()
    }

    fn ui_surface(&self) -> Surface {
        let items = self.items();
        let mut files = Section::new("Files");
        if items.is_empty() {
            files = files.line("No files queued.");
        }
        for (i, item) in items.iter().enumerate() {
            let selection = item.page_selection();
            files = if selection.is_empty() {
                files.line(format!("{}. {}", i + 1, item.label()))
            } else {
                files.line(format!("{}. {} [{selection}]", i + 1, item.label()))
            };
        }

        Surface::new(NAME)
            .section(files)
            .section(Section::new("Help").line(HELP))
    }

    fn as_file_dropper(&self) -> Option<&dyn FileDropper> {
        Some(self)
    }
}

impl FileDropper for PdfMergerTool {
    fn on_files_dropped(&self, paths: &[String]) -> usize {
        let mut accepted = 0;
        for raw in paths {
            let path = Path::new(normalize_dropped_path(raw));
            if is_pdf(path) {
                self.add_file(path);
                accepted += 1;
            }
        }
        accepted
    }
}
