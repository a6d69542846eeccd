//! Built-in tools

pub mod network_switcher;
pub mod page_selection;
pub mod pdf;
pub mod pdf_merger;

pub use network_switcher::NetworkSwitcherTool;
pub use page_selection::{parse_page_selection, resolve_pages, PageSelector, PageSpan};
pub use pdf::{MergeInput, PdfBackend, PdfError, UnavailablePdfBackend};
pub use pdf_merger::{PdfItem, PdfMergerTool};

use crate::config::AppConfig;
use crate::service::ProfileService;
use crate::tool::{Icon, Tool, ToolCategory, ToolDescriptor, ToolRegistry};
use std::sync::Arc;

pub const PDF_MERGER: &str = pdf_merger::NAME;
pub const NETWORK_SWITCHER: &str = network_switcher::NAME;

/// Register the built-in tools: PDF Merger, then Network Switcher
///
/// Descriptors use static metadata, so nothing is constructed here.
pub fn register_default_tools(
    registry: &ToolRegistry,
    profiles: Arc<ProfileService>,
    pdf: Arc<dyn PdfBackend>,
    config: &AppConfig,
) {
    let icon_path = config.asset_path(pdf_merger::ICON_ASSET);
    registry.register(ToolDescriptor::new(
        PDF_MERGER,
        ToolCategory::Files,
        Icon::Theme("document"),
        move || Arc::new(PdfMergerTool::new(Arc::clone(&pdf), icon_path.clone())) as Arc<dyn Tool>,
    ));

    registry.register(ToolDescriptor::new(
        NETWORK_SWITCHER,
        ToolCategory::Network,
        Icon::Default,
        move || Arc::new(NetworkSwitcherTool::new(Arc::clone(&profiles))) as Arc<dyn Tool>,
    ));
}
