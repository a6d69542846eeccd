//! Application context tests
//!
//! Built-in tool registration, file drops, profile edits, and events.

use multitool_core::apply::{ConfiguratorError, NetworkConfigurator};
use multitool_core::profile::{set, NetworkPriority, Profile};
use multitool_core::tools::{MergeInput, PdfBackend, PdfError, NETWORK_SWITCHER, PDF_MERGER};
use multitool_core::{AppConfig, AppContext, AppEvent, ToolCategory};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

struct AcceptAll;

impl NetworkConfigurator for AcceptAll {
    fn set_interface_metric(&self, _: &str, _: u32) -> Result<(), ConfiguratorError> {
        Ok(())
    }
    fn set_proxy_enabled(&self, _: bool) -> Result<(), ConfiguratorError> {
        Ok(())
    }
    fn set_proxy_server(&self, _: &str) -> Result<(), ConfiguratorError> {
        Err(ConfiguratorError::Rejected("registry is read-only".into()))
    }
}

struct TwoPages;

impl PdfBackend for TwoPages {
    fn page_count(&self, _: &Path) -> Result<u32, PdfError> {
        Ok(2)
    }
    fn merge(&self, _: &[MergeInput], _: &Path) -> Result<(), PdfError> {
        Ok(())
    }
}

fn context(dir: &TempDir) -> AppContext {
    AppContext::new(
        AppConfig::with_dirs(dir.path().join("config"), dir.path().join("assets")),
        Arc::new(AcceptAll),
        Arc::new(TwoPages),
    )
}

#[test]
fn test_default_tools_are_registered_lazily() {
    let dir = TempDir::new().unwrap();
    let ctx = context(&dir);

    let names: Vec<_> = ctx
        .registry()
        .all_descriptors()
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(names, vec![PDF_MERGER, NETWORK_SWITCHER]);
    assert!(!ctx.registry().is_instantiated(PDF_MERGER));
    assert!(!ctx.registry().is_instantiated(NETWORK_SWITCHER));

    let categories: Vec<_> = ctx.registry().by_category().into_iter().map(|(c, _)| c).collect();
    assert_eq!(categories, vec![ToolCategory::Files, ToolCategory::Network]);
}

#[test]
fn test_unknown_tool_is_not_found() {
    let dir = TempDir::new().unwrap();
    let ctx = context(&dir);
    let err = ctx.tool("Hex Editor").err().unwrap();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Tool not found: Hex Editor");
}

#[test]
fn test_drop_files_on_pdf_merger() {
    let dir = TempDir::new().unwrap();
    let ctx = context(&dir);
    let mut events = ctx.subscribe();

    let accepted = ctx
        .drop_files(
            PDF_MERGER,
            &["/C:/scans/a.pdf".to_string(), "notes.txt".to_string()],
        )
        .unwrap();
    assert_eq!(accepted, 1);
    assert_eq!(
        events.try_recv().unwrap(),
        AppEvent::ToolInstantiated {
            name: PDF_MERGER.into()
        }
    );

    // Same instance keeps its queue
    ctx.drop_files(PDF_MERGER, &["b.pdf".to_string()]).unwrap();
    let tool = ctx.tool(PDF_MERGER).unwrap();
    let surface = tool.ui_surface().to_string();
    assert!(surface.contains("1. a.pdf (2 pages)"));
    assert!(surface.contains("2. b.pdf (2 pages)"));
}

#[test]
fn test_drop_files_rejected_by_network_switcher() {
    let dir = TempDir::new().unwrap();
    let ctx = context(&dir);
    let err = ctx
        .drop_files(NETWORK_SWITCHER, &["a.pdf".to_string()])
        .unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");
}

#[test]
fn test_edit_publishes_profiles_changed() {
    let dir = TempDir::new().unwrap();
    let ctx = context(&dir);
    let mut events = ctx.subscribe();

    ctx.edit_profiles(|profiles| {
        set::upsert(profiles, None, Profile::new("Lab", NetworkPriority::Ethernet))
    })
    .unwrap();

    assert_eq!(
        events.try_recv().unwrap(),
        AppEvent::ProfilesChanged {
            names: vec!["Wired".into(), "Wi-Fi".into(), "Lab".into()]
        }
    );
    assert_eq!(ctx.tray_menu().unwrap().to_string().matches("  ").count(), 3);
}

#[test]
fn test_apply_publishes_outcome() {
    let dir = TempDir::new().unwrap();
    let ctx = context(&dir);
    let mut events = ctx.subscribe();

    ctx.apply_profile("Wi-Fi").unwrap();
    assert_eq!(
        events.try_recv().unwrap(),
        AppEvent::ProfileApplied {
            name: "Wi-Fi".into()
        }
    );

    let err = ctx.apply_profile("Wired").unwrap_err();
    assert_eq!(err.code(), "COMMAND_FAILED");
    match events.try_recv().unwrap() {
        AppEvent::ProfileApplyFailed { name, step, message } => {
            assert_eq!(name, "Wired");
            assert_eq!(step.map(|s| s.to_string()).as_deref(), Some("proxy server"));
            assert!(message.contains("read-only"));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn test_network_switcher_shares_profile_state() {
    let dir = TempDir::new().unwrap();
    let ctx = context(&dir);

    ctx.edit_profiles(|profiles| set::remove(profiles, "Wired").map(|_| ()))
        .unwrap();
    let tool = ctx.tool(NETWORK_SWITCHER).unwrap();
    let surface = tool.ui_surface().to_string();
    assert!(!surface.contains("Wired"));
    assert!(surface.contains("* Wi-Fi"));
}
