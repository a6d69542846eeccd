//! MultiTool Core - Tool registry, network profiles, and profile applier
//!
//! This crate provides the lazily-built tool registry, the JSON profile
//! store, and the applier that pushes a profile onto the host network
//! configuration.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod apply;
pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod profile;
pub mod service;
pub mod tool;
pub mod tools;
pub mod tray;

pub use apply::{ApplyReport, ProfileApplier};
pub use config::AppConfig;
pub use context::AppContext;
pub use error::{CoreError, CoreResult};
pub use events::{AppEvent, EventBus};
pub use profile::{NetworkPriority, Profile, ProfileStore};
pub use tool::{Tool, ToolCategory, ToolRegistry};
pub use tray::TrayMenu;
