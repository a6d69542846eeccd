//! Tool capabilities and the tool registry

pub mod icon;
pub mod registry;
mod types;

pub use icon::load_icon;
pub use registry::{ToolConstructor, ToolDescriptor, ToolRegistry};
pub use types::*;
