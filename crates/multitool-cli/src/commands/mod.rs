//! CLI command handlers
//!
//! One module per subcommand group.

pub mod profile;
pub mod tools;
pub mod tray;
