//! Network profiles and their persistence

pub mod set;
pub mod storage;
mod types;

pub use storage::ProfileStore;
pub use types::*;
