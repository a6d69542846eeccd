//! Host network configuration seam

use std::io;
use thiserror::Error;

/// Errors reported by a network configurator
#[derive(Error, Debug)]
pub enum ConfiguratorError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} exited with {status}: {output}")]
    Exit {
        program: String,
        status: String,
        output: String,
    },

    #[error("{0}")]
    Rejected(String),
}

/// The operations the applier needs from the host system
///
/// Each call is expected to be idempotent: setting the same value twice
/// leaves the system unchanged.
pub trait NetworkConfigurator: Send + Sync {
    /// Set the routing metric of the named interface
    ///
    /// # Errors
    /// Returns an error if the system rejects the change
    fn set_interface_metric(&self, interface: &str, metric: u32) -> Result<(), ConfiguratorError>;

    /// Turn the system proxy on or off
    ///
    /// # Errors
    /// Returns an error if the system rejects the change
    fn set_proxy_enabled(&self, enabled: bool) -> Result<(), ConfiguratorError>;

    /// Write the system proxy server address
    ///
    /// # Errors
    /// Returns an error if the system rejects the change
    fn set_proxy_server(&self, server: &str) -> Result<(), ConfiguratorError>;
}
