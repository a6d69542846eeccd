//! Network profile types

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default proxy address of the seeded wired profile
pub const DEFAULT_PROXY_SERVER: &str = "10.0.0.1:8080";

/// Interface class that should carry traffic preferentially
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkPriority {
    /// Wired adapter
    Ethernet,
    /// Wireless adapter
    #[serde(rename = "Wi-Fi")]
    WiFi,
}

impl NetworkPriority {
    /// OS interface name targeted by metric changes
    #[must_use]
    pub fn interface_name(self) -> &'static str {
        match self {
            Self::Ethernet => "Ethernet",
            Self::WiFi => "Wi-Fi",
        }
    }

    /// The interface class that gets deprioritized
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::Ethernet => Self::WiFi,
            Self::WiFi => Self::Ethernet,
        }
    }
}

impl fmt::Display for NetworkPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.interface_name())
    }
}

impl FromStr for NetworkPriority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ethernet" | "wired" => Ok(Self::Ethernet),
            "wi-fi" | "wifi" | "wireless" => Ok(Self::WiFi),
            _ => Err(CoreError::Validation(format!(
                "Invalid network priority: {} (expected Ethernet or Wi-Fi)",
                s.trim()
            ))),
        }
    }
}

/// A named bundle of network priority and proxy settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Unique profile name
    pub name: String,
    /// Interface class to prefer
    pub network_priority: NetworkPriority,
    /// Whether the system proxy is turned on
    pub proxy_enabled: bool,
    /// `host:port`, only meaningful when the proxy is enabled
    pub proxy_server: String,
}

impl Profile {
    /// Create a profile with the proxy disabled
    #[must_use]
    pub fn new(name: impl Into<String>, network_priority: NetworkPriority) -> Self {
        Self {
            name: name.into(),
            network_priority,
            proxy_enabled: false,
            proxy_server: String::new(),
        }
    }

    /// Enable the proxy with the given server
    #[must_use]
    pub fn with_proxy(mut self, server: impl Into<String>) -> Self {
        self.proxy_enabled = true;
        self.proxy_server = server.into();
        self
    }

    /// Check the profile can be persisted and applied
    ///
    /// # Errors
    /// Returns `Validation` for an empty name or a malformed proxy server
    pub fn validate(&self) -> CoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation("Profile name cannot be empty".into()));
        }
        if self.proxy_enabled {
            validate_proxy_server(&self.proxy_server)?;
        }
        Ok(())
    }
}

/// The two profiles written on first launch
#[must_use]
pub fn default_profiles() -> Vec<Profile> {
    vec![
        Profile::new("Wired", NetworkPriority::Ethernet).with_proxy(DEFAULT_PROXY_SERVER),
        Profile::new("Wi-Fi", NetworkPriority::WiFi),
    ]
}

/// Validate a `host:port` proxy address
///
/// # Errors
/// Returns `Validation` when the host is empty or the port is not in 1..=65535
pub fn validate_proxy_server(server: &str) -> CoreResult<()> {
    let (host, port) = server
        .trim()
        .rsplit_once(':')
        .ok_or_else(|| CoreError::Validation(format!("Proxy server must be host:port, got '{server}'")))?;

    if host.is_empty() || host.contains(char::is_whitespace) {
        return Err(CoreError::Validation(format!(
            "Proxy server has an invalid host: '{server}'"
        )));
    }

    match port.parse::<u16>() {
        Ok(p) if p > 0 => Ok(()),
        _ => Err(CoreError::Validation(format!(
            "Proxy server has an invalid port: '{server}'"
        ))),
    }
}
