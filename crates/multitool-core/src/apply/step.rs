//! Apply pipeline steps and planning

use crate::profile::{NetworkPriority, Profile};
use serde::Serialize;
use std::fmt;

/// Metric given to the preferred interface (lower wins)
pub const PREFERRED_METRIC: u32 = 10;

/// Metric given to the deprioritized interface
pub const DEPRIORITIZED_METRIC: u32 = 20;

/// Identity of one external mutation in the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplyStep {
    /// Lower the metric of the preferred interface
    PrimaryMetric,
    /// Raise the metric of the other interface
    SecondaryMetric,
    /// Turn the system proxy on
    ProxyEnable,
    /// Write the proxy server address
    ProxyServer,
    /// Turn the system proxy off
    ProxyDisable,
}

impl ApplyStep {
    /// Pipeline phase this step runs in
    #[must_use]
    pub fn phase(self) -> ApplyPhase {
        match self {
            Self::PrimaryMetric => ApplyPhase::SettingPrimaryMetric,
            Self::SecondaryMetric => ApplyPhase::SettingSecondaryMetric,
            Self::ProxyEnable | Self::ProxyServer | Self::ProxyDisable => {
                ApplyPhase::SettingProxyState
            }
        }
    }

    /// Whether the step touches interface metrics (as opposed to the proxy)
    #[must_use]
    pub fn is_metric(self) -> bool {
        matches!(self, Self::PrimaryMetric | Self::SecondaryMetric)
    }
}

impl fmt::Display for ApplyStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PrimaryMetric => "primary metric",
            Self::SecondaryMetric => "secondary metric",
            Self::ProxyEnable => "proxy enable",
            Self::ProxyServer => "proxy server",
            Self::ProxyDisable => "proxy disable",
        };
        f.write_str(name)
    }
}

/// Linear state of an apply run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplyPhase {
    Idle,
    SettingPrimaryMetric,
    SettingSecondaryMetric,
    SettingProxyState,
    Done,
    Failed,
}

/// A single change to the host system
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mutation {
    InterfaceMetric {
        interface: NetworkPriority,
        metric: u32,
    },
    ProxyEnabled {
        enabled: bool,
    },
    ProxyServer {
        server: String,
    },
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InterfaceMetric { interface, metric } => {
                write!(f, "set {interface} metric to {metric}")
            }
            Self::ProxyEnabled { enabled: true } => f.write_str("enable system proxy"),
            Self::ProxyEnabled { enabled: false } => f.write_str("disable system proxy"),
            Self::ProxyServer { server } => write!(f, "set proxy server to {server}"),
        }
    }
}

/// A mutation tagged with its step identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedStep {
    pub step: ApplyStep,
    pub mutation: Mutation,
}

/// Ordered mutations needed to apply `profile`
///
/// Metrics first (preferred interface, then the other one), then the proxy:
/// enable and server when on, only the disable flag when off.
#[must_use]
pub fn plan(profile: &Profile) -> Vec<PlannedStep> {
    let primary = profile.network_priority;
    let mut steps = vec![
        PlannedStep {
            step: ApplyStep::PrimaryMetric,
            mutation: Mutation::InterfaceMetric {
                interface: primary,
                metric: PREFERRED_METRIC,
            },
        },
        PlannedStep {
            step: ApplyStep::SecondaryMetric,
            mutation: Mutation::InterfaceMetric {
                interface: primary.other(),
                metric: DEPRIORITIZED_METRIC,
            },
        },
    ];

    if profile.proxy_enabled {
        steps.push(PlannedStep {
            step: ApplyStep::ProxyEnable,
            mutation: Mutation::ProxyEnabled { enabled: true },
        });
        steps.push(PlannedStep {
            step: ApplyStep::ProxyServer,
            mutation: Mutation::ProxyServer {
                server: profile.proxy_server.clone(),
            },
        });
    } else {
        steps.push(PlannedStep {
            step: ApplyStep::ProxyDisable,
            mutation: Mutation::ProxyEnabled { enabled: false },
        });
    }

    steps
}
