//! Profile applier

use super::configurator::{ConfiguratorError, NetworkConfigurator};
use super::step::{plan, ApplyPhase, ApplyStep, Mutation, PlannedStep};
use crate::error::{CoreError, CoreResult};
use crate::profile::Profile;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{info, warn};

/// Outcome of a successful apply
#[derive(Debug, Clone, Serialize)]
pub struct ApplyReport {
    /// Name of the applied profile
    pub profile: String,
    /// Steps that ran, in order
    pub completed: Vec<ApplyStep>,
    /// Final phase (always `Done` for a returned report)
    pub phase: ApplyPhase,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Applies profiles to the host through a [`NetworkConfigurator`]
///
/// It never reads or writes the profile store. Steps run strictly in order
/// and the first failure ends the run without undoing earlier steps; every
/// step is idempotent, so the whole apply can be retried. Clones share the
/// phase of the most recent run.
#[derive(Clone)]
pub struct ProfileApplier {
    configurator: Arc<dyn NetworkConfigurator>,
    phase: Arc<Mutex<ApplyPhase>>,
}

impl ProfileApplier {
    /// Create an applier over the given configurator
    #[must_use]
    pub fn new(configurator: Arc<dyn NetworkConfigurator>) -> Self {
        Self {
            configurator,
            phase: Arc::new(Mutex::new(ApplyPhase::Idle)),
        }
    }

    /// Phase reached by the most recent run (`Idle` before the first)
    #[must_use]
    pub fn phase(&self) -> ApplyPhase {
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn enter(&self, phase: ApplyPhase) {
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner) = phase;
    }

    /// Ordered mutations `apply` would perform, without performing them
    #[must_use]
    pub fn plan(&self, profile: &Profile) -> Vec<PlannedStep> {
        plan(profile)
    }

    /// Apply every setting of `profile`
    ///
    /// # Errors
    /// Returns `Validation` for an invalid profile (before any step runs), or
    /// `CommandFailed` naming the first step the system rejected
    pub fn apply(&self, profile: &Profile) -> CoreResult<ApplyReport> {
        profile.validate()?;

        let started_at = Utc::now();
        let mut completed = Vec::new();
        self.enter(ApplyPhase::Idle);
        info!(profile = %profile.name, "Applying profile");

        for PlannedStep { step, mutation } in plan(profile) {
            self.enter(step.phase());
            if let Err(err) = self.perform(&mutation) {
                self.enter(ApplyPhase::Failed);
                warn!(
                    profile = %profile.name,
                    %step,
                    failed_in = ?step.phase(),
                    phase = ?ApplyPhase::Failed,
                    error = %err,
                    "Profile apply failed"
                );
                return Err(CoreError::CommandFailed {
                    step,
                    message: err.to_string(),
                });
            }
            info!(profile = %profile.name, %step, "{mutation}");
            completed.push(step);
        }

        self.enter(ApplyPhase::Done);
        info!(profile = %profile.name, steps = completed.len(), "Profile applied");

        Ok(ApplyReport {
            profile: profile.name.clone(),
            completed,
            phase: ApplyPhase::Done,
            started_at,
            finished_at: Utc::now(),
        })
    }

    fn perform(&self, mutation: &Mutation) -> Result<(), ConfiguratorError> {
        match mutation {
            Mutation::InterfaceMetric { interface, metric } => self
                .configurator
                .set_interface_metric(interface.interface_name(), *metric),
            Mutation::ProxyEnabled { enabled } => self.configurator.set_proxy_enabled(*enabled),
            Mutation::ProxyServer { server } => self.configurator.set_proxy_server(server),
        }
    }
}
