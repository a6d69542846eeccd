//! Profile operations shared by the context and the network tool

use crate::apply::{ApplyReport, PlannedStep, ProfileApplier};
use crate::error::{CoreError, CoreResult};
use crate::events::{AppEvent, EventBus};
use crate::profile::{set, Profile, ProfileStore};
use crate::tray::TrayMenu;
use tracing::warn;

/// Store, applier and event bus bundled behind one API
pub struct ProfileService {
    store: ProfileStore,
    applier: ProfileApplier,
    events: EventBus,
}

impl ProfileService {
    #[must_use]
    pub fn new(store: ProfileStore, applier: ProfileApplier, events: EventBus) -> Self {
        Self {
            store,
            applier,
            events,
        }
    }

    #[must_use]
    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    /// Load the profile set (seeding defaults on first use)
    ///
    /// # Errors
    /// Propagates store errors
    pub fn profiles(&self) -> CoreResult<Vec<Profile>> {
        self.store.load_all()
    }

    /// Look up one profile
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown name, or store errors
    pub fn profile(&self, name: &str) -> CoreResult<Profile> {
        let profiles = self.store.load_all()?;
        set::find(&profiles, name).cloned()
    }

    /// Edit the set and save it, then announce the new set
    ///
    /// # Errors
    /// Propagates store and closure errors; nothing is saved on error
    pub fn edit<T, F>(&self, edit: F) -> CoreResult<T>
    where
        F: FnOnce(&mut Vec<Profile>) -> CoreResult<T>,
    {
        let (value, saved) = self.store.update(edit)?;
        self.events.publish(AppEvent::ProfilesChanged {
            names: saved.into_iter().map(|p| p.name).collect(),
        });
        Ok(value)
    }

    /// Mutations applying `name` would perform
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown name, or store errors
    pub fn plan(&self, name: &str) -> CoreResult<Vec<PlannedStep>> {
        let profile = self.profile(name)?;
        Ok(self.applier.plan(&profile))
    }

    /// Apply the named profile and announce the outcome
    ///
    /// # Errors
    /// Returns `NotFound`, store errors, or the applier's error
    pub fn apply(&self, name: &str) -> CoreResult<ApplyReport> {
        let profile = self.profile(name)?;
        match self.applier.apply(&profile) {
            Ok(report) => {
                self.events.publish(AppEvent::ProfileApplied {
                    name: profile.name,
                });
                Ok(report)
            }
            Err(err) => {
                warn!(profile = %profile.name, error = %err, "Failed to apply profile");
                let step = match &err {
                    CoreError::CommandFailed { step, .. } => Some(*step),
                    _ => None,
                };
                self.events.publish(AppEvent::ProfileApplyFailed {
                    name: profile.name,
                    step,
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Tray menu for the current profile set
    ///
    /// # Errors
    /// Propagates store errors
    pub fn tray_menu(&self) -> CoreResult<TrayMenu> {
        Ok(TrayMenu::build(&self.store.load_all()?))
    }
}
