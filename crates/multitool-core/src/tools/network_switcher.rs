//! Network Switcher tool

use crate::apply::ApplyReport;
use crate::error::{CoreError, CoreResult};
use crate::service::ProfileService;
use crate::tool::{Icon, Section, Surface, Tool, ToolCategory};
use std::sync::{Arc, Mutex, PoisonError};

pub const NAME: &str = "Network Switcher";
pub const DESCRIPTION: &str = "Manage and apply network configuration profiles";
pub const ADMIN_NOTE: &str =
    "NOTE: This tool requires the application to be run with Administrator privileges.";
pub const NO_SELECTION: &str = "No profile selected.";
pub const METRIC_HINT: &str = "Changing interface metrics requires Administrator privileges.";

/// Picks a profile and applies it
pub struct NetworkSwitcherTool {
    profiles: Arc<ProfileService>,
    selected: Mutex<Option<String>>,
    status: Mutex<String>,
}

impl NetworkSwitcherTool {
    #[must_use]
    pub fn new(profiles: Arc<ProfileService>) -> Self {
        Self {
            profiles,
            selected: Mutex::new(None),
            status: Mutex::new(String::new()),
        }
    }

    /// Select a profile by name
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown name
    pub fn select(&self, name: &str) -> CoreResult<()> {
        let profile = self.profiles.profile(name)?;
        *self.selected.lock().unwrap_or_else(PoisonError::into_inner) = Some(profile.name);
        Ok(())
    }

    #[must_use]
    pub fn selected(&self) -> Option<String> {
        self.selected
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Last status message shown under the profile list
    #[must_use]
    pub fn status(&self) -> String {
        self.status
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Apply the selected profile
    ///
    /// # Errors
    /// Returns `Validation` when nothing is selected, otherwise as
    /// [`Self::apply`]
    pub fn apply_selected(&self) -> CoreResult<ApplyReport> {
        let Some(name) = self.selected() else {
            self.set_status(NO_SELECTION.to_string());
            return Err(CoreError::Validation(NO_SELECTION.to_string()));
        };
        self.apply(&name)
    }

    /// Apply a profile by name and record the outcome as the status
    ///
    /// # Errors
    /// Returns `NotFound`, store errors, or `CommandFailed`
    pub fn apply(&self, name: &str) -> CoreResult<ApplyReport> {
        let result = self.profiles.apply(name);
        self.set_status(match &result {
            Ok(report) => format!("Profile '{}' applied successfully.", report.profile),
            Err(e) => failure_status(e),
        });
        result
    }

    fn set_status(&self, status: String) {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner) = status;
    }
}

impl Tool for NetworkSwitcherTool {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    fn category(&self) -> ToolCategory {
        ToolCategory::Network
    }

    fn icon(&self) -> Icon {
        Icon::Default
    }

    fn ui_surface(&self) -> Surface {
        let profiles = match self.profiles.profiles() {
            Ok(profiles) => profiles,
            Err(e) => {
                return Surface::new(NAME)
                    .section(Section::new("Error").line(format!("Error loading profiles: {e}")));
            }
        };

        let selected = {
            let mut selected = self.selected.lock().unwrap_or_else(PoisonError::into_inner);
            if selected.is_none() {
                *selected = profiles.first().map(|p| p.name.clone());
            }
            selected.clone()
        };

        let mut list = Section::new("Select a Profile");
        for profile in &profiles {
            let marker = if selected.as_deref() == Some(profile.name.as_str()) {
                "*"
            } else {
                " "
            };
            let proxy = if profile.proxy_enabled {
                format!("proxy {}", profile.proxy_server)
            } else {
                "no proxy".to_string()
            };
            list = list.line(format!(
                "{marker} {} ({}, {proxy})",
                profile.name, profile.network_priority
            ));
        }

        let mut status = Section::new("Status");
        let text = self.status();
        if !text.is_empty() {
            status = status.line(text);
        }

        Surface::new(NAME)
            .section(list)
            .section(status)
            .section(Section::new("Note").line(ADMIN_NOTE))
    }
}

fn failure_status(err: &CoreError) -> String {
    match err {
        CoreError::CommandFailed { step, .. } if step.is_metric() => {
            format!("Failed to apply profile: {err} {METRIC_HINT}")
        }
        _ => format!("Failed to apply profile: {err}"),
    }
}
