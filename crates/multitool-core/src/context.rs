//! Application context built once at startup

use crate::apply::{ApplyReport, NetworkConfigurator, PlannedStep, ProfileApplier, WindowsConfigurator};
use crate::config::AppConfig;
use crate::error::{CoreError, CoreResult};
use crate::events::{AppEvent, EventBus, DEFAULT_CAPACITY};
use crate::profile::{Profile, ProfileStore};
use crate::service::ProfileService;
use crate::tool::{Tool, ToolRegistry};
use crate::tools::{register_default_tools, PdfBackend, UnavailablePdfBackend};
use crate::tray::TrayMenu;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Everything the front ends share: configuration, tools, profiles, events
pub struct AppContext {
    config: AppConfig,
    registry: ToolRegistry,
    profiles: Arc<ProfileService>,
    events: EventBus,
}

impl AppContext {
    /// Build a context and register the built-in tools
    #[must_use]
    pub fn new(
        config: AppConfig,
        configurator: Arc<dyn NetworkConfigurator>,
        pdf: Arc<dyn PdfBackend>,
    ) -> Self {
        let events = EventBus::new(DEFAULT_CAPACITY);
        let profiles = Arc::new(ProfileService::new(
            ProfileStore::new(config.profiles_path()),
            ProfileApplier::new(configurator),
            events.clone(),
        ));
        let registry = ToolRegistry::with_events(events.clone());
        register_default_tools(&registry, Arc::clone(&profiles), pdf, &config);

        Self {
            config,
            registry,
            profiles,
            events,
        }
    }

    /// Context over the real host, configured from the environment
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(
            AppConfig::from_env(),
            Arc::new(WindowsConfigurator::new()),
            Arc::new(UnavailablePdfBackend),
        )
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    #[must_use]
    pub fn profile_service(&self) -> &Arc<ProfileService> {
        &self.profiles
    }

    /// Tool instance for `name`, built on first use
    ///
    /// # Errors
    /// Returns `NotFound` for an unregistered name
    pub fn tool(&self, name: &str) -> CoreResult<Arc<dyn Tool>> {
        self.registry
            .get(name)
            .ok_or_else(|| CoreError::tool_not_found(name))
    }

    /// Hand dropped paths to a tool, returning how many it accepted
    ///
    /// # Errors
    /// Returns `NotFound` for an unknown tool and `Validation` when the tool
    /// does not accept files
    pub fn drop_files(&self, tool: &str, paths: &[String]) -> CoreResult<usize> {
        let instance = self.tool(tool)?;
        let dropper = instance
            .as_file_dropper()
            .ok_or_else(|| CoreError::Validation(format!("Tool '{tool}' does not accept files")))?;
        Ok(dropper.on_files_dropped(paths))
    }

    /// # Errors
    /// Propagates store errors
    pub fn profiles(&self) -> CoreResult<Vec<Profile>> {
        self.profiles.profiles()
    }

    /// # Errors
    /// Returns `NotFound` for an unknown name, or store errors
    pub fn profile(&self, name: &str) -> CoreResult<Profile> {
        self.profiles.profile(name)
    }

    /// Edit and save the profile set, publishing `ProfilesChanged`
    ///
    /// # Errors
    /// Propagates store and closure errors
    pub fn edit_profiles<T, F>(&self, edit: F) -> CoreResult<T>
    where
        F: FnOnce(&mut Vec<Profile>) -> CoreResult<T>,
    {
        self.profiles.edit(edit)
    }

    /// # Errors
    /// Returns `NotFound` for an unknown name, or store errors
    pub fn plan_profile(&self, name: &str) -> CoreResult<Vec<PlannedStep>> {
        self.profiles.plan(name)
    }

    /// Apply a profile to the host, publishing the outcome
    ///
    /// # Errors
    /// Returns `NotFound`, store errors, `Validation` or `CommandFailed`
    pub fn apply_profile(&self, name: &str) -> CoreResult<ApplyReport> {
        self.profiles.apply(name)
    }

    /// # Errors
    /// Propagates store errors
    pub fn tray_menu(&self) -> CoreResult<TrayMenu> {
        self.profiles.tray_menu()
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.events.subscribe()
    }
}
