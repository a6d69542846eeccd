//! Applying profiles to the host system

mod applier;
pub mod configurator;
pub mod step;
pub mod system;

pub use applier::{ApplyReport, ProfileApplier};
pub use configurator::{ConfiguratorError, NetworkConfigurator};
pub use step::{plan, ApplyPhase, ApplyStep, Mutation, PlannedStep};
pub use system::{CommandRunner, SystemCommandRunner, WindowsConfigurator};
