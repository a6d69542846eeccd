//! Windows implementation of the network configurator
//!
//! Metrics go through `netsh`, proxy settings through `reg add` on the
//! per-user Internet Settings key. Changing metrics needs an elevated
//! process.

use super::configurator::{ConfiguratorError, NetworkConfigurator};
use std::process::Command;
use tracing::debug;

/// Registry key holding the per-user proxy settings
pub const INTERNET_SETTINGS_KEY: &str =
    r"HKCU\Software\Microsoft\Windows\CurrentVersion\Internet Settings";

/// Runs an external program to completion
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`
    ///
    /// # Errors
    /// Returns an error if the program cannot be started or exits unsuccessfully
    fn run(&self, program: &str, args: &[String]) -> Result<(), ConfiguratorError>;
}

/// Runs commands with `std::process::Command`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<(), ConfiguratorError> {
        debug!(program, ?args, "Running command");
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|source| ConfiguratorError::Spawn {
                program: program.to_string(),
                source,
            })?;

        if output.status.success() {
            return Ok(());
        }

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        Err(ConfiguratorError::Exit {
            program: program.to_string(),
            status: output.status.to_string(),
            output: combined.trim().to_string(),
        })
    }
}

/// Configurator backed by `netsh` and `reg`
pub struct WindowsConfigurator<R: CommandRunner = SystemCommandRunner> {
    runner: R,
}

impl WindowsConfigurator {
    /// Configurator that runs real commands
    #[must_use]
    pub fn new() -> Self {
        Self::with_runner(SystemCommandRunner)
    }
}

impl Default for WindowsConfigurator {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CommandRunner> WindowsConfigurator<R> {
    /// Configurator that runs commands through `runner`
    pub fn with_runner(runner: R) -> Self {
        Self { runner }
    }

    fn reg_add(&self, value: &str, kind: &str, data: &str) -> Result<(), ConfiguratorError> {
        let args = [
            "add",
            INTERNET_SETTINGS_KEY,
            "/v",
            value,
            "/t",
            kind,
            "/d",
            data,
            "/f",
        ]
        .map(String::from);
        self.runner.run("reg", &args)
    }
}

impl<R: CommandRunner> NetworkConfigurator for WindowsConfigurator<R> {
    fn set_interface_metric(&self, interface: &str, metric: u32) -> Result<(), ConfiguratorError> {
        let args = vec![
            "interface".to_string(),
            "ipv4".to_string(),
            "set".to_string(),
            "interface".to_string(),
            format!("interface={interface}"),
            format!("metric={metric}"),
        ];
        self.runner.run("netsh", &args)
    }

    fn set_proxy_enabled(&self, enabled: bool) -> Result<(), ConfiguratorError> {
        self.reg_add("ProxyEnable", "REG_DWORD", if enabled { "1" } else { "0" })
    }

    fn set_proxy_server(&self, server: &str) -> Result<(), ConfiguratorError> {
        self.reg_add("ProxyServer", "REG_SZ", server)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingRunner {
        calls: Mutex<Vec<(String, Vec<String>)>>,
    }

    impl CommandRunner for RecordingRunner {
        fn run(&self, program: &str, args: &[String]) -> Result<(), ConfiguratorError> {
            self.calls
                .lock()
                .unwrap()
                .push((program.to_string(), args.to_vec()));
            Ok(())
        }
    }

    #[test]
    fn test_metric_command() {
        let configurator = WindowsConfigurator::with_runner(RecordingRunner::default());
        configurator.set_interface_metric("Wi-Fi", 10).unwrap();

        let calls = configurator.runner.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "netsh");
        assert_eq!(
            calls[0].1,
            vec!["interface", "ipv4", "set", "interface", "interface=Wi-Fi", "metric=10"]
        );
    }

    #[test]
    fn test_proxy_commands() {
        let configurator = WindowsConfigurator::with_runner(RecordingRunner::default());
        configurator.set_proxy_enabled(true).unwrap();
        configurator.set_proxy_server("10.0.0.1:8080").unwrap();
        configurator.set_proxy_enabled(false).unwrap();

        let calls = configurator.runner.calls.lock().unwrap();
        assert!(calls.iter().all(|(program, _)| program == "reg"));
        assert_eq!(
            calls[0].1,
            vec![
                "add",
                INTERNET_SETTINGS_KEY,
                "/v",
                "ProxyEnable",
                "/t",
                "REG_DWORD",
                "/d",
                "1",
                "/f"
            ]
        );
        assert_eq!(calls[1].1[3], "ProxyServer");
        assert_eq!(calls[1].1[5], "REG_SZ");
        assert_eq!(calls[1].1[7], "10.0.0.1:8080");
        assert_eq!(calls[2].1[7], "0");
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let err = SystemCommandRunner
            .run("multitool-definitely-missing-binary", &[])
            .unwrap_err();
        assert!(matches!(err, ConfiguratorError::Spawn { .. }));
    }
}
