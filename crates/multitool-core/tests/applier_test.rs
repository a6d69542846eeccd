//! Profile applier tests
//!
//! Call order against a recording configurator, and halting on failure.

use multitool_core::apply::{
    ApplyPhase, ApplyStep, CommandRunner, ConfiguratorError, NetworkConfigurator, ProfileApplier,
    WindowsConfigurator,
};
use multitool_core::profile::{NetworkPriority, Profile};
use multitool_core::CoreError;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Metric(String, u32),
    ProxyEnabled(bool),
    ProxyServer(String),
}

#[derive(Default)]
struct RecordingConfigurator {
    calls: Mutex<Vec<Call>>,
    /// Fail the nth metric call (0-based)
    fail_metric_at: Option<usize>,
}

impl RecordingConfigurator {
    fn failing_metric(index: usize) -> Self {
        Self {
            fail_metric_at: Some(index),
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl NetworkConfigurator for RecordingConfigurator {
    fn set_interface_metric(&self, interface: &str, metric: u32) -> Result<(), ConfiguratorError> {
        let mut calls = self.calls.lock().unwrap();
        let metric_calls = calls.iter().filter(|c| matches!(c, Call::Metric(..))).count();
        if self.fail_metric_at == Some(metric_calls) {
            return Err(ConfiguratorError::Rejected(format!(
                "interface '{interface}' not found"
            )));
        }
        calls.push(Call::Metric(interface.to_string(), metric));
        Ok(())
    }

    fn set_proxy_enabled(&self, enabled: bool) -> Result<(), ConfiguratorError> {
        self.calls.lock().unwrap().push(Call::ProxyEnabled(enabled));
        Ok(())
    }

    fn set_proxy_server(&self, server: &str) -> Result<(), ConfiguratorError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::ProxyServer(server.to_string()));
        Ok(())
    }
}

fn applier(configurator: &Arc<RecordingConfigurator>) -> ProfileApplier {
    ProfileApplier::new(configurator.clone())
}

#[test]
fn test_ethernet_with_proxy() {
    let configurator = Arc::new(RecordingConfigurator::default());
    let profile = Profile::new("Office", NetworkPriority::Ethernet).with_proxy("10.0.0.1:8080");

    let report = applier(&configurator).apply(&profile).unwrap();

    assert_eq!(
        configurator.calls(),
        vec![
            Call::Metric("Ethernet".into(), 10),
            Call::Metric("Wi-Fi".into(), 20),
            Call::ProxyEnabled(true),
            Call::ProxyServer("10.0.0.1:8080".into()),
        ]
    );
    assert_eq!(report.phase, ApplyPhase::Done);
    assert_eq!(report.completed.len(), 4);
    assert!(report.finished_at >= report.started_at);
}

#[test]
fn test_wifi_inverts_metrics() {
    let configurator = Arc::new(RecordingConfigurator::default());
    let profile = Profile::new("Home", NetworkPriority::WiFi);

    applier(&configurator).apply(&profile).unwrap();

    assert_eq!(
        configurator.calls(),
        vec![
            Call::Metric("Wi-Fi".into(), 10),
            Call::Metric("Ethernet".into(), 20),
            Call::ProxyEnabled(false),
        ]
    );
}

#[test]
fn test_proxy_off_never_touches_server() {
    let configurator = Arc::new(RecordingConfigurator::default());
    let mut profile = Profile::new("Home", NetworkPriority::Ethernet);
    profile.proxy_server = "stale.example:80".into();

    let report = applier(&configurator).apply(&profile).unwrap();

    let proxy_calls: Vec<_> = configurator
        .calls()
        .into_iter()
        .filter(|c| !matches!(c, Call::Metric(..)))
        .collect();
    assert_eq!(proxy_calls, vec![Call::ProxyEnabled(false)]);
    assert_eq!(report.completed.last(), Some(&ApplyStep::ProxyDisable));
}

#[test]
fn test_second_metric_failure_halts() {
    let configurator = Arc::new(RecordingConfigurator::failing_metric(1));
    let profile = Profile::new("Office", NetworkPriority::Ethernet).with_proxy("10.0.0.1:8080");

    let err = applier(&configurator).apply(&profile).unwrap_err();

    match &err {
        CoreError::CommandFailed { step, message } => {
            assert_eq!(*step, ApplyStep::SecondaryMetric);
            assert!(message.contains("Wi-Fi"));
        }
        other => panic!("expected CommandFailed, got {other:?}"),
    }
    assert_eq!(err.code(), "COMMAND_FAILED");
    assert_eq!(configurator.calls(), vec![Call::Metric("Ethernet".into(), 10)]);
}

#[test]
fn test_invalid_profile_runs_nothing() {
    let configurator = Arc::new(RecordingConfigurator::default());
    let profile = Profile::new("Broken", NetworkPriority::Ethernet).with_proxy("no-port");

    let err = applier(&configurator).apply(&profile).unwrap_err();
    assert_eq!(err.code(), "VALIDATION_ERROR");
    assert!(configurator.calls().is_empty());
}

#[test]
fn test_plan_matches_apply_order() {
    let configurator = Arc::new(RecordingConfigurator::default());
    let profile = Profile::new("Office", NetworkPriority::Ethernet).with_proxy("10.0.0.1:8080");
    let applier = applier(&configurator);

    let planned: Vec<_> = applier.plan(&profile).into_iter().map(|s| s.step).collect();
    let report = applier.apply(&profile).unwrap();
    assert_eq!(planned, report.completed);
}

struct ScriptedRunner {
    commands: Mutex<Vec<String>>,
    fail_on: Option<&'static str>,
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<(), ConfiguratorError> {
        let line = format!("{program} {}", args.join(" "));
        let failed = self.fail_on.is_some_and(|needle| line.contains(needle));
        self.commands.lock().unwrap().push(line);
        if failed {
            return Err(ConfiguratorError::Exit {
                program: program.to_string(),
                status: "exit code: 1".to_string(),
                output: "Access is denied.".to_string(),
            });
        }
        Ok(())
    }
}

#[test]
fn test_windows_commands_through_applier() {
    let runner = ScriptedRunner {
        commands: Mutex::new(Vec::new()),
        fail_on: Some("ProxyEnable"),
    };
    let configurator = Arc::new(WindowsConfigurator::with_runner(runner));
    let applier = ProfileApplier::new(configurator);

    let profile = Profile::new("Office", NetworkPriority::Ethernet).with_proxy("10.0.0.1:8080");
    let err = applier.apply(&profile).unwrap_err();

    assert!(err.to_string().contains("proxy enable"));
    assert!(err.to_string().contains("Access is denied."));
}
