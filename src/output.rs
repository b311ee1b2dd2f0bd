// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Supports normal, quiet (CI), and JSON output modes.

use crate::deploy::DeploymentRecord;
use serde::Serialize;

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with progress messages
    Normal,
    /// Minimal output for CI (only final result)
    Quiet,
    /// JSON lines for scripting
    Json,
}

/// Handles CLI output based on the configured mode.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    mode: OutputMode,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    /// Print a progress message (suppressed in quiet/json mode).
    pub fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            println!("{message}");
        }
    }

    /// Print a success message.
    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => println!("{message}"),
            OutputMode::Json => emit(&JsonEvent::message("success", message)),
        }
    }

    /// Print a non-fatal warning.
    pub fn warning(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => eprintln!("Warning: {message}"),
            OutputMode::Json => emit_err(&JsonEvent::message("warning", message)),
        }
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => eprintln!("Error: {message}"),
            OutputMode::Json => emit_err(&JsonEvent::message("error", message)),
        }
    }

    /// Print the deployment parameters of one service.
    pub fn record(&self, record: &DeploymentRecord) {
        match self.mode {
            OutputMode::Normal => {
                for line in describe_record(record) {
                    println!("{line}");
                }
            }
            OutputMode::Quiet => println!("{}", record.service_name),
            OutputMode::Json => emit(&JsonEvent {
                event: "service",
                message: None,
                record: Some(record),
            }),
        }
    }
}

/// Human-readable summary lines for a record.
pub fn describe_record(record: &DeploymentRecord) -> Vec<String> {
    let mut lines = vec![format!("  → {} ({})", record.service_name, record.image)];

    match (record.ingress_mode(), record.target_port()) {
        (Some(mode), Some(port)) => lines.push(format!(
            "      ingress: {} on port {} ({})",
            mode, port, record.transport
        )),
        _ => lines.push("      ingress: none".to_string()),
    }

    if let Some(ref name) = record.container_name {
        lines.push(format!("      container: {}", name));
    }
    if let Some(ref command) = record.startup.command {
        lines.push(format!("      command: {}", command.join(" ")));
    }
    if let Some(ref args) = record.startup.args {
        lines.push(format!("      args: {}", args.join(" ")));
    }
    if let (Some(cpu), Some(memory)) = (&record.resources.cpu, &record.resources.memory) {
        lines.push(format!("      resources: {} CPU, {}", cpu, memory));
    }
    if let Some(vars) = record.env_vars() {
        lines.push(format!("      environment: {} variable(s)", vars.len()));
    }
    if let Some(ref registry) = record.registry {
        lines.push(format!(
            "      registry: {} ({})",
            registry.server, registry.username
        ));
    }

    lines
}

fn emit<T: Serialize>(event: &T) {
    if let Ok(json) = serde_json::to_string(event) {
        println!("{json}");
    }
}

fn emit_err<T: Serialize>(event: &T) {
    if let Ok(json) = serde_json::to_string(event) {
        eprintln!("{json}");
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    event: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    record: Option<&'a DeploymentRecord>,
}

impl<'a> JsonEvent<'a> {
    fn message(event: &'a str, message: &'a str) -> Self {
        Self {
            event,
            message: Some(message),
            record: None,
        }
    }
}
