// ABOUTME: Startup command resolution from entrypoint and command.
// ABOUTME: Each slot collapses to at most one joined string.

use crate::compose::Service;
use serde::Serialize;

/// Container startup override: `command` replaces the image entrypoint,
/// `args` replaces its arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StartupCommand {
    pub command: Option<Vec<String>>,
    pub args: Option<Vec<String>>,
}

/// With an entrypoint, the entrypoint becomes the command and `command` (if any)
/// becomes the single argument. Without one, `command` alone becomes the command.
pub fn resolve_startup_command(service: &Service) -> StartupCommand {
    match (&service.entrypoint, &service.command) {
        (Some(entrypoint), command) => StartupCommand {
            command: Some(vec![entrypoint.command_string()]),
            args: command.as_ref().map(|c| vec![c.command_string()]),
        },
        (None, Some(command)) => StartupCommand {
            command: Some(vec![command.command_string()]),
            args: None,
        },
        (None, None) => StartupCommand::default(),
    }
}
