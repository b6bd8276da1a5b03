//! `NAME=VALUE` command-line assignments forwarded to the engine.

use engine::BootstrapperEngine;
use shared::domain::LogLevel;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLineVariables {
    /// Assignments in command-line order; later duplicates win when stored.
    pub assignments: Vec<(String, String)>,
    pub rejected: Vec<String>,
}

pub fn parse_command_line_variables<I, S>(args: I) -> CommandLineVariables
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parsed = CommandLineVariables::default();
    for arg in args {
        let arg = arg.as_ref();
        match arg.split_once('=') {
            Some((name, value)) => parsed
                .assignments
                .push((name.to_string(), value.to_string())),
            None => parsed.rejected.push(arg.to_string()),
        }
    }
    parsed
}

/// Stores every valid assignment in the engine's variable store and reports
/// the rest through the engine log.
pub fn set_command_line_variables(
    engine: &dyn BootstrapperEngine,
    args: &[String],
) -> CommandLineVariables {
    let parsed = parse_command_line_variables(args);

    for (name, value) in &parsed.assignments {
        debug!(variable = %name, "setting command line variable");
        engine.variables().set(name.as_str(), value.as_str());
    }

    for arg in &parsed.rejected {
        warn!(argument = %arg, "ignoring unknown command line argument");
        engine.log(
            LogLevel::Warning,
            &format!("Ignoring unknown command line argument '{arg}'"),
        );
    }

    parsed
}

#[cfg(test)]
#[path = "tests/variables_tests.rs"]
mod tests;
