//! Routes window actions to the installer model.

use ux_core::InstallerModel;

use crate::controller::events::UiAction;

/// Runs `action` if it is currently enabled; failures become the run's failure
/// and are reported in `status`.
pub fn dispatch_ui_action(model: &mut InstallerModel, action: UiAction, status: &mut String) {
    let name = action.name();
    if !action.is_enabled(model) {
        tracing::debug!(action = name, "ignoring disabled ui action");
        return;
    }

    let result = match action {
        UiAction::Install => model.install(),
        UiAction::Uninstall => model.uninstall(),
        UiAction::Apply => model.apply(),
        UiAction::Exit => {
            model.request_exit();
            Ok(())
        }
    };

    match result {
        Ok(()) => tracing::debug!(action = name, "dispatched ui action"),
        Err(err) => {
            *status = format!("Could not {name}: {err:#}");
            model.record_failure(&err);
        }
    }
}

#[cfg(test)]
#[path = "../tests/orchestration_tests.rs"]
mod tests;
