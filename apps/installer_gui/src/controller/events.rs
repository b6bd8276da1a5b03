//! User actions and the text the window shows for model changes.

use ux_core::{InstallerModel, ModelProperty};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Install,
    Uninstall,
    Apply,
    Exit,
}

impl UiAction {
    pub fn name(self) -> &'static str {
        match self {
            UiAction::Install => "install",
            UiAction::Uninstall => "uninstall",
            UiAction::Apply => "apply",
            UiAction::Exit => "exit",
        }
    }

    pub fn is_enabled(self, model: &InstallerModel) -> bool {
        match self {
            UiAction::Install => model.can_install(),
            UiAction::Uninstall => model.can_uninstall(),
            UiAction::Apply => model.can_apply(),
            UiAction::Exit => true,
        }
    }
}

/// Activity line for a property change, or `None` when it is not worth showing.
pub fn describe_change(property: ModelProperty, model: &InstallerModel) -> Option<String> {
    match property {
        ModelProperty::Busy => None,
        ModelProperty::InstallEnabled if model.install_enabled() => {
            Some("Product is not installed; install is available".to_string())
        }
        ModelProperty::UninstallEnabled if model.uninstall_enabled() => {
            Some("Product is installed; uninstall is available".to_string())
        }
        ModelProperty::InstallEnabled | ModelProperty::UninstallEnabled => None,
        ModelProperty::ApplyAvailable if model.apply_available() => {
            Some("Plan ready; press Apply to continue".to_string())
        }
        ModelProperty::ApplyAvailable => None,
        ModelProperty::ExitCode => Some(format!("Exit code is now {}", model.exit_code())),
    }
}

pub fn status_line(model: &InstallerModel) -> String {
    if let Some(applied) = model.last_apply() {
        return if applied.status >= 0 {
            format!("Finished (status {})", applied.status)
        } else {
            format!("Failed (status {})", applied.status)
        };
    }
    if let Some(plan) = model.last_plan() {
        if !plan.succeeded() {
            return format!("Planning failed (status {})", plan.status);
        }
    }
    if model.exit_code() < 0 {
        return format!("Failed (status {})", model.exit_code());
    }
    if model.busy() {
        return match model.planned_action() {
            Some(action) => format!("Working on {action}..."),
            None => "Checking installed packages...".to_string(),
        };
    }
    if model.can_apply() {
        return "Ready to apply".to_string();
    }
    if model.install_enabled() || model.uninstall_enabled() {
        return "Ready".to_string();
    }
    "Waiting for the installer engine".to_string()
}

#[cfg(test)]
#[path = "../tests/events_tests.rs"]
mod tests;
