use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;

pub const SETTINGS_FILE_NAME: &str = "installer_gui.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub manifest_path: Option<PathBuf>,
    pub confirm_apply: bool,
    pub window_title: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            manifest_path: None,
            confirm_apply: false,
            window_title: "Installer".into(),
            log_filter: "info".into(),
        }
    }
}

/// Defaults, then the settings file, then `INSTALLER_GUI__*` environment variables.
///
/// An explicitly named file must exist; the default locations are optional.
pub fn load_settings(explicit_path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let path = match explicit_path {
        Some(path) => Some(path.to_path_buf()),
        None => default_settings_path().filter(|path| path.exists()),
    };
    if let Some(path) = path {
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
        apply_file(&mut settings, &raw)
            .with_context(|| format!("invalid settings file '{}'", path.display()))?;
    }

    apply_env(&mut settings, |name| std::env::var(name).ok());
    Ok(settings)
}

pub fn default_settings_path() -> Option<PathBuf> {
    let local = PathBuf::from(SETTINGS_FILE_NAME);
    if local.exists() {
        return Some(local);
    }
    dirs::config_dir().map(|dir| dir.join("installer_gui").join(SETTINGS_FILE_NAME))
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let table = toml::from_str::<toml::Table>(raw)?;

    if let Some(v) = table.get("manifest").and_then(toml::Value::as_str) {
        settings.manifest_path = Some(PathBuf::from(v));
    }
    if let Some(v) = table.get("confirm_apply") {
        settings.confirm_apply = v
            .as_bool()
            .or_else(|| v.as_str().and_then(parse_bool))
            .with_context(|| format!("confirm_apply must be a boolean, got {v}"))?;
    }
    if let Some(v) = table.get("window_title").and_then(toml::Value::as_str) {
        settings.window_title = v.to_string();
    }
    if let Some(v) = table.get("log").and_then(toml::Value::as_str) {
        settings.log_filter = v.to_string();
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("INSTALLER_GUI__MANIFEST") {
        settings.manifest_path = Some(PathBuf::from(v));
    }
    if let Some(v) = lookup("INSTALLER_GUI__CONFIRM_APPLY") {
        match parse_bool(&v) {
            Some(parsed) => settings.confirm_apply = parsed,
            None => tracing::warn!(value = %v, "ignoring non-boolean INSTALLER_GUI__CONFIRM_APPLY"),
        }
    }
    if let Some(v) = lookup("INSTALLER_GUI__WINDOW_TITLE") {
        settings.window_title = v;
    }
    if let Some(v) = lookup("INSTALLER_GUI__LOG") {
        settings.log_filter = v;
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
