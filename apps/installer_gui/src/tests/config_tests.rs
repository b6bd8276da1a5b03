use std::{collections::HashMap, io::Write};

use super::*;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect::<HashMap<_, _>>();
    move |name| map.get(name).cloned()
}

#[test]
fn defaults_show_window_without_confirmation() {
    let settings = Settings::default();
    assert_eq!(settings.manifest_path, None);
    assert!(!settings.confirm_apply);
    assert_eq!(settings.log_filter, "info");
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        r#"
manifest = "bundle.toml"
confirm_apply = true
window_title = "Contoso Setup"
log = "debug"
"#,
    )
    .expect("settings file");

    assert_eq!(settings.manifest_path, Some(PathBuf::from("bundle.toml")));
    assert!(settings.confirm_apply);
    assert_eq!(settings.window_title, "Contoso Setup");
    assert_eq!(settings.log_filter, "debug");
}

#[test]
fn confirm_apply_accepts_quoted_booleans() {
    let mut settings = Settings::default();
    apply_file(&mut settings, "confirm_apply = \"yes\"").expect("settings file");
    assert!(settings.confirm_apply);
}

#[test]
fn rejects_non_boolean_confirm_apply() {
    let mut settings = Settings::default();
    let err = apply_file(&mut settings, "confirm_apply = 7").expect_err("invalid");
    assert!(err.to_string().contains("confirm_apply"));
}

#[test]
fn environment_overrides_file() {
    let mut settings = Settings::default();
    apply_file(&mut settings, "window_title = \"From File\"").expect("settings file");

    apply_env(
        &mut settings,
        env(&[
            ("INSTALLER_GUI__WINDOW_TITLE", "From Env"),
            ("INSTALLER_GUI__CONFIRM_APPLY", "on"),
            ("INSTALLER_GUI__MANIFEST", "/tmp/bundle.toml"),
        ]),
    );

    assert_eq!(settings.window_title, "From Env");
    assert!(settings.confirm_apply);
    assert_eq!(settings.manifest_path, Some(PathBuf::from("/tmp/bundle.toml")));
}

#[test]
fn malformed_environment_boolean_is_ignored() {
    let mut settings = Settings::default();
    apply_env(&mut settings, env(&[("INSTALLER_GUI__CONFIRM_APPLY", "maybe")]));
    assert!(!settings.confirm_apply);
}

#[test]
fn explicit_settings_file_is_loaded() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "window_title = \"Temp Setup\"").expect("write");

    let settings = load_settings(Some(file.path())).expect("load");
    if std::env::var("INSTALLER_GUI__WINDOW_TITLE").is_err() {
        assert_eq!(settings.window_title, "Temp Setup");
    }
}

#[test]
fn missing_explicit_settings_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("absent.toml");

    let err = load_settings(Some(&missing)).expect_err("missing file");
    assert!(format!("{err:#}").contains("absent.toml"));
}
