use std::sync::Arc;

use engine::BootstrapperEngine;
use shared::domain::LogLevel;

use super::*;
use crate::test_support::RecordingEngine;

fn args(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|arg| arg.to_string()).collect()
}

#[test]
fn splits_on_first_equals_only() {
    let parsed = parse_command_line_variables(["FOO=1", "BAR=a=b", "bad"]);

    assert_eq!(
        parsed.assignments,
        vec![
            ("FOO".to_string(), "1".to_string()),
            ("BAR".to_string(), "a=b".to_string()),
        ]
    );
    assert_eq!(parsed.rejected, vec!["bad".to_string()]);
}

#[test]
fn empty_name_and_empty_value_are_still_assignments() {
    let parsed = parse_command_line_variables(["=value", "NAME="]);

    assert_eq!(
        parsed.assignments,
        vec![
            (String::new(), "value".to_string()),
            ("NAME".to_string(), String::new()),
        ]
    );
    assert!(parsed.rejected.is_empty());
}

#[test]
fn stores_variables_with_last_write_winning() {
    let engine = RecordingEngine::with_packages(1);

    set_command_line_variables(engine.as_ref(), &args(&["FOO=1", "FOO=2", "BAR=x"]));

    let vars = engine.variables().snapshot();
    assert_eq!(vars.len(), 2);
    assert_eq!(vars.get("FOO").map(String::as_str), Some("2"));
    assert_eq!(vars.get("BAR").map(String::as_str), Some("x"));
}

#[test]
fn end_to_end_example_logs_one_warning() {
    let engine: Arc<RecordingEngine> = RecordingEngine::with_packages(1);

    let parsed = set_command_line_variables(engine.as_ref(), &args(&["FOO=1", "BAR=a=b", "bad"]));

    let vars = engine.variables().snapshot();
    assert_eq!(vars.len(), 2);
    assert_eq!(vars.get("FOO").map(String::as_str), Some("1"));
    assert_eq!(vars.get("BAR").map(String::as_str), Some("a=b"));
    assert!(!engine.variables().contains("bad"));
    assert_eq!(parsed.rejected, vec!["bad".to_string()]);

    let warnings = engine
        .logs()
        .into_iter()
        .filter(|(level, _)| *level == LogLevel::Warning)
        .collect::<Vec<_>>();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].1.contains("'bad'"));
}
