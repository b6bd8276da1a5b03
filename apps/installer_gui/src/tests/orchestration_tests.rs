use engine::{BundleManifest, SimulatedEngine};
use shared::{
    domain::{LaunchAction, PackageId, PackageState, Phase},
    error::FAILURE_EXIT_CODE,
    protocol::{DetectPackageComplete, EngineEvent, PlanComplete},
};
use ux_core::ApplyMode;

use super::*;

fn model_with_absent_package() -> InstallerModel {
    let mut model = InstallerModel::new(
        SimulatedEngine::new(BundleManifest::default()),
        ApplyMode::Automatic,
    );
    model.handle_event(EngineEvent::DetectPackageComplete(DetectPackageComplete {
        package_id: PackageId::new("MainPackage"),
        status: 0,
        state: PackageState::Absent,
    }));
    model
}

#[test]
fn install_starts_planning() {
    let mut model = model_with_absent_package();
    let mut status = String::new();

    dispatch_ui_action(&mut model, UiAction::Install, &mut status);

    assert!(model.has_started(Phase::Plan));
    assert_eq!(model.planned_action(), Some(LaunchAction::Install));
    assert!(model.busy());
    assert!(status.is_empty());
}

#[test]
fn disabled_actions_are_ignored() {
    let mut model = model_with_absent_package();
    let mut status = String::new();

    dispatch_ui_action(&mut model, UiAction::Uninstall, &mut status);
    dispatch_ui_action(&mut model, UiAction::Apply, &mut status);

    assert!(!model.has_started(Phase::Plan));
    assert!(!model.has_started(Phase::Apply));
}

#[test]
fn exit_requests_loop_shutdown() {
    let mut model = model_with_absent_package();
    let mut status = String::new();

    dispatch_ui_action(&mut model, UiAction::Exit, &mut status);

    assert!(model.exit_requested());
}

#[test]
fn engine_refusal_is_recorded_as_failure() {
    let mut model = InstallerModel::new(
        SimulatedEngine::new(BundleManifest::default()),
        ApplyMode::Manual,
    );
    // The engine never planned, so it refuses to apply.
    model.handle_event(EngineEvent::PlanComplete(PlanComplete { status: 0 }));
    let mut status = String::new();

    dispatch_ui_action(&mut model, UiAction::Apply, &mut status);

    assert_eq!(model.exit_code(), FAILURE_EXIT_CODE);
    assert!(status.starts_with("Could not apply"));
    assert!(!model.busy());
}

#[test]
fn install_click_after_failed_plan_keeps_plan_status() {
    let mut model = model_with_absent_package();
    let mut status = String::new();
    dispatch_ui_action(&mut model, UiAction::Install, &mut status);
    model.handle_event(EngineEvent::PlanComplete(PlanComplete { status: -5 }));

    dispatch_ui_action(&mut model, UiAction::Install, &mut status);

    assert!(!UiAction::Install.is_enabled(&model));
    assert_eq!(model.exit_code(), -5);
    assert!(status.is_empty());
}
