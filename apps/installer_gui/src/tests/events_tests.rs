use engine::{BundleManifest, SimulatedEngine};
use shared::{
    domain::{PackageId, PackageState},
    protocol::{ApplyComplete, DetectPackageComplete, EngineEvent, PlanComplete},
};
use ux_core::ApplyMode;

use super::*;

fn model(mode: ApplyMode) -> InstallerModel {
    InstallerModel::new(SimulatedEngine::new(BundleManifest::default()), mode)
}

fn detected(state: PackageState) -> EngineEvent {
    EngineEvent::DetectPackageComplete(DetectPackageComplete {
        package_id: PackageId::new("MainPackage"),
        status: 0,
        state,
    })
}

#[test]
fn install_action_follows_model_gating() {
    let mut model = model(ApplyMode::Automatic);
    assert!(!UiAction::Install.is_enabled(&model));
    assert!(UiAction::Exit.is_enabled(&model));

    model.handle_event(detected(PackageState::Absent));
    assert!(UiAction::Install.is_enabled(&model));
    assert!(!UiAction::Uninstall.is_enabled(&model));
    assert!(!UiAction::Apply.is_enabled(&model));
}

#[test]
fn describes_enablement_and_exit_code_changes() {
    let mut model = model(ApplyMode::Automatic);
    model.handle_event(detected(PackageState::Present));

    assert_eq!(
        describe_change(ModelProperty::UninstallEnabled, &model).as_deref(),
        Some("Product is installed; uninstall is available")
    );
    assert_eq!(describe_change(ModelProperty::InstallEnabled, &model), None);
    assert_eq!(describe_change(ModelProperty::Busy, &model), None);

    model.handle_event(EngineEvent::ApplyComplete(ApplyComplete { status: 3010 }));
    assert_eq!(
        describe_change(ModelProperty::ExitCode, &model).as_deref(),
        Some("Exit code is now 3010")
    );
}

#[test]
fn status_line_tracks_the_run() {
    let mut model = model(ApplyMode::Automatic);
    assert_eq!(status_line(&model), "Waiting for the installer engine");

    model.begin_detect().expect("detect");
    assert_eq!(status_line(&model), "Checking installed packages...");

    model.handle_event(detected(PackageState::Absent));
    assert_eq!(status_line(&model), "Ready");

    model.handle_event(EngineEvent::ApplyComplete(ApplyComplete { status: 0 }));
    assert_eq!(status_line(&model), "Finished (status 0)");
}

#[test]
fn status_line_reports_failed_plan() {
    let mut model = model(ApplyMode::Automatic);
    model.handle_event(EngineEvent::PlanComplete(PlanComplete { status: -1 }));
    assert_eq!(status_line(&model), "Planning failed (status -1)");
}
