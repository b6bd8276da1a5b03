//! Orchestration state for one installer run.
//!
//! The model is owned by a single loop (headless or windowed) and is the only
//! place that starts engine phases and reacts to their completion. Views watch
//! it through [`InstallerModel::subscribe`]; sequential drivers await phases
//! through the `*_then` / `*_async` bridges.

use std::{collections::HashSet, sync::Arc};

use anyhow::Context;
use engine::BootstrapperEngine;
use shared::{
    domain::{LaunchAction, LogLevel, PackageState, Phase},
    error::{UxError, FAILURE_EXIT_CODE},
    protocol::{ApplyComplete, DetectPackageComplete, EngineEvent, PlanComplete},
};
use tokio::sync::oneshot;
use tracing::{debug, error, info, warn};

use crate::{
    completion::{collect_then_resolve, resolve_once, CompletionHandlers, Reply},
    notify::{PropertyChanged, PropertyNotifier, SubscriptionId},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelProperty {
    Busy,
    InstallEnabled,
    UninstallEnabled,
    ApplyAvailable,
    ExitCode,
}

/// What happens after a successful plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyMode {
    Automatic,
    /// Wait for an explicit [`InstallerModel::apply`].
    Manual,
}

pub struct InstallerModel {
    engine: Arc<dyn BootstrapperEngine>,
    apply_mode: ApplyMode,

    busy: bool,
    install_enabled: bool,
    uninstall_enabled: bool,
    apply_available: bool,
    exit_code: i32,
    exit_requested: bool,

    started: HashSet<Phase>,
    expected_packages: usize,
    detected: Vec<DetectPackageComplete>,
    planned_action: Option<LaunchAction>,
    last_plan: Option<PlanComplete>,
    last_apply: Option<ApplyComplete>,

    notifier: PropertyNotifier<ModelProperty>,
    detect_handlers: CompletionHandlers<DetectPackageComplete>,
    plan_handlers: CompletionHandlers<PlanComplete>,
    apply_handlers: CompletionHandlers<ApplyComplete>,
}

impl InstallerModel {
    pub fn new(engine: Arc<dyn BootstrapperEngine>, apply_mode: ApplyMode) -> Self {
        Self {
            engine,
            apply_mode,
            busy: false,
            install_enabled: false,
            uninstall_enabled: false,
            apply_available: false,
            exit_code: 0,
            exit_requested: false,
            started: HashSet::new(),
            expected_packages: 0,
            detected: Vec::new(),
            planned_action: None,
            last_plan: None,
            last_apply: None,
            notifier: PropertyNotifier::new(),
            detect_handlers: CompletionHandlers::default(),
            plan_handlers: CompletionHandlers::default(),
            apply_handlers: CompletionHandlers::default(),
        }
    }

    pub fn busy(&self) -> bool {
        self.busy
    }

    pub fn install_enabled(&self) -> bool {
        self.install_enabled
    }

    pub fn uninstall_enabled(&self) -> bool {
        self.uninstall_enabled
    }

    pub fn apply_available(&self) -> bool {
        self.apply_available
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    pub fn apply_mode(&self) -> ApplyMode {
        self.apply_mode
    }

    pub fn planned_action(&self) -> Option<LaunchAction> {
        self.planned_action
    }

    pub fn last_plan(&self) -> Option<PlanComplete> {
        self.last_plan
    }

    pub fn last_apply(&self) -> Option<ApplyComplete> {
        self.last_apply
    }

    pub fn detected_packages(&self) -> &[DetectPackageComplete] {
        &self.detected
    }

    pub fn has_started(&self, phase: Phase) -> bool {
        self.started.contains(&phase)
    }

    /// Number of one-shot completion handlers still waiting.
    pub fn pending_completions(&self) -> usize {
        self.detect_handlers.len() + self.plan_handlers.len() + self.apply_handlers.len()
    }

    pub fn subscribe(
        &mut self,
        subscriber: impl FnMut(&PropertyChanged<ModelProperty>) + 'static,
    ) -> SubscriptionId {
        self.notifier.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    pub fn begin_detect(&mut self) -> anyhow::Result<()> {
        self.expected_packages = self.engine.package_count();
        self.start_phase(Phase::Detect, |engine| engine.detect())?;
        if self.expected_packages == 0 {
            // No package will report back.
            self.set_busy(false);
        }
        Ok(())
    }

    pub fn begin_plan(&mut self, action: LaunchAction) -> anyhow::Result<()> {
        self.start_phase(Phase::Plan, |engine| engine.plan(action))?;
        self.planned_action = Some(action);
        Ok(())
    }

    pub fn begin_apply(&mut self) -> anyhow::Result<()> {
        self.start_phase(Phase::Apply, |engine| engine.apply())?;
        self.set_apply_available(false);
        Ok(())
    }

    pub fn request_exit(&mut self) {
        info!(exit_code = self.exit_code, "exit requested");
        self.exit_requested = true;
    }

    pub fn record_failure(&mut self, err: &anyhow::Error) {
        let message = format!("{err:#}");
        error!(error = %message, "installer run failed");
        self.engine.log(LogLevel::Error, &message);
        self.set_exit_code(FAILURE_EXIT_CODE);
        self.set_busy(false);
    }

    /// Install and uninstall each start the single plan of the run.
    pub fn can_install(&self) -> bool {
        self.install_enabled && !self.busy && !self.has_started(Phase::Plan)
    }

    pub fn can_uninstall(&self) -> bool {
        self.uninstall_enabled && !self.busy && !self.has_started(Phase::Plan)
    }

    pub fn can_apply(&self) -> bool {
        self.apply_mode == ApplyMode::Manual && self.apply_available && !self.busy
    }

    pub fn install(&mut self) -> anyhow::Result<()> {
        if !self.can_install() {
            debug!("install requested while unavailable; ignoring");
            return Ok(());
        }
        self.begin_plan(LaunchAction::Install)
    }

    pub fn uninstall(&mut self) -> anyhow::Result<()> {
        if !self.can_uninstall() {
            debug!("uninstall requested while unavailable; ignoring");
            return Ok(());
        }
        self.begin_plan(LaunchAction::Uninstall)
    }

    pub fn apply(&mut self) -> anyhow::Result<()> {
        if !self.can_apply() {
            debug!("apply requested while unavailable; ignoring");
            return Ok(());
        }
        self.begin_apply()
    }

    pub fn handle_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::DetectPackageComplete(done) => {
                self.on_detect_package_complete(&done);
                self.detect_handlers.dispatch(&done);
            }
            EngineEvent::PlanComplete(done) => {
                self.on_plan_complete(done);
                self.plan_handlers.dispatch(&done);
            }
            EngineEvent::ApplyComplete(done) => {
                self.on_apply_complete(done);
                self.apply_handlers.dispatch(&done);
            }
        }
    }

    /// Starts detection and fulfils `reply` once every known package reported.
    pub fn detect_then(&mut self, reply: Reply<Vec<DetectPackageComplete>>) {
        if let Err(err) = self.begin_detect() {
            let _ = reply.send(Err(err));
            return;
        }
        if self.expected_packages == 0 {
            let _ = reply.send(Ok(Vec::new()));
            return;
        }
        self.detect_handlers
            .register(collect_then_resolve(self.expected_packages, reply));
    }

    pub fn plan_then(&mut self, action: LaunchAction, reply: Reply<PlanComplete>) {
        if let Err(err) = self.begin_plan(action) {
            let _ = reply.send(Err(err));
            return;
        }
        self.plan_handlers.register(resolve_once(reply));
    }

    /// Fulfils `reply` with the apply result, starting apply only if nothing
    /// else (automatic apply after planning) already did.
    pub fn apply_then(&mut self, reply: Reply<ApplyComplete>) {
        if let Some(done) = self.last_apply {
            let _ = reply.send(Ok(done));
            return;
        }
        if self.apply_in_flight() {
            self.apply_handlers.register(resolve_once(reply));
            return;
        }
        if let Err(err) = self.begin_apply() {
            let _ = reply.send(Err(err));
            return;
        }
        self.apply_handlers.register(resolve_once(reply));
    }

    pub fn detect_async(&mut self) -> oneshot::Receiver<anyhow::Result<Vec<DetectPackageComplete>>> {
        let (reply, done) = oneshot::channel();
        self.detect_then(reply);
        done
    }

    pub fn plan_async(&mut self, action: LaunchAction) -> oneshot::Receiver<anyhow::Result<PlanComplete>> {
        let (reply, done) = oneshot::channel();
        self.plan_then(action, reply);
        done
    }

    pub fn apply_async(&mut self) -> oneshot::Receiver<anyhow::Result<ApplyComplete>> {
        let (reply, done) = oneshot::channel();
        self.apply_then(reply);
        done
    }

    fn apply_in_flight(&self) -> bool {
        self.has_started(Phase::Apply) && self.last_apply.is_none() && self.busy
    }

    fn start_phase(
        &mut self,
        phase: Phase,
        start: impl FnOnce(&dyn BootstrapperEngine) -> anyhow::Result<()>,
    ) -> anyhow::Result<()> {
        if !self.started.insert(phase) {
            return Err(UxError::PhaseAlreadyRun(phase).into());
        }
        self.set_busy(true);
        info!(%phase, "starting engine phase");

        let engine = Arc::clone(&self.engine);
        if let Err(err) = start(engine.as_ref()) {
            self.set_busy(false);
            return Err(err).with_context(|| format!("engine refused to start {phase}"));
        }
        Ok(())
    }

    fn on_detect_package_complete(&mut self, done: &DetectPackageComplete) {
        debug!(package = %done.package_id, state = ?done.state, "package detected");
        // Package identity is not checked: bundles driven by this UX carry a single package.
        match done.state {
            PackageState::Absent => self.set_install_enabled(true),
            PackageState::Present => self.set_uninstall_enabled(true),
            _ => {}
        }
        self.detected.push(done.clone());
        if self.detected.len() >= self.expected_packages {
            self.set_busy(false);
        }
    }

    fn on_plan_complete(&mut self, done: PlanComplete) {
        self.last_plan = Some(done);
        if !done.succeeded() {
            warn!(status = done.status, "plan failed");
            self.set_busy(false);
            self.set_exit_code(done.status);
            return;
        }

        match self.apply_mode {
            ApplyMode::Automatic => {
                if let Err(err) = self.begin_apply() {
                    self.record_failure(&err);
                }
            }
            ApplyMode::Manual => {
                self.set_busy(false);
                self.set_apply_available(true);
            }
        }
    }

    fn on_apply_complete(&mut self, done: ApplyComplete) {
        info!(status = done.status, "apply complete");
        self.last_apply = Some(done);
        self.set_exit_code(done.status);
        self.set_busy(false);
        self.set_install_enabled(false);
        self.set_uninstall_enabled(false);
        self.set_apply_available(false);
    }

    fn set_busy(&mut self, value: bool) {
        self.busy = value;
        self.notifier.notify(ModelProperty::Busy);
    }

    fn set_install_enabled(&mut self, value: bool) {
        self.install_enabled = value;
        self.notifier.notify(ModelProperty::InstallEnabled);
    }

    fn set_uninstall_enabled(&mut self, value: bool) {
        self.uninstall_enabled = value;
        self.notifier.notify(ModelProperty::UninstallEnabled);
    }

    fn set_apply_available(&mut self, value: bool) {
        self.apply_available = value;
        self.notifier.notify(ModelProperty::ApplyAvailable);
    }

    fn set_exit_code(&mut self, value: i32) {
        self.exit_code = value;
        self.notifier.notify(ModelProperty::ExitCode);
    }
}

#[cfg(test)]
#[path = "tests/model_tests.rs"]
mod tests;
