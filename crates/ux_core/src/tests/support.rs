use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use engine::{BootstrapperEngine, StringVariables};
use shared::{
    domain::{LaunchAction, LogLevel, PackageId, PackageState, Phase},
    protocol::{ApplyComplete, DetectPackageComplete, EngineEvent, PlanComplete},
};
use tokio::sync::broadcast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCall {
    Detect,
    Plan(LaunchAction),
    Apply,
}

/// Engine double that only records calls; tests raise completions by hand.
pub struct RecordingEngine {
    package_count: usize,
    refuse: Option<Phase>,
    calls: Mutex<Vec<EngineCall>>,
    logs: Mutex<Vec<(LogLevel, String)>>,
    variables: StringVariables,
    events: broadcast::Sender<EngineEvent>,
}

impl RecordingEngine {
    pub fn with_packages(package_count: usize) -> Arc<Self> {
        Self::build(package_count, None)
    }

    pub fn refusing(phase: Phase) -> Arc<Self> {
        Self::build(1, Some(phase))
    }

    fn build(package_count: usize, refuse: Option<Phase>) -> Arc<Self> {
        let (events, _) = broadcast::channel(16);
        Arc::new(Self {
            package_count,
            refuse,
            calls: Mutex::new(Vec::new()),
            logs: Mutex::new(Vec::new()),
            variables: StringVariables::new(),
            events,
        })
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn logs(&self) -> Vec<(LogLevel, String)> {
        self.logs.lock().expect("logs lock").clone()
    }

    fn record(&self, call: EngineCall, phase: Phase) -> Result<()> {
        if self.refuse == Some(phase) {
            return Err(anyhow!("engine busy"));
        }
        self.calls.lock().expect("calls lock").push(call);
        Ok(())
    }
}

impl BootstrapperEngine for RecordingEngine {
    fn package_count(&self) -> usize {
        self.package_count
    }

    fn detect(&self) -> Result<()> {
        self.record(EngineCall::Detect, Phase::Detect)
    }

    fn plan(&self, action: LaunchAction) -> Result<()> {
        self.record(EngineCall::Plan(action), Phase::Plan)
    }

    fn apply(&self) -> Result<()> {
        self.record(EngineCall::Apply, Phase::Apply)
    }

    fn variables(&self) -> &StringVariables {
        &self.variables
    }

    fn log(&self, level: LogLevel, message: &str) {
        self.logs
            .lock()
            .expect("logs lock")
            .push((level, message.to_string()));
    }

    fn subscribe_events(&self) -> broadcast::Receiver<EngineEvent> {
        self.events.subscribe()
    }

    fn quit(&self, _exit_code: i32) {}
}

pub fn detected(id: &str, state: PackageState) -> EngineEvent {
    EngineEvent::DetectPackageComplete(DetectPackageComplete {
        package_id: PackageId::new(id),
        status: 0,
        state,
    })
}

pub fn planned(status: i32) -> EngineEvent {
    EngineEvent::PlanComplete(PlanComplete { status })
}

pub fn applied(status: i32) -> EngineEvent {
    EngineEvent::ApplyComplete(ApplyComplete { status })
}
