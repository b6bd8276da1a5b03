use std::{
    sync::{Arc, Mutex, PoisonError},
    thread,
    time::Duration,
};

use anyhow::{anyhow, Result};
use shared::{
    domain::{LaunchAction, LogLevel, PackageState},
    protocol::{ApplyComplete, DetectPackageComplete, EngineEvent, PlanComplete},
};
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use crate::{manifest::BundleManifest, BootstrapperEngine, PackageManifest, StringVariables};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
}

/// Engine stand-in driven by a [`BundleManifest`].
///
/// Completion events are raised from a short-lived worker thread after the
/// manifest's step delay, so callers always observe them asynchronously.
pub struct SimulatedEngine {
    plan_status: i32,
    apply_status: i32,
    step_delay: Duration,
    packages: Mutex<Vec<PackageManifest>>,
    planned_action: Mutex<Option<LaunchAction>>,
    variables: StringVariables,
    events: broadcast::Sender<EngineEvent>,
    log_records: Mutex<Vec<LogRecord>>,
    quit_code: Mutex<Option<i32>>,
}

impl SimulatedEngine {
    pub fn new(manifest: BundleManifest) -> Arc<Self> {
        let (events, _) = broadcast::channel(256);
        Arc::new(Self {
            plan_status: manifest.plan_status,
            apply_status: manifest.apply_status,
            step_delay: manifest.step_delay(),
            packages: Mutex::new(manifest.packages),
            planned_action: Mutex::new(None),
            variables: StringVariables::new(),
            events,
            log_records: Mutex::new(Vec::new()),
            quit_code: Mutex::new(None),
        })
    }

    pub fn log_records(&self) -> Vec<LogRecord> {
        self.log_records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn quit_code(&self) -> Option<i32> {
        *self.quit_code.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn package_states(&self) -> Vec<PackageManifest> {
        self.packages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn raise_later(&self, events: Vec<EngineEvent>) {
        let sender = self.events.clone();
        let delay = self.step_delay;
        thread::spawn(move || {
            if !delay.is_zero() {
                thread::sleep(delay);
            }
            for event in events {
                // No subscriber means nobody is waiting; the event is simply dropped.
                let _ = sender.send(event);
            }
        });
    }
}

impl BootstrapperEngine for SimulatedEngine {
    fn package_count(&self) -> usize {
        self.packages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn detect(&self) -> Result<()> {
        let events = self
            .packages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|package| {
                EngineEvent::DetectPackageComplete(DetectPackageComplete {
                    package_id: package.id.clone(),
                    status: 0,
                    state: package.state,
                })
            })
            .collect::<Vec<_>>();
        debug!(packages = events.len(), "simulated detect started");
        self.raise_later(events);
        Ok(())
    }

    fn plan(&self, action: LaunchAction) -> Result<()> {
        *self
            .planned_action
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(action);
        debug!(%action, status = self.plan_status, "simulated plan started");
        self.raise_later(vec![EngineEvent::PlanComplete(PlanComplete {
            status: self.plan_status,
        })]);
        Ok(())
    }

    fn apply(&self) -> Result<()> {
        let planned = *self
            .planned_action
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let action = planned.ok_or_else(|| anyhow!("apply requested before any plan"))?;

        if self.apply_status >= 0 {
            let target = if action.removes_packages() {
                PackageState::Absent
            } else {
                PackageState::Present
            };
            for package in self
                .packages
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .iter_mut()
            {
                package.state = target;
            }
        }

        debug!(%action, status = self.apply_status, "simulated apply started");
        self.raise_later(vec![EngineEvent::ApplyComplete(ApplyComplete {
            status: self.apply_status,
        })]);
        Ok(())
    }

    fn variables(&self) -> &StringVariables {
        &self.variables
    }

    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Error => error!(target: "engine", "{message}"),
            LogLevel::Warning => warn!(target: "engine", "{message}"),
            LogLevel::Standard => info!(target: "engine", "{message}"),
            LogLevel::Verbose | LogLevel::Debug => debug!(target: "engine", "{message}"),
            LogLevel::None => {}
        }
        self.log_records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(LogRecord {
                level,
                message: message.to_string(),
            });
    }

    fn subscribe_events(&self) -> broadcast::Receiver<EngineEvent> {
        self.events.subscribe()
    }

    fn quit(&self, exit_code: i32) {
        info!(exit_code, "engine quit requested");
        *self.quit_code.lock().unwrap_or_else(PoisonError::into_inner) = Some(exit_code);
    }
}
