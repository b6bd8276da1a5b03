//! Boundary to the host bootstrapper engine.
//!
//! The engine owns detection, planning and applying of the bundle's packages.
//! Its operations only start work: each one finishes by raising an
//! [`EngineEvent`] on the broadcast channel returned by
//! [`BootstrapperEngine::subscribe_events`].

use std::{
    collections::BTreeMap,
    sync::{PoisonError, RwLock},
};

use anyhow::Result;
use shared::{
    domain::{LaunchAction, LogLevel},
    protocol::EngineEvent,
};
use tokio::sync::broadcast;

pub mod manifest;
mod simulated;

pub use manifest::{load_manifest, BundleManifest, PackageManifest};
pub use simulated::{LogRecord, SimulatedEngine};

pub trait BootstrapperEngine: Send + Sync {
    /// Number of packages the bundle declares; known before detection starts.
    fn package_count(&self) -> usize;
    fn detect(&self) -> Result<()>;
    fn plan(&self, action: LaunchAction) -> Result<()>;
    fn apply(&self) -> Result<()>;
    fn variables(&self) -> &StringVariables;
    fn log(&self, level: LogLevel, message: &str);
    fn subscribe_events(&self) -> broadcast::Receiver<EngineEvent>;
    fn quit(&self, exit_code: i32);
}

/// Named string variables shared with the engine.
#[derive(Debug, Default)]
pub struct StringVariables {
    values: RwLock<BTreeMap<String, String>>,
}

impl StringVariables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, name: impl Into<String>, value: impl Into<String>) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
