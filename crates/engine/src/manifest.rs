use std::{fs, path::Path, time::Duration};

use anyhow::Context;
use serde::Deserialize;
use shared::domain::{PackageId, PackageState};

pub const DEFAULT_PACKAGE_ID: &str = "MainPackage";

/// Description of the bundle the simulated engine pretends to drive.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BundleManifest {
    pub packages: Vec<PackageManifest>,
    pub plan_status: i32,
    pub apply_status: i32,
    pub step_delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PackageManifest {
    pub id: PackageId,
    #[serde(default = "default_package_state")]
    pub state: PackageState,
}

fn default_package_state() -> PackageState {
    PackageState::Absent
}

impl Default for BundleManifest {
    fn default() -> Self {
        Self {
            packages: vec![PackageManifest {
                id: PackageId::new(DEFAULT_PACKAGE_ID),
                state: PackageState::Absent,
            }],
            plan_status: 0,
            apply_status: 0,
            step_delay_ms: 250,
        }
    }
}

impl BundleManifest {
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }
}

pub fn load_manifest(path: &Path) -> anyhow::Result<BundleManifest> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read bundle manifest '{}'", path.display()))?;
    parse_manifest(&raw)
        .with_context(|| format!("invalid bundle manifest '{}'", path.display()))
}

pub fn parse_manifest(raw: &str) -> anyhow::Result<BundleManifest> {
    Ok(toml::from_str::<BundleManifest>(raw)?)
}
