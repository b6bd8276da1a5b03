use serde::{Deserialize, Serialize};

use crate::{
    domain::{DisplayMode, LaunchAction, PackageId, PackageState},
    error::UxError,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectPackageComplete {
    pub package_id: PackageId,
    pub status: i32,
    pub state: PackageState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanComplete {
    pub status: i32,
}

impl PlanComplete {
    pub fn succeeded(&self) -> bool {
        self.status >= 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyComplete {
    pub status: i32,
}

/// Completion notifications raised by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum EngineEvent {
    DetectPackageComplete(DetectPackageComplete),
    PlanComplete(PlanComplete),
    ApplyComplete(ApplyComplete),
}

/// What the bundle was launched to do, as handed over by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapperCommand {
    pub action: LaunchAction,
    pub display: DisplayMode,
    pub args: Vec<String>,
}

impl BootstrapperCommand {
    pub fn from_raw(action: &str, display: &str, args: Vec<String>) -> Result<Self, UxError> {
        Ok(Self {
            action: action.parse()?,
            display: display.parse()?,
            args,
        })
    }
}
