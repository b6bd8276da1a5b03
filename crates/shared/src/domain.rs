use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::UxError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PackageId(pub String);

impl PackageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Top-level operation requested by whoever launched the bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaunchAction {
    Unknown,
    Help,
    Layout,
    UnsafeUninstall,
    Uninstall,
    Cache,
    Install,
    Modify,
    Repair,
    UpdateReplace,
    UpdateReplaceEmbedded,
}

impl LaunchAction {
    pub const ALL: [LaunchAction; 11] = [
        LaunchAction::Unknown,
        LaunchAction::Help,
        LaunchAction::Layout,
        LaunchAction::UnsafeUninstall,
        LaunchAction::Uninstall,
        LaunchAction::Cache,
        LaunchAction::Install,
        LaunchAction::Modify,
        LaunchAction::Repair,
        LaunchAction::UpdateReplace,
        LaunchAction::UpdateReplaceEmbedded,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LaunchAction::Unknown => "unknown",
            LaunchAction::Help => "help",
            LaunchAction::Layout => "layout",
            LaunchAction::UnsafeUninstall => "unsafe_uninstall",
            LaunchAction::Uninstall => "uninstall",
            LaunchAction::Cache => "cache",
            LaunchAction::Install => "install",
            LaunchAction::Modify => "modify",
            LaunchAction::Repair => "repair",
            LaunchAction::UpdateReplace => "update_replace",
            LaunchAction::UpdateReplaceEmbedded => "update_replace_embedded",
        }
    }

    /// Whether applying a plan for this action leaves packages removed.
    pub fn removes_packages(self) -> bool {
        matches!(self, LaunchAction::Uninstall | LaunchAction::UnsafeUninstall)
    }
}

impl fmt::Display for LaunchAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LaunchAction {
    type Err = UxError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
        LaunchAction::ALL
            .into_iter()
            .find(|action| action.as_str() == normalized)
            .ok_or_else(|| UxError::UnrecognizedAction(raw.to_string()))
    }
}

/// How much UI the launcher asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    Unknown,
    Embedded,
    None,
    Passive,
    Full,
}

impl DisplayMode {
    pub fn as_str(self) -> &'static str {
        match self {
            DisplayMode::Unknown => "unknown",
            DisplayMode::Embedded => "embedded",
            DisplayMode::None => "none",
            DisplayMode::Passive => "passive",
            DisplayMode::Full => "full",
        }
    }

    pub fn shows_window(self) -> bool {
        match self {
            DisplayMode::None | DisplayMode::Embedded => false,
            DisplayMode::Unknown | DisplayMode::Passive | DisplayMode::Full => true,
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayMode {
    type Err = UxError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "unknown" => Ok(DisplayMode::Unknown),
            "embedded" => Ok(DisplayMode::Embedded),
            "none" => Ok(DisplayMode::None),
            "passive" => Ok(DisplayMode::Passive),
            "full" => Ok(DisplayMode::Full),
            _ => Err(UxError::UnrecognizedDisplay(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageState {
    Unknown,
    Obsolete,
    Absent,
    Cached,
    Present,
    Superseded,
}

impl PackageState {
    pub fn label(self) -> &'static str {
        match self {
            PackageState::Unknown => "Unknown",
            PackageState::Obsolete => "Obsolete",
            PackageState::Absent => "Absent",
            PackageState::Cached => "Cached",
            PackageState::Present => "Present",
            PackageState::Superseded => "Superseded",
        }
    }
}

/// Severity accepted by the engine's log channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    None,
    Standard,
    Verbose,
    Debug,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Detect,
    Plan,
    Apply,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Detect => "detect",
            Phase::Plan => "plan",
            Phase::Apply => "apply",
        })
    }
}
