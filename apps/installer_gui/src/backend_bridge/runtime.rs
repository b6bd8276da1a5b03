//! Engine construction for the installer binary.

use std::{path::Path, sync::Arc};

use anyhow::Context;
use engine::{load_manifest, BootstrapperEngine, BundleManifest, SimulatedEngine};

pub fn launch_engine(manifest_path: Option<&Path>) -> anyhow::Result<Arc<dyn BootstrapperEngine>> {
    let manifest = match manifest_path {
        Some(path) => load_manifest(path).context("failed to prepare bootstrapper engine")?,
        None => BundleManifest::default(),
    };
    tracing::info!(
        packages = manifest.packages.len(),
        manifest = %manifest_path.map(|p| p.display().to_string()).unwrap_or_else(|| "<built-in>".into()),
        "starting simulated bootstrapper engine"
    );
    Ok(SimulatedEngine::new(manifest))
}
