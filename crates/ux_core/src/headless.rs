//! Sequential detect → plan → apply driver used when no window is shown.

use std::thread;

use anyhow::Context;
use shared::domain::LaunchAction;
use tracing::{error, info, warn};

use crate::event_loop::ModelHandle;

pub async fn run_sequence(handle: &ModelHandle, action: LaunchAction) -> anyhow::Result<()> {
    let packages = handle.detect().await.context("detect phase failed")?;
    info!(packages = packages.len(), "detection finished");

    let plan = handle.plan(action).await.context("plan phase failed")?;
    if !plan.succeeded() {
        warn!(status = plan.status, %action, "plan failed; nothing will be applied");
        return Ok(());
    }

    let applied = handle.apply().await.context("apply phase failed")?;
    info!(status = applied.status, %action, "apply finished");
    Ok(())
}

/// Runs [`run_sequence`] on a background thread, then asks the loop to exit.
///
/// Failures are handed to the loop as the run's failure; they never unwind past
/// this thread.
pub fn spawn_headless(handle: ModelHandle, action: LaunchAction) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let result = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to build headless runtime")
            .and_then(|runtime| runtime.block_on(run_sequence(&handle, action)));

        if let Err(err) = result {
            if let Err(send_err) = handle.record_failure(err) {
                error!("could not report headless failure: {send_err}");
            }
        }
        if let Err(err) = handle.request_exit() {
            error!("could not request exit after headless run: {err}");
        }
    })
}
