//! The owning loop: the only place the installer model is mutated.
//!
//! Engine notifications and commands from other threads are queued into a
//! single inbox and applied to the model in arrival order.

use std::thread;

use crossbeam_channel::{Receiver, Sender};
use shared::{
    domain::{LaunchAction, Phase},
    error::UxError,
    protocol::{ApplyComplete, DetectPackageComplete, EngineEvent, PlanComplete},
};
use tokio::sync::{broadcast, broadcast::error::RecvError, oneshot};
use tracing::{debug, warn};

use crate::{completion::Reply, model::InstallerModel};

pub const INBOX_CAPACITY: usize = 256;

pub enum ModelCommand {
    Detect {
        reply: Reply<Vec<DetectPackageComplete>>,
    },
    Plan {
        action: LaunchAction,
        reply: Reply<PlanComplete>,
    },
    Apply {
        reply: Reply<ApplyComplete>,
    },
    RecordFailure(anyhow::Error),
    Exit,
}

pub enum LoopMessage {
    Engine(EngineEvent),
    Command(ModelCommand),
}

pub fn inbox() -> (Sender<LoopMessage>, Receiver<LoopMessage>) {
    crossbeam_channel::bounded(INBOX_CAPACITY)
}

/// Thread-safe access to a model owned by another loop.
#[derive(Clone)]
pub struct ModelHandle {
    tx: Sender<LoopMessage>,
}

impl ModelHandle {
    pub fn new(tx: Sender<LoopMessage>) -> Self {
        Self { tx }
    }

    pub async fn detect(&self) -> anyhow::Result<Vec<DetectPackageComplete>> {
        self.request(Phase::Detect, |reply| ModelCommand::Detect { reply })
            .await
    }

    pub async fn plan(&self, action: LaunchAction) -> anyhow::Result<PlanComplete> {
        self.request(Phase::Plan, |reply| ModelCommand::Plan { action, reply })
            .await
    }

    pub async fn apply(&self) -> anyhow::Result<ApplyComplete> {
        self.request(Phase::Apply, |reply| ModelCommand::Apply { reply })
            .await
    }

    pub fn record_failure(&self, err: anyhow::Error) -> Result<(), UxError> {
        self.send(ModelCommand::RecordFailure(err))
    }

    pub fn request_exit(&self) -> Result<(), UxError> {
        self.send(ModelCommand::Exit)
    }

    fn send(&self, command: ModelCommand) -> Result<(), UxError> {
        self.tx
            .send(LoopMessage::Command(command))
            .map_err(|_| UxError::LoopClosed)
    }

    async fn request<T>(
        &self,
        phase: Phase,
        command: impl FnOnce(Reply<T>) -> ModelCommand,
    ) -> anyhow::Result<T> {
        let (reply, done) = oneshot::channel();
        self.send(command(reply))?;
        done.await.map_err(|_| UxError::EngineDisconnected(phase))?
    }
}

/// Forwards engine notifications into the loop inbox until either side closes.
pub fn forward_engine_events(
    mut events: broadcast::Receiver<EngineEvent>,
    tx: Sender<LoopMessage>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || loop {
        match events.blocking_recv() {
            Ok(event) => {
                if tx.send(LoopMessage::Engine(event)).is_err() {
                    debug!("loop inbox closed; stopping engine event forwarder");
                    break;
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "engine event forwarder lagged behind");
            }
            Err(RecvError::Closed) => break,
        }
    })
}

pub fn process_message(model: &mut InstallerModel, message: LoopMessage) {
    match message {
        LoopMessage::Engine(event) => model.handle_event(event),
        LoopMessage::Command(ModelCommand::Detect { reply }) => model.detect_then(reply),
        LoopMessage::Command(ModelCommand::Plan { action, reply }) => {
            model.plan_then(action, reply)
        }
        LoopMessage::Command(ModelCommand::Apply { reply }) => model.apply_then(reply),
        LoopMessage::Command(ModelCommand::RecordFailure(err)) => model.record_failure(&err),
        LoopMessage::Command(ModelCommand::Exit) => model.request_exit(),
    }
}

/// Runs until the model asks to exit.
pub fn run_event_loop(
    model: &mut InstallerModel,
    inbox: &Receiver<LoopMessage>,
) -> Result<(), UxError> {
    while !model.exit_requested() {
        let message = inbox.recv().map_err(|_| UxError::LoopClosed)?;
        process_message(model, message);
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/event_loop_tests.rs"]
mod tests;
