use thiserror::Error;

use crate::domain::Phase;

/// Exit code reported when the UX layer itself fails rather than the engine.
pub const FAILURE_EXIT_CODE: i32 = -1;

#[derive(Debug, Error)]
pub enum UxError {
    #[error("unrecognized display mode '{0}'")]
    UnrecognizedDisplay(String),
    #[error("unrecognized launch action '{0}'")]
    UnrecognizedAction(String),
    #[error("{0} phase was already started for this run")]
    PhaseAlreadyRun(Phase),
    #[error("engine event stream closed while awaiting {0} completion")]
    EngineDisconnected(Phase),
    #[error("orchestration loop is no longer accepting commands")]
    LoopClosed,
}
