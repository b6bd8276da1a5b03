//! Entry point of the UX: forwards command-line variables to the engine and
//! picks headless or windowed execution from the display mode.

use std::sync::Arc;

use anyhow::{anyhow, Context};
use crossbeam_channel::Receiver;
use engine::BootstrapperEngine;
use shared::{domain::LogLevel, protocol::BootstrapperCommand};
use tracing::info;

use crate::{
    event_loop::{forward_engine_events, inbox, run_event_loop, LoopMessage, ModelHandle},
    headless::spawn_headless,
    model::{ApplyMode, InstallerModel},
    variables::set_command_line_variables,
};

/// A window bound to the installer model.
///
/// `run` owns the UI loop: it must feed inbox messages to the model (see
/// [`crate::event_loop::process_message`]) and return once the window closes.
pub trait WindowHost {
    fn run(&mut self, model: &mut InstallerModel, inbox: &Receiver<LoopMessage>) -> anyhow::Result<()>;
}

pub struct Bootstrapper {
    engine: Arc<dyn BootstrapperEngine>,
    command: BootstrapperCommand,
    windowed_apply_mode: ApplyMode,
}

impl Bootstrapper {
    pub fn new(engine: Arc<dyn BootstrapperEngine>, command: BootstrapperCommand) -> Self {
        Self {
            engine,
            command,
            windowed_apply_mode: ApplyMode::Automatic,
        }
    }

    pub fn with_windowed_apply_mode(mut self, mode: ApplyMode) -> Self {
        self.windowed_apply_mode = mode;
        self
    }

    /// Runs the whole installer session and returns the process exit code.
    ///
    /// `make_window` is only invoked for display modes that show a window.
    pub fn run<F>(self, make_window: F) -> anyhow::Result<i32>
    where
        F: FnOnce() -> anyhow::Result<Box<dyn WindowHost>>,
    {
        let quoted = self
            .command
            .args
            .iter()
            .map(|arg| format!("\"{arg}\""))
            .collect::<Vec<_>>()
            .join(" ");
        self.engine.log(
            LogLevel::Verbose,
            &format!("Launching installer UX -- {quoted}"),
        );
        info!(
            action = %self.command.action,
            display = %self.command.display,
            args = self.command.args.len(),
            "launching installer UX"
        );

        set_command_line_variables(self.engine.as_ref(), &self.command.args);

        let (tx, inbox) = inbox();
        forward_engine_events(self.engine.subscribe_events(), tx.clone());

        let exit_code = if self.command.display.shows_window() {
            let mut model = InstallerModel::new(self.engine.clone(), self.windowed_apply_mode);
            if let Err(err) = model.begin_detect() {
                model.record_failure(&err);
            }

            let mut window = make_window().context("failed to create installer window")?;
            if let Err(err) = window.run(&mut model, &inbox) {
                model.record_failure(&err.context("installer window failed"));
            }
            model.exit_code()
        } else {
            let mut model = InstallerModel::new(self.engine.clone(), ApplyMode::Automatic);
            let driver = spawn_headless(ModelHandle::new(tx), self.command.action);
            run_event_loop(&mut model, &inbox)?;
            if driver.join().is_err() {
                model.record_failure(&anyhow!("headless driver thread panicked"));
            }
            model.exit_code()
        };

        info!(exit_code, "installer UX finished");
        self.engine.quit(exit_code);
        Ok(exit_code)
    }
}
