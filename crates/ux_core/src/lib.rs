//! Installer UX orchestration: drives a [`engine::BootstrapperEngine`] through
//! detect, plan and apply, headless or behind a window.

pub mod bootstrapper;
pub mod completion;
pub mod event_loop;
pub mod headless;
pub mod model;
pub mod notify;
pub mod variables;

pub use bootstrapper::{Bootstrapper, WindowHost};
pub use event_loop::{process_message, LoopMessage, ModelHandle};
pub use model::{ApplyMode, InstallerModel, ModelProperty};
pub use notify::{PropertyChanged, SubscriptionId};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
