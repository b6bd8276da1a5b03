//! Controller layer: user actions and how model changes are reported.

pub mod events;
pub mod orchestration;
