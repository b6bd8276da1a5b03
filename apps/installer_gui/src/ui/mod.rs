//! UI layer for the installer window.

pub mod app;

pub use app::EguiWindowHost;
