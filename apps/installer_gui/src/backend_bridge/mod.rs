//! Bridge between the installer binary and the bootstrapper engine.

pub mod runtime;
