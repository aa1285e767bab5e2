//! Worker thread that owns the tokio runtime and the HTTP backend.

pub mod commands;
pub mod runtime;
