//! Backend commands queued from UI to backend worker.

use client_core::PendingSearch;

pub enum BackendCommand {
    /// Run the analyze request and report back with the same generation.
    Analyze(PendingSearch),
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Analyze(_) => "analyze",
        }
    }
}
