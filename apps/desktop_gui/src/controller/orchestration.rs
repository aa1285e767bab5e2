//! Command orchestration helpers from UI actions to backend command queue.

use client_core::{SearchController, SearchError};
use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Starts a search for the controller's current query and queues it for the
/// backend worker. A search that cannot be queued is settled as failed right
/// away so the form never stays stuck in `Loading`.
pub fn dispatch_search(
    cmd_tx: &Sender<BackendCommand>,
    controller: &mut SearchController,
    status: &mut String,
) {
    let Some(pending) = controller.begin_submit() else {
        return;
    };
    let generation = pending.generation;
    let cmd = BackendCommand::Analyze(pending);
    let cmd_name = cmd.name();

    let failure = match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(
                command = cmd_name,
                generation = generation.get(),
                "queued ui->backend command"
            );
            *status = "Searching...".to_string();
            return;
        }
        Err(TrySendError::Full(_)) => "UI command queue is full; please retry",
        Err(TrySendError::Disconnected(_)) => {
            "Backend command processor disconnected (possible startup/runtime failure); restart the app"
        }
    };

    *status = failure.to_string();
    controller.settle(generation, Err(SearchError::Transport(failure.to_string())));
}
