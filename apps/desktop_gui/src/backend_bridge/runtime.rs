//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{
    ClientSettings, Generation, HttpSearchBackend, ResultSet, SearchBackend, SearchError,
};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(
    settings: ClientSettings,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let backend = match HttpSearchBackend::new(&settings) {
                Ok(backend) => Arc::new(backend),
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        err.to_string(),
                    )));
                    tracing::error!("failed to initialize search backend: {err}");
                    return;
                }
            };
            tracing::info!(endpoint = %backend.endpoint(), "backend worker ready");
            let _ = ui_tx.try_send(UiEvent::Info("Ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Analyze(pending) => {
                        let backend = Arc::clone(&backend);
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            let outcome = backend.analyze(&pending.request).await;
                            deliver_settlement(ui_tx, pending.generation, outcome).await;
                        });
                    }
                }
            }
            tracing::debug!("command queue closed; backend worker exiting");
        });
    });
}

/// Hands a settled search to the UI. The queue is drained once per frame, so
/// a full queue waits on the blocking pool rather than on a runtime worker.
async fn deliver_settlement(
    ui_tx: Sender<UiEvent>,
    generation: Generation,
    outcome: Result<ResultSet, SearchError>,
) {
    let event = UiEvent::SearchSettled {
        generation,
        outcome,
    };
    match tokio::task::spawn_blocking(move || ui_tx.send(event)).await {
        Ok(Ok(())) => {}
        Ok(Err(_)) => {
            tracing::debug!(
                generation = generation.get(),
                "ui closed before search settled"
            );
        }
        Err(err) => {
            tracing::error!(
                generation = generation.get(),
                "failed to deliver search settlement: {err}"
            );
        }
    }
}
