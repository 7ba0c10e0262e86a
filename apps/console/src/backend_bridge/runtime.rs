//! Backend worker: owns the tokio runtime and runs screen requests against
//! the HR API, one request scope per tab.

use std::{collections::HashMap, sync::Arc, thread};

use client_core::{execute, HrApi, Outcome, Request, RequestScope, Resource};
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::{
        events::{UiError, UiErrorContext, UiEvent},
        screens::{ScreenOutcome, ScreenRequest, Tab},
    },
};

pub fn spawn_backend_thread(
    api: Arc<dyn HrApi>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));
            let mut scopes: HashMap<Tab, RequestScope> = Tab::ALL
                .iter()
                .map(|&tab| (tab, RequestScope::new(tab.label())))
                .collect();

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Execute(request) => {
                        let scope = scopes
                            .entry(request.tab())
                            .or_insert_with_key(|tab| RequestScope::new(tab.label()));
                        match request {
                            ScreenRequest::Company(r) => spawn_request(scope, &api, &ui_tx, r),
                            ScreenRequest::Department(r) => spawn_request(scope, &api, &ui_tx, r),
                            ScreenRequest::Employee(r) => spawn_request(scope, &api, &ui_tx, r),
                            ScreenRequest::Candidate(r) => spawn_request(scope, &api, &ui_tx, r),
                        }
                    }
                    BackendCommand::Unmount(tab) => {
                        if let Some(scope) = scopes.get_mut(&tab) {
                            scope.unmount();
                        }
                    }
                }
            }
            tracing::info!("ui command channel closed; backend worker exiting");
        });
    });
}

fn spawn_request<R>(
    scope: &mut RequestScope,
    api: &Arc<dyn HrApi>,
    ui_tx: &Sender<UiEvent>,
    request: Request<R>,
) where
    R: Resource,
    ScreenOutcome: From<Outcome<R>>,
{
    let api = Arc::clone(api);
    let ui_tx = ui_tx.clone();
    scope.spawn(async move {
        let outcome = execute(&*api, request).await;
        match ui_tx.try_send(UiEvent::Outcome(outcome.into())) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                tracing::warn!(entity = R::KIND.collection(), "ui event queue is full");
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::debug!("ui event queue closed");
            }
        }
    });
}

#[cfg(test)]
#[path = "../tests/runtime_tests.rs"]
mod tests;
