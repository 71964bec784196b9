//! Assistant worker
//!
//! Runs assistant tasks on a dedicated thread driving a current-thread tokio
//! runtime, so every in-flight request is a cooperative task on one event
//! loop. Requests arrive over an unbounded tokio channel; responses go back
//! over a std channel that the UI loop drains between input events.

use std::collections::HashMap;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedReceiver;
use tokio_util::sync::CancellationToken;

use super::provider::{AiError, AiProvider};
use crate::config::Config;
use crate::suggest::{AssistOutput, AssistRequest, AssistResponse, AssistTask};

/// Spawn the assistant worker thread
///
/// The runtime is built before the thread starts so a failure is reported
/// to the caller instead of leaving requests unanswered.
pub fn spawn_worker(
    config: &Config,
    request_rx: UnboundedReceiver<AssistRequest>,
    response_tx: Sender<AssistResponse>,
) -> std::io::Result<JoinHandle<()>> {
    let provider = AiProvider::from_config(&config.ai).map_err(|e| e.to_string());
    let timeout = Duration::from_secs(config.suggestions.request_timeout_secs);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    std::thread::Builder::new()
        .name("assistant-worker".to_string())
        .spawn(move || {
            runtime.block_on(worker_loop(provider, request_rx, response_tx, timeout));
        })
}

/// Main worker loop - processes requests until the channel is closed
async fn worker_loop(
    provider: Result<AiProvider, String>,
    mut request_rx: UnboundedReceiver<AssistRequest>,
    response_tx: Sender<AssistResponse>,
    timeout: Duration,
) {
    let provider = match provider {
        Ok(p) => Ok(Arc::new(p)),
        Err(e) => {
            // Reported per request, so the UI can show it
            log::debug!("Assistant not configured: {}", e);
            Err(e)
        }
    };
    let in_flight = InFlight::default();

    while let Some(request) = request_rx.recv().await {
        match request {
            AssistRequest::Run {
                task,
                text,
                request_id,
            } => {
                let guard = ResponseGuard::new(task, request_id, response_tx.clone());
                let provider = match &provider {
                    Ok(provider) => Arc::clone(provider),
                    Err(message) => {
                        guard.fail(message.clone());
                        continue;
                    }
                };

                log::debug!("Starting {} request {}", task.label(), request_id);
                let cancel_token = in_flight.register(request_id);
                let in_flight = in_flight.clone();
                tokio::spawn(async move {
                    let result =
                        run_with_timeout(&provider, task, &text, &cancel_token, timeout).await;
                    in_flight.remove(request_id);
                    guard.finish(result);
                });
            }
            AssistRequest::Cancel { request_id } => {
                if in_flight.cancel(request_id) {
                    log::debug!("Cancelled request {}", request_id);
                }
            }
        }
    }

    log::debug!("Assistant worker shutting down");
}

async fn run_with_timeout(
    provider: &AiProvider,
    task: AssistTask,
    text: &str,
    cancel_token: &CancellationToken,
    timeout: Duration,
) -> Result<AssistOutput, AiError> {
    match tokio::time::timeout(timeout, provider.run(task, text, cancel_token)).await {
        Ok(result) => result,
        Err(_) => Err(AiError::Timeout(timeout.as_secs())),
    }
}

/// Cancellation tokens of requests still running
#[derive(Clone, Default)]
struct InFlight {
    tokens: Arc<Mutex<HashMap<u64, CancellationToken>>>,
}

impl InFlight {
    fn register(&self, request_id: u64) -> CancellationToken {
        let token = CancellationToken::new();
        if let Ok(mut tokens) = self.tokens.lock() {
            tokens.insert(request_id, token.clone());
        }
        token
    }

    fn remove(&self, request_id: u64) {
        if let Ok(mut tokens) = self.tokens.lock() {
            tokens.remove(&request_id);
        }
    }

    /// Cancel a running request; returns false if it already finished
    fn cancel(&self, request_id: u64) -> bool {
        let token = self
            .tokens
            .lock()
            .ok()
            .and_then(|mut tokens| tokens.remove(&request_id));
        match token {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }
}

/// Guarantees exactly one response per request
///
/// If the guard is dropped without `finish` or `fail` (the task panicked or
/// the runtime shut down), a failure is reported so the UI never waits on a
/// request that will not answer.
struct ResponseGuard {
    task: AssistTask,
    request_id: u64,
    response_tx: Option<Sender<AssistResponse>>,
}

impl ResponseGuard {
    fn new(task: AssistTask, request_id: u64, response_tx: Sender<AssistResponse>) -> Self {
        Self {
            task,
            request_id,
            response_tx: Some(response_tx),
        }
    }

    fn finish(mut self, result: Result<AssistOutput, AiError>) {
        let (task, request_id) = (self.task, self.request_id);
        let response = match result {
            Ok(output) => AssistResponse::Completed {
                task,
                request_id,
                output,
            },
            Err(AiError::Cancelled) => AssistResponse::Cancelled { task, request_id },
            Err(e) => AssistResponse::Failed {
                task,
                request_id,
                message: e.to_string(),
            },
        };
        self.send(response);
    }

    fn fail(mut self, message: String) {
        let response = AssistResponse::Failed {
            task: self.task,
            request_id: self.request_id,
            message,
        };
        self.send(response);
    }

    fn send(&mut self, response: AssistResponse) {
        if let Some(tx) = self.response_tx.take() {
            // Receiver gone means the UI has exited
            let _ = tx.send(response);
        }
    }
}

impl Drop for ResponseGuard {
    fn drop(&mut self) {
        if self.response_tx.is_some() {
            log::warn!(
                "{} request {} ended without a result",
                self.task.label(),
                self.request_id
            );
            let response = AssistResponse::Failed {
                task: self.task,
                request_id: self.request_id,
                message: "request ended without a result".to_string(),
            };
            self.send(response);
        }
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;
