//! Backend-driven suggestion source
//!
//! Queries go to a background thread that owns a tokio runtime. Each query
//! runs as its own task guarded by a `CancellationToken`, so a new query or
//! an explicit cancel aborts the HTTP call instead of waiting it out.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio_util::sync::CancellationToken;

use super::source::{FetchOutcome, SuggestError, SuggestionQuery, SuggestionReply, SuggestionSource};
use crate::backend::BackendClient;
use crate::error::GhosttermError;

/// Messages from the controller thread to the worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestRequest {
    Fetch { request_id: u64, prefix: String },
    Cancel { request_id: u64 },
}

/// Messages from the worker back to the controller thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestResponse {
    Ready {
        request_id: u64,
        prefix: String,
        candidates: Vec<String>,
    },
    Failed {
        request_id: u64,
        prefix: String,
        error: SuggestError,
    },
    /// The request was aborted before the backend answered
    Cancelled { request_id: u64 },
}

pub struct RemoteSource {
    request_tx: UnboundedSender<SuggestRequest>,
    response_rx: Receiver<SuggestResponse>,
    /// Last query handed to the worker and not yet answered or cancelled
    outstanding: Option<SuggestionQuery>,
}

impl RemoteSource {
    /// Start the worker thread for `client`
    pub fn spawn(client: BackendClient) -> Result<Self, GhosttermError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let (request_tx, request_rx) = unbounded_channel();
        let (response_tx, response_rx) = mpsc::channel();

        std::thread::Builder::new()
            .name("ghostterm-suggest".to_string())
            .spawn(move || {
                runtime.block_on(run(client, request_rx, response_tx));
                log::debug!("Suggestion worker shutting down");
            })?;

        Ok(Self::from_channels(request_tx, response_rx))
    }

    /// Wrap already-connected channels
    pub fn from_channels(
        request_tx: UnboundedSender<SuggestRequest>,
        response_rx: Receiver<SuggestResponse>,
    ) -> Self {
        Self {
            request_tx,
            response_rx,
            outstanding: None,
        }
    }

    fn settle(&mut self, request_id: u64) {
        if self
            .outstanding
            .as_ref()
            .is_some_and(|query| query.request_id == request_id)
        {
            self.outstanding = None;
        }
    }
}

impl SuggestionSource for RemoteSource {
    fn needs_debounce(&self) -> bool {
        true
    }

    fn fetch(&mut self, query: &SuggestionQuery) -> FetchOutcome {
        let request = SuggestRequest::Fetch {
            request_id: query.request_id,
            prefix: query.prefix.clone(),
        };
        match self.request_tx.send(request) {
            Ok(()) => {
                self.outstanding = Some(query.clone());
                FetchOutcome::Pending
            }
            Err(_) => {
                log::warn!("Suggestion worker is gone, dropping request {}", query.request_id);
                FetchOutcome::Ready(Err(SuggestError::WorkerUnavailable))
            }
        }
    }

    fn cancel(&mut self, request_id: u64) {
        self.settle(request_id);
        let _ = self.request_tx.send(SuggestRequest::Cancel { request_id });
    }

    fn poll_reply(&mut self) -> Option<SuggestionReply> {
        loop {
            match self.response_rx.try_recv() {
                Ok(SuggestResponse::Ready {
                    request_id,
                    prefix,
                    candidates,
                }) => {
                    self.settle(request_id);
                    return Some(SuggestionReply {
                        request_id,
                        prefix,
                        result: Ok(candidates),
                    });
                }
                Ok(SuggestResponse::Failed {
                    request_id,
                    prefix,
                    error,
                }) => {
                    self.settle(request_id);
                    return Some(SuggestionReply {
                        request_id,
                        prefix,
                        result: Err(error),
                    });
                }
                Ok(SuggestResponse::Cancelled { request_id }) => {
                    log::debug!("Suggestion request {} cancelled", request_id);
                }
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Disconnected) => {
                    // Nothing will ever answer the outstanding query
                    let query = self.outstanding.take()?;
                    log::warn!(
                        "Suggestion worker exited with request {} outstanding",
                        query.request_id
                    );
                    return Some(SuggestionReply {
                        request_id: query.request_id,
                        prefix: query.prefix,
                        result: Err(SuggestError::WorkerUnavailable),
                    });
                }
            }
        }
    }
}

/// Worker loop; returns when the controller side hangs up
async fn run(
    client: BackendClient,
    mut request_rx: UnboundedReceiver<SuggestRequest>,
    response_tx: Sender<SuggestResponse>,
) {
    let mut current: Option<(u64, CancellationToken)> = None;

    while let Some(request) = request_rx.recv().await {
        match request {
            SuggestRequest::Fetch { request_id, prefix } => {
                // Only the newest query may finish
                if let Some((_, token)) = current.take() {
                    token.cancel();
                }
                let token = CancellationToken::new();
                current = Some((request_id, token.clone()));
                tokio::spawn(fetch(
                    client.clone(),
                    request_id,
                    prefix,
                    token,
                    response_tx.clone(),
                ));
            }
            SuggestRequest::Cancel { request_id } => match current.take() {
                Some((id, token)) if id == request_id => token.cancel(),
                other => {
                    log::debug!("Ignoring cancel for request {} (not active)", request_id);
                    current = other;
                }
            },
        }
    }

    if let Some((_, token)) = current.take() {
        token.cancel();
    }
}

async fn fetch(
    client: BackendClient,
    request_id: u64,
    prefix: String,
    token: CancellationToken,
    response_tx: Sender<SuggestResponse>,
) {
    let query = prefix.clone();
    let response = tokio::select! {
        biased;
        _ = token.cancelled() => SuggestResponse::Cancelled { request_id },
        result = client.autocomplete(&query) => match result {
            Ok(candidates) => SuggestResponse::Ready {
                request_id,
                prefix,
                candidates,
            },
            Err(e) => SuggestResponse::Failed {
                request_id,
                prefix,
                error: e.into(),
            },
        },
    };

    let _ = response_tx.send(response);
}

#[cfg(test)]
#[path = "remote_tests.rs"]
mod remote_tests;
