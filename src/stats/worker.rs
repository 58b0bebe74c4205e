//! Background poller for the backend's `/stats` endpoint
//!
//! Same shape as the suggestion worker: a thread owning a current-thread
//! runtime, fed through a tokio channel and drained with `try_recv`, so a
//! slow backend never stalls the event loop.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::time::Duration;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::backend::{BackendClient, BackendError, BackendStats};
use crate::error::GhosttermError;

pub type StatsReply = Result<BackendStats, BackendError>;

pub struct StatsWorker {
    request_tx: UnboundedSender<()>,
    response_rx: Receiver<StatsReply>,
}

impl StatsWorker {
    /// Start the poller thread; each poll gives up after `timeout`
    pub fn spawn(client: BackendClient, timeout: Duration) -> Result<Self, GhosttermError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let (request_tx, request_rx) = unbounded_channel();
        let (response_tx, response_rx) = mpsc::channel();

        std::thread::Builder::new()
            .name("ghostterm-stats".to_string())
            .spawn(move || {
                runtime.block_on(run(client, timeout, request_rx, response_tx));
                log::debug!("Stats worker shutting down");
            })?;

        Ok(Self {
            request_tx,
            response_rx,
        })
    }

    /// Ask for one poll; false when the worker is gone
    pub fn request(&self) -> bool {
        self.request_tx.send(()).is_ok()
    }

    /// Finished poll, if any
    pub fn try_reply(&self) -> Option<StatsReply> {
        match self.response_rx.try_recv() {
            Ok(reply) => Some(reply),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(BackendError::Network(
                "stats worker stopped".to_string(),
            ))),
        }
    }
}

async fn run(
    client: BackendClient,
    timeout: Duration,
    mut request_rx: UnboundedReceiver<()>,
    response_tx: Sender<StatsReply>,
) {
    while request_rx.recv().await.is_some() {
        let reply = client.stats(timeout).await;
        if response_tx.send(reply).is_err() {
            break;
        }
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;
