//! Off-thread decoding.
//!
//! A [`RecognitionWorker`] owns a small rayon pool. [`submit`] queues a
//! request and immediately returns a [`PendingDecode`] that resolves once the
//! synchronous pipeline finishes on a pool thread. A started decode always
//! runs to completion; dropping the handle simply discards its result.
//!
//! [`submit`]: RecognitionWorker::submit

use crate::error::{RecognizeError, Result};
use crate::models::DecodeOutcome;
use crate::pipeline::DecodeOrchestrator;
use crate::request::DecodeRequest;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};

/// Worker pool that runs decode requests in the background
pub struct RecognitionWorker {
    pool: rayon::ThreadPool,
    orchestrator: Arc<DecodeOrchestrator>,
}

impl RecognitionWorker {
    /// Worker sized from the orchestrator's `worker_threads` setting
    pub fn new(orchestrator: DecodeOrchestrator) -> Result<Self> {
        let threads = orchestrator.config().worker_threads;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("barcode-decode-{i}"))
            .build()?;
        Ok(Self {
            pool,
            orchestrator: Arc::new(orchestrator),
        })
    }

    /// Number of pool threads
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Queue a request; the returned handle resolves when decoding finishes
    pub fn submit(&self, request: DecodeRequest) -> PendingDecode {
        let (tx, rx) = mpsc::channel();
        let orchestrator = Arc::clone(&self.orchestrator);
        self.pool.spawn(move || {
            let result = orchestrator.decode(&request);
            if tx.send(result).is_err() {
                log::debug!("decode result discarded, caller dropped its handle");
            }
        });
        PendingDecode {
            rx,
            cached: None,
        }
    }
}

/// Handle to a decode running on a [`RecognitionWorker`]
pub struct PendingDecode {
    rx: Receiver<Result<DecodeOutcome>>,
    cached: Option<Result<DecodeOutcome>>,
}

impl PendingDecode {
    /// Block until the decode finishes
    pub fn wait(mut self) -> Result<DecodeOutcome> {
        if let Some(result) = self.cached.take() {
            return result;
        }
        self.rx
            .recv()
            .map_err(|_| RecognizeError::WorkerDisconnected)?
    }

    /// Non-blocking check; `true` once [`wait`](Self::wait) will return immediately
    pub fn is_ready(&mut self) -> bool {
        if self.cached.is_some() {
            return true;
        }
        match self.rx.try_recv() {
            Ok(result) => {
                self.cached = Some(result);
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                self.cached = Some(Err(RecognizeError::WorkerDisconnected));
                true
            }
        }
    }
}
