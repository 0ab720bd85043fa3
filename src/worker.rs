use crate::diff::CompareOptions;
use crate::messages::{CompareRequest, CompareResponse, WorkerMessage};
use crate::session::{CompareError, compare_guarded};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use tracing::{debug, info};

/// Background comparison thread with last-request-wins semantics.
///
/// Each submitted request gets a new generation. Only the response for the
/// latest generation is ever handed back; older ones are skipped before they
/// run or dropped when they land.
pub struct CompareWorker {
    /// Latest generation issued
    generation: Arc<AtomicU64>,
    /// Sender to communicate with the comparison thread
    sender: Sender<WorkerMessage>,
    receiver: Receiver<CompareResponse>,
    /// Handle to the comparison thread
    _thread_handle: thread::JoinHandle<()>,
}

impl CompareWorker {
    pub fn new(options: CompareOptions) -> Self {
        let (sender, request_receiver) = mpsc::channel();
        let (response_sender, receiver) = mpsc::channel();
        let generation = Arc::new(AtomicU64::new(0));

        let generation_clone = Arc::clone(&generation);
        let thread_handle = thread::spawn(move || {
            Self::compare_loop(request_receiver, response_sender, generation_clone, options);
        });

        Self {
            generation,
            sender,
            receiver,
            _thread_handle: thread_handle,
        }
    }

    /// Queue a comparison, superseding any request still in flight
    pub fn submit(
        &self,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Result<u64, CompareError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.sender
            .send(WorkerMessage::Compare(CompareRequest {
                generation,
                source: source.into(),
                target: target.into(),
            }))
            .map_err(|_| CompareError::Disconnected)?;
        debug!("Submitted comparison {}", generation);
        Ok(generation)
    }

    pub fn latest_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Non-blocking poll for the latest response
    pub fn try_recv(&self) -> Result<Option<CompareResponse>, CompareError> {
        loop {
            match self.receiver.try_recv() {
                Ok(response) if self.is_current(&response) => return Ok(Some(response)),
                Ok(response) => self.discard(&response),
                Err(TryRecvError::Empty) => return Ok(None),
                Err(TryRecvError::Disconnected) => return Err(CompareError::Disconnected),
            }
        }
    }

    /// Block until the response for the latest request arrives
    pub fn recv(&self) -> Result<CompareResponse, CompareError> {
        loop {
            let response = self
                .receiver
                .recv()
                .map_err(|_| CompareError::Disconnected)?;
            if self.is_current(&response) {
                return Ok(response);
            }
            self.discard(&response);
        }
    }

    fn is_current(&self, response: &CompareResponse) -> bool {
        response.generation == self.latest_generation()
    }

    fn discard(&self, response: &CompareResponse) {
        debug!(
            "Dropping stale comparison {} (latest {})",
            response.generation,
            self.latest_generation()
        );
    }

    /// The main loop that runs in the comparison thread
    fn compare_loop(
        receiver: Receiver<WorkerMessage>,
        response_sender: Sender<CompareResponse>,
        generation: Arc<AtomicU64>,
        options: CompareOptions,
    ) {
        while let Ok(message) = receiver.recv() {
            let WorkerMessage::Compare(mut request) = message else {
                break;
            };

            // Only the newest queued request is worth running
            let mut stop = false;
            while let Ok(newer) = receiver.try_recv() {
                match newer {
                    WorkerMessage::Compare(newer) => {
                        debug!("Skipping superseded comparison {}", request.generation);
                        request = newer;
                    }
                    WorkerMessage::Stop => {
                        stop = true;
                        break;
                    }
                }
            }
            if stop {
                break;
            }

            if request.generation < generation.load(Ordering::SeqCst) {
                debug!("Skipping superseded comparison {}", request.generation);
                continue;
            }

            let outcome = compare_guarded(&request.source, &request.target, &options);
            debug!("Finished comparison {}", request.generation);
            let response = CompareResponse {
                generation: request.generation,
                outcome,
            };
            if response_sender.send(response).is_err() {
                break;
            }
        }
        info!("Comparison worker stopped");
    }
}

impl Default for CompareWorker {
    fn default() -> Self {
        Self::new(CompareOptions::default())
    }
}

impl Drop for CompareWorker {
    fn drop(&mut self) {
        let _ = self.sender.send(WorkerMessage::Stop);
    }
}
