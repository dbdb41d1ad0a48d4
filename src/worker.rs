// Background execution of backend calls so the UI thread never waits on the network

use crate::api::{self, ApiError, Backend, Call, Endpoint, Outcome};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use tracing::warn;

/// A call queued by the dashboard, tagged with the ticket it was issued under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Job {
    pub ticket: u64,
    pub call: Call,
}

/// The answer to a [`Job`], carrying the same ticket.
#[derive(Debug)]
pub struct Completion {
    pub ticket: u64,
    pub outcome: Outcome,
}

/// Callback fired after each completion is queued (used to wake the GUI).
pub type Waker = Arc<dyn Fn() + Send + Sync>;

/// Runs each job on its own thread and collects the answers on a channel.
pub struct Worker {
    backend: Arc<dyn Backend>,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
    waker: Option<Waker>,
}

impl Worker {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            backend,
            tx,
            rx,
            waker: None,
        }
    }

    /// Install a callback invoked whenever a job finishes.
    pub fn with_waker(mut self, waker: Waker) -> Self {
        self.waker = Some(waker);
        self
    }

    /// Start a job without waiting for it. Every submitted job yields exactly one completion;
    /// if no thread can be started the completion carries [`ApiError::Spawn`].
    pub fn submit(&self, job: Job) {
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        let waker = self.waker.clone();
        let ticket = job.ticket;
        let endpoint = job.call.endpoint();

        let spawned = thread::Builder::new()
            .name(format!("request-{ticket}"))
            .spawn(move || {
                let outcome = api::execute(backend.as_ref(), job.call);
                deliver(&tx, waker.as_ref(), Completion { ticket, outcome });
            });

        if let Err(e) = spawned {
            warn!(%endpoint, error = %e, "failed to spawn request thread");
            self.fail(ticket, endpoint, ApiError::Spawn(e.to_string()));
        }
    }

    /// Queue a completion for a job that never reached the backend.
    fn fail(&self, ticket: u64, endpoint: Endpoint, err: ApiError) {
        let outcome = Outcome::failed(endpoint, err);
        deliver(&self.tx, self.waker.as_ref(), Completion { ticket, outcome });
    }

    /// Completions that arrived since the last call, without blocking.
    pub fn drain(&self) -> Vec<Completion> {
        self.rx.try_iter().collect()
    }

    /// Wait for the next completion.
    pub fn recv(&self) -> Option<Completion> {
        self.rx.recv().ok()
    }
}

fn deliver(tx: &Sender<Completion>, waker: Option<&Waker>, completion: Completion) {
    // The receiver only disappears when the app is shutting down
    if tx.send(completion).is_ok() {
        if let Some(wake) = waker {
            wake();
        }
    }
}
