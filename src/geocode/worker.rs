//! Background reverse geocoding thread.

use super::{resolve_label, ReverseGeocoder};
use crate::map::{Endpoint, SelectionRound};
use crate::model::GeoPoint;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, warn};

/// One point to resolve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeocodeRequest {
    /// Selection round the point belongs to.
    pub round: SelectionRound,
    /// Departure or arrival.
    pub endpoint: Endpoint,
    /// Coordinates to resolve.
    pub point: GeoPoint,
}

/// Answer for one `GeocodeRequest`.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    /// Round copied from the request.
    pub round: SelectionRound,
    /// Endpoint copied from the request.
    pub endpoint: Endpoint,
    /// Place name, or coordinates on failure.
    pub label: String,
    /// Whether `label` is a place name.
    pub resolved: bool,
}

/// Owns the geocoding thread and both ends of its channels.
///
/// Dropping the worker raises the shutdown flag, closes the request channel
/// and detaches the thread. Queued requests are discarded and an in-flight
/// lookup is not retried, so dropping never waits on the network.
pub struct GeocodeWorker {
    requests: Option<Sender<GeocodeRequest>>,
    results: Receiver<GeocodeResult>,
    shutdown: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl GeocodeWorker {
    /// Start the thread. Failed lookups are retried `retries` extra times.
    pub fn spawn(geocoder: Box<dyn ReverseGeocoder>, retries: u32) -> Self {
        let (request_tx, request_rx) = mpsc::channel::<GeocodeRequest>();
        let (result_tx, result_rx) = mpsc::channel();
        let shutdown = Arc::new(AtomicBool::new(false));
        let stop = Arc::clone(&shutdown);

        let handle = thread::Builder::new()
            .name("cargotrack-geocode".to_string())
            .spawn(move || {
                for request in request_rx {
                    if stop.load(Ordering::Relaxed) {
                        break;
                    }
                    let (label, resolved) =
                        resolve_label(geocoder.as_ref(), request.point, retries, &stop);
                    let result = GeocodeResult {
                        round: request.round,
                        endpoint: request.endpoint,
                        label,
                        resolved,
                    };
                    if result_tx.send(result).is_err() {
                        break;
                    }
                }
                debug!("Geocode worker stopped");
            });

        let handle = match handle {
            Ok(handle) => Some(handle),
            Err(err) => {
                warn!(error = %err, "Failed to start geocode worker; labels stay as coordinates");
                None
            }
        };

        Self {
            requests: Some(request_tx),
            results: result_rx,
            shutdown,
            handle,
        }
    }

    /// Queue a lookup. Returns `false` if the worker is not running.
    pub fn submit(&self, request: GeocodeRequest) -> bool {
        match &self.requests {
            Some(tx) if self.handle.is_some() => tx.send(request).is_ok(),
            _ => false,
        }
    }

    /// Every result that has arrived so far, without blocking.
    pub fn drain(&self) -> Vec<GeocodeResult> {
        self.results.try_iter().collect()
    }

    /// Block up to `timeout` for the next result.
    pub fn wait(&self, timeout: Duration) -> Option<GeocodeResult> {
        match self.results.recv_timeout(timeout) {
            Ok(result) => Some(result),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }
}

impl Drop for GeocodeWorker {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            if handle.is_finished() {
                if handle.join().is_err() {
                    warn!("Geocode worker panicked");
                }
            } else {
                debug!("Geocode worker detached with a lookup in flight");
            }
        }
    }
}

impl std::fmt::Debug for GeocodeWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodeWorker")
            .field("running", &self.handle.is_some())
            .finish()
    }
}
