//! Fixed-interval polling of the sensor endpoint.
//!
//! Ticks are unconditional: each one spawns an independent fetch task, so
//! a slow or hung request never delays the next tick and in-flight
//! requests may overlap. A sequence guard keeps a late response from
//! overwriting a newer reading.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use ambient_core::{Reading, ReadingError};
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::event::{AppEvent, Event};

/// One failed fetch-and-decode cycle. Logged at the poll boundary; the
/// next tick retries naturally.
#[derive(Debug, Error)]
pub enum PollError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("endpoint answered {0}")]
    HttpStatus(StatusCode),

    #[error("bad reading: {0}")]
    Reading(#[from] ReadingError),
}

pub struct Poller {
    client: Client,
    url: String,
    interval: Duration,
    events: mpsc::UnboundedSender<Event>,
}

/// Handle to a running poll loop.
#[derive(Debug)]
pub struct PollerHandle {
    shutdown: watch::Sender<bool>,
    _task: JoinHandle<()>,
}

impl PollerHandle {
    /// Stops the interval loop. Fetches already in flight are left to
    /// resolve; their results go nowhere once the event channel closes.
    pub fn stop(&self) {
        let _ = self.shutdown.send(true);
    }
}

impl Poller {
    pub fn new(url: String, interval: Duration, events: mpsc::UnboundedSender<Event>) -> Self {
        Self {
            client: Client::new(),
            url,
            // tokio's interval panics on a zero period, which would kill
            // the loop task while the app keeps running.
            interval: interval.max(Duration::from_millis(1)),
            events,
        }
    }

    /// Starts the loop: one fetch immediately, then one per interval, for
    /// as long as the handle lives and `stop` has not been called.
    pub fn spawn(self) -> PollerHandle {
        let (shutdown, mut stopped) = watch::channel(false);
        let task = tokio::spawn(async move {
            let issued = AtomicU64::new(0);
            let applied = Arc::new(AtomicU64::new(0));
            let mut ticker = tokio::time::interval(self.interval);
            info!(url = %self.url, interval_ms = self.interval.as_millis() as u64, "poller started");
            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    _ = stopped.changed() => break,
                }
                let seq = issued.fetch_add(1, Ordering::Relaxed) + 1;
                tokio::spawn(poll_once(
                    self.client.clone(),
                    self.url.clone(),
                    seq,
                    Arc::clone(&applied),
                    self.events.clone(),
                ));
            }
            info!("poller stopped");
        });
        PollerHandle {
            shutdown,
            _task: task,
        }
    }
}

async fn poll_once(
    client: Client,
    url: String,
    seq: u64,
    applied: Arc<AtomicU64>,
    events: mpsc::UnboundedSender<Event>,
) {
    match fetch_reading(&client, &url).await {
        Ok(reading) => {
            if !try_apply(&applied, seq) {
                debug!(seq, "dropping stale response");
                return;
            }
            debug!(?reading, seq, "received data");
            let _ = events.send(Event::App(AppEvent::Reading(reading)));
        }
        Err(err) => error!(%err, seq, "poll failed"),
    }
}

/// One GET against the endpoint, decoded into a validated reading.
/// A non-success status short-circuits before the body is read.
async fn fetch_reading(client: &Client, url: &str) -> Result<Reading, PollError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(PollError::HttpStatus(status));
    }
    let body = response.bytes().await?;
    Ok(Reading::decode(&body)?)
}

/// Records `seq` as applied unless a result from a later-issued request
/// already was, in which case this result is stale.
fn try_apply(applied: &AtomicU64, seq: u64) -> bool {
    applied.fetch_max(seq, Ordering::AcqRel) < seq
}
