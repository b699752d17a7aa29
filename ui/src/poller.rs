//! Fixed-interval re-fetching of the landing view's fields.

use crate::compat;
use crate::poll_state::PollEvent;
use crate::poll_state::PollField;
use crate::poll_state::PollValue;
use api::ApiError;
use dioxus_logger::tracing::debug;
use dioxus_logger::tracing::warn;
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use strum::IntoEnumIterator;

pub const POLL_INTERVAL: Duration = Duration::from_millis(5000);

/// Provides one fetch per polled field.
pub trait PollSource {
    async fn fetch(&self, field: PollField) -> Result<PollValue, ApiError>;
}

/// Shared flag telling a poller whether its view is still mounted.
///
/// Once deactivated it never becomes active again.
#[derive(Clone, Debug)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_active(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn deactivate(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Poller<S> {
    source: S,
    interval: Duration,
}

impl<S: PollSource> Poller<S> {
    pub fn new(source: S, interval: Duration) -> Self {
        Self { source, interval }
    }

    /// Issues every field's fetch on each tick of a fixed-rate interval,
    /// starting immediately, until `liveness` is deactivated.
    ///
    /// Fetches from different ticks may overlap, so a slow field never delays
    /// the next tick. A result is delivered to `sink` only if no newer tick's
    /// result for the same field was delivered before it. Results that
    /// complete after deactivation are dropped.
    pub async fn run(&self, liveness: &Liveness, mut sink: impl FnMut(PollEvent)) {
        let mut ticker = compat::interval::Interval::new(self.interval);
        let mut in_flight = FuturesUnordered::new();
        let mut delivered: BTreeMap<PollField, u64> = BTreeMap::new();
        let mut tick_no: u64 = 0;

        while liveness.is_active() {
            tokio::select! {
                biased;

                Some((issued, event)) = in_flight.next(), if !in_flight.is_empty() => {
                    let (issued, event): (u64, PollEvent) = (issued, event);
                    if !liveness.is_active() {
                        debug!("discarding {} result, view is gone", event.field);
                        break;
                    }
                    if delivered.get(&event.field).is_some_and(|&last| last > issued) {
                        debug!("discarding stale {} result from tick {issued}", event.field);
                        continue;
                    }
                    delivered.insert(event.field, issued);
                    if let Err(message) = &event.outcome {
                        warn!("polling {} failed: {message}", event.field);
                    }
                    sink(event);
                }

                _ = ticker.tick() => {
                    if !liveness.is_active() {
                        break;
                    }
                    for field in PollField::iter() {
                        in_flight.push(self.fetch(tick_no, field));
                    }
                    tick_no += 1;
                }
            }
        }
        debug!("poller stopped");
    }

    async fn fetch(&self, tick_no: u64, field: PollField) -> (u64, PollEvent) {
        let outcome = self
            .source
            .fetch(field)
            .await
            .map_err(|e| e.to_string());
        (tick_no, PollEvent { field, outcome })
    }
}
