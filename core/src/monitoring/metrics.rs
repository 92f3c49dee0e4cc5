use crate::prelude::{FeedKind, TickOutcome};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Per-feed tick counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FeedCounters {
    pub ticks: usize,
    pub inserted: usize,
    pub evicted: usize,
    pub not_present: usize,
    pub errors: usize,
}

pub struct FeedMetrics {
    inner: Mutex<BTreeMap<FeedKind, FeedCounters>>,
}

impl FeedMetrics {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn record_outcome(&self, feed: FeedKind, outcome: TickOutcome) {
        if let Ok(mut metrics) = self.inner.lock() {
            let counters = metrics.entry(feed).or_default();
            counters.ticks += 1;
            match outcome {
                TickOutcome::Updated { inserted, evicted } => {
                    counters.inserted += inserted;
                    counters.evicted += evicted;
                }
                TickOutcome::Refreshed => {}
                TickOutcome::ElementNotPresent => counters.not_present += 1,
            }
        }
    }

    pub fn record_error(&self, feed: FeedKind) {
        if let Ok(mut metrics) = self.inner.lock() {
            let counters = metrics.entry(feed).or_default();
            counters.ticks += 1;
            counters.errors += 1;
        }
    }

    pub fn counters(&self, feed: FeedKind) -> FeedCounters {
        if let Ok(metrics) = self.inner.lock() {
            metrics.get(&feed).copied().unwrap_or_default()
        } else {
            FeedCounters::default()
        }
    }

    pub fn snapshot(&self) -> BTreeMap<FeedKind, FeedCounters> {
        if let Ok(metrics) = self.inner.lock() {
            metrics.clone()
        } else {
            BTreeMap::new()
        }
    }
}

impl Default for FeedMetrics {
    fn default() -> Self {
        Self::new()
    }
}
