use serde::Serialize;
use siteguardcore::monitoring::FeedCounters;
use siteguardcore::views::{DashboardSnapshot, LiveSnapshot, OverviewSnapshot};
use siteguardcore::FeedKind;
use std::collections::BTreeMap;

/// Every view context at one instant.
#[derive(Debug, Clone, Serialize)]
pub struct SiteSnapshot {
    pub dashboard: DashboardSnapshot,
    pub live: LiveSnapshot,
    pub overview: OverviewSnapshot,
}

/// Per-feed tick counters printed when the simulation stops.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub feeds: BTreeMap<FeedKind, FeedCounters>,
}

impl RunReport {
    pub fn lines(&self) -> Vec<String> {
        self.feeds
            .iter()
            .map(|(feed, c)| {
                format!(
                    "{feed}: ticks={} inserted={} evicted={} not_present={} errors={}",
                    c.ticks, c.inserted, c.evicted, c.not_present, c.errors
                )
            })
            .collect()
    }
}
