//! View contexts: the dashboard, the live feed and the fleet overview.
//!
//! Each context owns its sinks and generator and decides which feeds it
//! hosts. The refresh scheduler only sees them through [`FeedTarget`].
//!
//! [`FeedTarget`]: crate::prelude::FeedTarget

pub mod dashboard;
pub mod live;
pub mod overview;

pub use dashboard::{DashboardSnapshot, DashboardView};
pub use live::{DisplaySurface, EventEntry, HeadlessDisplay, LiveSnapshot, LiveView};
pub use overview::{FeedRow, FleetCard, OverviewSnapshot, OverviewView};

use crate::feed::{AgeSpread, RenderedActivityItem};
use serde::{Deserialize, Serialize};

/// Capacity and seeding policy for one activity list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkLimits {
    pub capacity: usize,
    /// Items generated when the context initializes.
    pub seed_count: usize,
    pub seed_spread: AgeSpread,
    /// Spread for items added on each tick.
    pub tick_spread: AgeSpread,
}

impl SinkLimits {
    pub fn new(capacity: usize, seed_count: usize, seed_spread: AgeSpread) -> Self {
        Self {
            capacity,
            seed_count,
            seed_spread,
            tick_spread: AgeSpread::NEW_ITEM,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedLimits {
    pub activity_log: SinkLimits,
    pub event_stream: SinkLimits,
    pub activity_feed: SinkLimits,
}

impl Default for FeedLimits {
    fn default() -> Self {
        Self {
            activity_log: SinkLimits::new(20, 15, AgeSpread::ACTIVITY_LOG),
            event_stream: SinkLimits::new(15, 10, AgeSpread::EVENT_STREAM),
            activity_feed: SinkLimits::new(15, 10, AgeSpread::ACTIVITY_FEED),
        }
    }
}

/// Flattened activity entry as presented to a reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityRow {
    pub time: String,
    pub title: String,
    pub location: String,
    pub description: String,
}

impl From<&RenderedActivityItem> for ActivityRow {
    fn from(item: &RenderedActivityItem) -> Self {
        Self {
            time: item.age_label(),
            title: item.template.kind.clone(),
            location: item.template.location.clone(),
            description: item.template.description.clone(),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::catalog::CatalogStore;
    use crate::feed::FeedGenerator;
    use crate::sampling::RandomSampler;
    use std::sync::Arc;

    pub fn generator(seed: u64) -> FeedGenerator {
        FeedGenerator::new(
            Arc::new(CatalogStore::builtin().unwrap()),
            RandomSampler::seeded(seed),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits_match_site_layout() {
        let limits = FeedLimits::default();
        assert_eq!(limits.activity_log.capacity, 20);
        assert_eq!(limits.activity_log.seed_count, 15);
        assert_eq!(limits.event_stream.capacity, 15);
        assert_eq!(limits.event_stream.seed_count, 10);
        assert_eq!(limits.activity_feed.seed_spread, AgeSpread::ACTIVITY_FEED);
        assert_eq!(limits.activity_feed.tick_spread, AgeSpread::NEW_ITEM);
    }

    #[test]
    fn partial_limits_fill_in_defaults() {
        let limits: FeedLimits = serde_json::from_str(
            r#"{"event_stream":{"capacity":4,"seed_count":2,
                "seed_spread":{"kind":"fixed","minutes":3},
                "tick_spread":{"kind":"fixed","minutes":0}}}"#,
        )
        .unwrap();
        assert_eq!(limits.event_stream.capacity, 4);
        assert_eq!(limits.activity_log, FeedLimits::default().activity_log);
    }
}
