use crate::prelude::{FeedKind, SiteError, SiteResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Refresh period per feed, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshPlan {
    pub activity_log_ms: u64,
    pub telemetry_ms: u64,
    pub detections_ms: u64,
    pub event_stream_ms: u64,
    pub activity_feed_ms: u64,
    pub alert_times_ms: u64,
    pub clock_ms: u64,
}

impl Default for RefreshPlan {
    fn default() -> Self {
        Self {
            activity_log_ms: 10_000,
            telemetry_ms: 2_000,
            detections_ms: 3_000,
            event_stream_ms: 8_000,
            activity_feed_ms: 10_000,
            alert_times_ms: 60_000,
            clock_ms: 1_000,
        }
    }
}

impl RefreshPlan {
    pub fn period_ms(&self, feed: FeedKind) -> u64 {
        match feed {
            FeedKind::ActivityLog => self.activity_log_ms,
            FeedKind::Telemetry => self.telemetry_ms,
            FeedKind::Detections => self.detections_ms,
            FeedKind::EventStream => self.event_stream_ms,
            FeedKind::ActivityFeed => self.activity_feed_ms,
            FeedKind::AlertTimes => self.alert_times_ms,
            FeedKind::Clock => self.clock_ms,
        }
    }

    pub fn period(&self, feed: FeedKind) -> Duration {
        Duration::from_millis(self.period_ms(feed))
    }

    pub fn validate(&self) -> SiteResult<()> {
        match FeedKind::ALL.iter().find(|feed| self.period_ms(**feed) == 0) {
            Some(feed) => Err(SiteError::InvalidPeriod(*feed)),
            None => Ok(()),
        }
    }
}
