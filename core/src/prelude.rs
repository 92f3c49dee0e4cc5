use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a drone in the fleet. Ids start at 1.
pub type DroneId = u32;

/// Feeds driven by the refresh scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedKind {
    ActivityLog,
    Telemetry,
    Detections,
    EventStream,
    ActivityFeed,
    AlertTimes,
    Clock,
}

impl FeedKind {
    pub const ALL: [FeedKind; 7] = [
        FeedKind::ActivityLog,
        FeedKind::Telemetry,
        FeedKind::Detections,
        FeedKind::EventStream,
        FeedKind::ActivityFeed,
        FeedKind::AlertTimes,
        FeedKind::Clock,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedKind::ActivityLog => "activity_log",
            FeedKind::Telemetry => "telemetry",
            FeedKind::Detections => "detections",
            FeedKind::EventStream => "event_stream",
            FeedKind::ActivityFeed => "activity_feed",
            FeedKind::AlertTimes => "alert_times",
            FeedKind::Clock => "clock",
        }
    }
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a single timer fire against a view context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The feed was regenerated; counts describe the sink mutation.
    Updated { inserted: usize, evicted: usize },
    /// Labels were recomputed; no list changed.
    Refreshed,
    /// The context does not host this feed. Not a failure.
    ElementNotPresent,
}

impl TickOutcome {
    pub fn updated(inserted: usize, evicted: usize) -> Self {
        TickOutcome::Updated { inserted, evicted }
    }
}

/// Common error type for the simulation core.
#[derive(thiserror::Error, Debug)]
pub enum SiteError {
    #[error("invalid sampling range: min {min} > max {max}")]
    InvalidRange { min: u32, max: u32 },
    #[error("sink capacity must be at least 1")]
    InvalidCapacity,
    #[error("catalog is empty: {0}")]
    EmptyCatalog(&'static str),
    #[error("fleet has no drones")]
    EmptyFleet,
    #[error("drone id {0} must be at least 1")]
    InvalidDroneId(DroneId),
    #[error("duplicate drone id {0}")]
    DuplicateDroneId(DroneId),
    #[error("battery level {0}% outside 0..=100")]
    InvalidBattery(u8),
    #[error("invalid color: {0}")]
    InvalidColor(String),
    #[error("unknown drone id {0}")]
    UnknownDroneId(DroneId),
    #[error("refresh period for {0} must be non-zero")]
    InvalidPeriod(FeedKind),
    #[error("fullscreen request failed: {0}")]
    Fullscreen(String),
    #[error("{feed} timer for view {view} is already attached")]
    AlreadyAttached { view: &'static str, feed: FeedKind },
    #[error("view {0} has not been initialized")]
    NotInitialized(&'static str),
    #[error("selection store failure: {0}")]
    Storage(String),
}

impl From<std::io::Error> for SiteError {
    fn from(err: std::io::Error) -> Self {
        SiteError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for SiteError {
    fn from(err: serde_json::Error) -> Self {
        SiteError::Storage(err.to_string())
    }
}

pub type SiteResult<T> = Result<T, SiteError>;

/// Minimal bounded, insertion-ordered container used by the view contexts.
///
/// Items are inserted at the front; overflow is evicted from the back.
pub trait FeedSink<T> {
    fn push(&mut self, item: T);
    /// Removes items from the back until at most `capacity` remain and
    /// returns how many were removed.
    fn evict_overflow(&mut self, capacity: usize) -> usize;
    fn list(&self) -> Vec<&T>;
}

/// A view context that the refresh scheduler can drive.
pub trait FeedTarget {
    fn name(&self) -> &'static str;
    /// Feeds this context hosts; the scheduler starts one timer per entry.
    fn feeds(&self) -> &'static [FeedKind];
    fn is_initialized(&self) -> bool;
    fn refresh(&mut self, feed: FeedKind) -> SiteResult<TickOutcome>;
}
