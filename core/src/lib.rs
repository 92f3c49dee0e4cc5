//! Simulation core for the SiteGuard drone site-surveillance dashboard.
//!
//! All data is synthetic: activity logs, event streams and detection
//! overlays are sampled from static catalogs and refreshed by independent
//! timers into bounded, newest-first sinks.

pub mod catalog;
pub mod feed;
pub mod fleet;
pub mod monitoring;
pub mod prelude;
pub mod sampling;
pub mod scheduler;
pub mod session;
pub mod views;

pub use prelude::{DroneId, FeedKind, FeedTarget, SiteError, SiteResult, TickOutcome};
