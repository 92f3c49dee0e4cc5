//! Generated view content: bounded sinks, generators and fixture data.

pub mod alerts;
pub mod clock;
pub mod generator;
pub mod sink;
pub mod telemetry;

pub use alerts::{alert_summary_fixtures, AlertSeverity, AlertSummary, AlertTimes};
pub use clock::{time_label, ClockLabels};
pub use generator::{
    age_to_label, AgeSpread, FeedGenerator, RenderedActivityItem, RenderedDetectionBox,
};
pub use sink::BoundedSink;
pub use telemetry::TelemetryReading;
