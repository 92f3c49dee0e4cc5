pub mod drone;
pub mod registry;

pub use drone::{DroneRecord, FleetStatus, SignalQuality};
pub use registry::FleetRegistry;
