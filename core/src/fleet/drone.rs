use crate::prelude::DroneId;
use serde::{Deserialize, Serialize};

/// Link quality reported for a drone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalQuality {
    Excellent,
    Good,
    Poor,
    #[serde(rename = "N/A")]
    NotAvailable,
}

impl SignalQuality {
    pub fn label(&self) -> &'static str {
        match self {
            SignalQuality::Excellent => "Excellent",
            SignalQuality::Good => "Good",
            SignalQuality::Poor => "Poor",
            SignalQuality::NotAvailable => "N/A",
        }
    }
}

/// Status class shown on the fleet overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FleetStatus {
    Active,
    Charging,
    Offline,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroneRecord {
    pub id: DroneId,
    pub name: String,
    pub status_text: String,
    pub battery_percent: u8,
    pub signal: SignalQuality,
    pub online: bool,
    pub camera_topic: String,
    pub telemetry_topic: String,
}

impl DroneRecord {
    pub fn new(
        id: DroneId,
        status_text: &str,
        battery_percent: u8,
        signal: SignalQuality,
        online: bool,
    ) -> Self {
        Self {
            id,
            name: format!("Drone {id}"),
            status_text: status_text.to_string(),
            battery_percent,
            signal,
            online,
            camera_topic: format!("/drone_{id}/camera/image"),
            telemetry_topic: format!("/drone_{id}/telemetry"),
        }
    }

    pub fn fleet_status(&self) -> FleetStatus {
        if self.online {
            FleetStatus::Active
        } else if self.battery_percent > 0 {
            FleetStatus::Charging
        } else {
            FleetStatus::Offline
        }
    }
}

pub(crate) fn builtin_drones() -> Vec<DroneRecord> {
    vec![
        DroneRecord::new(1, "Patrolling Zone A", 85, SignalQuality::Excellent, true),
        DroneRecord::new(2, "Monitoring Fire Alert", 92, SignalQuality::Good, true),
        DroneRecord::new(3, "Low Battery - Charging", 23, SignalQuality::NotAvailable, false),
        DroneRecord::new(4, "Perimeter Patrol", 78, SignalQuality::Excellent, true),
        DroneRecord::new(5, "Offline - Maintenance", 0, SignalQuality::NotAvailable, false),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fleet_status_follows_online_and_battery() {
        let drones = builtin_drones();
        let statuses: Vec<_> = drones.iter().map(DroneRecord::fleet_status).collect();
        assert_eq!(
            statuses,
            vec![
                FleetStatus::Active,
                FleetStatus::Active,
                FleetStatus::Charging,
                FleetStatus::Active,
                FleetStatus::Offline,
            ]
        );
    }

    #[test]
    fn record_derives_topics_from_id() {
        let drone = DroneRecord::new(4, "Perimeter Patrol", 78, SignalQuality::Excellent, true);
        assert_eq!(drone.name, "Drone 4");
        assert_eq!(drone.camera_topic, "/drone_4/camera/image");
        assert_eq!(drone.telemetry_topic, "/drone_4/telemetry");
    }

    #[test]
    fn signal_not_available_serializes_as_label() {
        let json = serde_json::to_string(&SignalQuality::NotAvailable).unwrap();
        assert_eq!(json, "\"N/A\"");
        assert_eq!(SignalQuality::NotAvailable.label(), "N/A");
    }
}
