use crate::fleet::DroneRecord;
use crate::prelude::SiteResult;
use crate::sampling::RandomSampler;
use serde::Serialize;

/// Battery shown when the current drone is not in the roster.
pub const FALLBACK_BATTERY_PERCENT: u8 = 85;

/// Simulated flight readout for the drone in focus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TelemetryReading {
    pub altitude_m: u32,
    pub speed_mps: u32,
    pub battery_percent: u8,
    /// Fractional digits of the latitude, `37.{lat_fraction}`.
    pub lat_fraction: u32,
    /// Fractional digits of the longitude, `-122.{lon_fraction}`.
    pub lon_fraction: u32,
}

impl TelemetryReading {
    pub fn sample(sampler: &mut RandomSampler, drone: Option<&DroneRecord>) -> SiteResult<Self> {
        Ok(Self {
            altitude_m: sampler.sample_int(45, 55)?,
            speed_mps: sampler.sample_int(8, 12)?,
            battery_percent: drone
                .map(|d| d.battery_percent)
                .unwrap_or(FALLBACK_BATTERY_PERCENT),
            lat_fraction: sampler.sample_int(7700, 7799)?,
            lon_fraction: sampler.sample_int(4100, 4199)?,
        })
    }

    pub fn altitude_label(&self) -> String {
        format!("{}m", self.altitude_m)
    }

    pub fn speed_label(&self) -> String {
        format!("{} m/s", self.speed_mps)
    }

    pub fn battery_label(&self) -> String {
        format!("{}%", self.battery_percent)
    }

    pub fn gps_label(&self) -> String {
        format!("37.{}, -122.{}", self.lat_fraction, self.lon_fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::FleetRegistry;

    #[test]
    fn reading_uses_drone_battery() {
        let registry = FleetRegistry::builtin().unwrap();
        let mut sampler = RandomSampler::seeded(4);
        let reading = TelemetryReading::sample(&mut sampler, registry.get_by_id(3)).unwrap();
        assert_eq!(reading.battery_percent, 23);
        assert_eq!(reading.battery_label(), "23%");
    }

    #[test]
    fn reading_falls_back_without_drone() {
        let mut sampler = RandomSampler::seeded(4);
        let reading = TelemetryReading::sample(&mut sampler, None).unwrap();
        assert_eq!(reading.battery_percent, FALLBACK_BATTERY_PERCENT);
    }

    #[test]
    fn reading_values_and_labels_stay_in_range() {
        let mut sampler = RandomSampler::seeded(99);
        for _ in 0..100 {
            let reading = TelemetryReading::sample(&mut sampler, None).unwrap();
            assert!((45..=55).contains(&reading.altitude_m));
            assert!((8..=12).contains(&reading.speed_mps));
            assert!(reading.gps_label().starts_with("37.77"));
            assert!(reading.gps_label().contains(", -122.41"));
            assert!(reading.altitude_label().ends_with('m'));
            assert!(reading.speed_label().ends_with(" m/s"));
        }
    }
}
