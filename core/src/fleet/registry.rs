use crate::fleet::drone::{builtin_drones, DroneRecord};
use crate::prelude::{DroneId, SiteError, SiteResult};
use std::collections::HashSet;

/// Fixed drone roster plus the id of the drone currently in focus.
///
/// A registry belongs to the view context that uses it; there is no
/// process-wide selection.
#[derive(Debug, Clone)]
pub struct FleetRegistry {
    drones: Vec<DroneRecord>,
    current: DroneId,
}

impl FleetRegistry {
    pub fn new(drones: Vec<DroneRecord>) -> SiteResult<Self> {
        let first = drones.first().ok_or(SiteError::EmptyFleet)?.id;
        let mut seen = HashSet::new();
        for drone in &drones {
            if drone.id == 0 {
                return Err(SiteError::InvalidDroneId(drone.id));
            }
            if !seen.insert(drone.id) {
                return Err(SiteError::DuplicateDroneId(drone.id));
            }
            if drone.battery_percent > 100 {
                return Err(SiteError::InvalidBattery(drone.battery_percent));
            }
        }
        Ok(Self {
            drones,
            current: first,
        })
    }

    pub fn builtin() -> SiteResult<Self> {
        Self::new(builtin_drones())
    }

    pub fn drones(&self) -> &[DroneRecord] {
        &self.drones
    }

    pub fn get_by_id(&self, id: DroneId) -> Option<&DroneRecord> {
        self.drones.iter().find(|drone| drone.id == id)
    }

    /// Sets the current drone without checking that it exists.
    pub fn set_current(&mut self, id: DroneId) {
        self.current = id;
    }

    /// Like [`FleetRegistry::set_current`], but refuses ids outside the roster.
    pub fn select_checked(&mut self, id: DroneId) -> SiteResult<()> {
        if self.get_by_id(id).is_none() {
            return Err(SiteError::UnknownDroneId(id));
        }
        self.current = id;
        Ok(())
    }

    pub fn current_id(&self) -> DroneId {
        self.current
    }

    pub fn get_current(&self) -> Option<&DroneRecord> {
        self.get_by_id(self.current)
    }
}
