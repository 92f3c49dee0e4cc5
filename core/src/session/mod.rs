//! One-shot drone selection handoff from the fleet overview to the live view.

pub mod store;

pub use store::{FileStore, MemoryStore, SelectionStore};

use crate::prelude::{DroneId, SiteResult};
use log::warn;

pub const SELECTED_DRONE_KEY: &str = "selectedDrone";

/// Records `id` as the drone the live view should open on.
pub fn hand_off(store: &mut dyn SelectionStore, id: DroneId) -> SiteResult<()> {
    store.set(SELECTED_DRONE_KEY, &id.to_string())
}

/// Reads and clears the pending selection. Unparsable values are dropped,
/// and a store that cannot be read is reset to empty.
pub fn take_selected(store: &mut dyn SelectionStore) -> SiteResult<Option<DroneId>> {
    let raw = match store.get(SELECTED_DRONE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Ok(None),
        Err(err) => {
            warn!("discarding unreadable selection store: {}", err);
            if let Err(err) = store.reset() {
                warn!("selection store reset failed: {}", err);
            }
            return Ok(None);
        }
    };
    store.remove(SELECTED_DRONE_KEY)?;
    match raw.trim().parse::<DroneId>() {
        Ok(id) => Ok(Some(id)),
        Err(_) => {
            warn!("ignoring malformed {} value {:?}", SELECTED_DRONE_KEY, raw);
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn selection_is_consumed_once() {
        let mut store = MemoryStore::new();
        hand_off(&mut store, 3).unwrap();
        assert_eq!(take_selected(&mut store).unwrap(), Some(3));
        assert_eq!(take_selected(&mut store).unwrap(), None);
    }

    #[test]
    fn malformed_selection_is_cleared() {
        let mut store = MemoryStore::new();
        store.set(SELECTED_DRONE_KEY, "drone-three").unwrap();
        assert_eq!(take_selected(&mut store).unwrap(), None);
        assert_eq!(store.get(SELECTED_DRONE_KEY).unwrap(), None);
    }

    #[test]
    fn corrupt_store_yields_no_selection_and_is_repaired() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("selection.json");
        fs::write(&path, "{ truncated").unwrap();
        let mut store = FileStore::new(&path);
        assert_eq!(take_selected(&mut store).unwrap(), None);

        hand_off(&mut store, 2).unwrap();
        assert_eq!(take_selected(&mut store).unwrap(), Some(2));
    }
}
