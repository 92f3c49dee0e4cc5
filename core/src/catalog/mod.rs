//! Static catalogs sampled by the feed generators.

pub mod templates;

pub use templates::{ActivityTemplate, DetectionTemplate, HexColor};

use crate::prelude::{SiteError, SiteResult};
use crate::sampling::RandomSampler;

/// Read-only activity and detection catalogs, loaded once at startup.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    activities: Vec<ActivityTemplate>,
    detections: Vec<DetectionTemplate>,
}

impl CatalogStore {
    pub fn new(
        activities: Vec<ActivityTemplate>,
        detections: Vec<DetectionTemplate>,
    ) -> SiteResult<Self> {
        if activities.is_empty() {
            return Err(SiteError::EmptyCatalog("activity templates"));
        }
        if detections.is_empty() {
            return Err(SiteError::EmptyCatalog("detection templates"));
        }
        Ok(Self {
            activities,
            detections,
        })
    }

    /// The eight activity templates and seven detection classes of the site.
    pub fn builtin() -> SiteResult<Self> {
        Self::new(templates::builtin_activities(), templates::builtin_detections()?)
    }

    pub fn activity_templates(&self) -> &[ActivityTemplate] {
        &self.activities
    }

    pub fn detection_templates(&self) -> &[DetectionTemplate] {
        &self.detections
    }

    pub fn pick_activity(&self, sampler: &mut RandomSampler) -> SiteResult<&ActivityTemplate> {
        let last = self.activities.len() as u32 - 1;
        let index = sampler.sample_int(0, last)? as usize;
        Ok(&self.activities[index])
    }

    pub fn pick_detection(&self, sampler: &mut RandomSampler) -> SiteResult<&DetectionTemplate> {
        let last = self.detections.len() as u32 - 1;
        let index = sampler.sample_int(0, last)? as usize;
        Ok(&self.detections[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_expected_sizes() {
        let catalog = CatalogStore::builtin().unwrap();
        assert_eq!(catalog.activity_templates().len(), 8);
        assert_eq!(catalog.detection_templates().len(), 7);
    }

    #[test]
    fn picks_come_from_the_catalog() {
        let catalog = CatalogStore::builtin().unwrap();
        let mut sampler = RandomSampler::seeded(11);
        for _ in 0..100 {
            let activity = catalog.pick_activity(&mut sampler).unwrap();
            assert!(catalog.activity_templates().contains(activity));
            let detection = catalog.pick_detection(&mut sampler).unwrap();
            assert!(catalog.detection_templates().contains(detection));
        }
    }

    #[test]
    fn empty_catalogs_are_rejected() {
        let detections = templates::builtin_detections().unwrap();
        assert!(matches!(
            CatalogStore::new(Vec::new(), detections),
            Err(SiteError::EmptyCatalog(_))
        ));
        assert!(matches!(
            CatalogStore::new(templates::builtin_activities(), Vec::new()),
            Err(SiteError::EmptyCatalog(_))
        ));
    }
}
