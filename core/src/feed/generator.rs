use crate::catalog::{ActivityTemplate, CatalogStore, DetectionTemplate};
use crate::prelude::{DroneId, SiteResult};
use crate::sampling::RandomSampler;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::sync::Arc;

pub const DETECTION_COUNT: RangeInclusive<u32> = 2..=5;
pub const CONFIDENCE_PERCENT: RangeInclusive<u32> = 85..=99;
pub const BOX_ORIGIN_PERCENT: RangeInclusive<u32> = 10..=70;
pub const BOX_WIDTH_PERCENT: RangeInclusive<u32> = 10..=20;
pub const BOX_HEIGHT_PERCENT: RangeInclusive<u32> = 15..=25;

/// Interval policy for the age of the `i`-th item of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AgeSpread {
    /// Every item gets the same age.
    Fixed { minutes: u32 },
    /// Item `i` is aged uniformly in `[step * i, step * i + width]`.
    Linear { step: u32, width: u32 },
}

impl AgeSpread {
    pub const ACTIVITY_LOG: AgeSpread = AgeSpread::Linear { step: 2, width: 5 };
    pub const ACTIVITY_FEED: AgeSpread = AgeSpread::Linear { step: 1, width: 5 };
    pub const EVENT_STREAM: AgeSpread = AgeSpread::Linear { step: 1, width: 2 };
    pub const NEW_ITEM: AgeSpread = AgeSpread::Fixed { minutes: 0 };

    pub fn bounds(&self, index: usize) -> (u32, u32) {
        match *self {
            AgeSpread::Fixed { minutes } => (minutes, minutes),
            AgeSpread::Linear { step, width } => {
                let low = step.saturating_mul(index as u32);
                (low, low.saturating_add(width))
            }
        }
    }
}

/// Activity entry placed in a log, feed or event stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedActivityItem {
    pub template: ActivityTemplate,
    pub age_minutes: u32,
    /// Generator batch counter at creation time.
    pub inserted_at: u64,
    /// Drone whose context the item was generated for, if any.
    pub drone: Option<DroneId>,
}

impl RenderedActivityItem {
    pub fn age_label(&self) -> String {
        age_to_label(self.age_minutes)
    }
}

/// Overlay box drawn on the live video feed; geometry in percent of the frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedDetectionBox {
    pub template: DetectionTemplate,
    pub confidence_percent: u32,
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

/// Human readable age. Whole hours only once past 59 minutes.
pub fn age_to_label(minutes: u32) -> String {
    match minutes {
        0 => "Just now".to_string(),
        1 => "1 minute ago".to_string(),
        2..=59 => format!("{minutes} minutes ago"),
        _ => match minutes / 60 {
            1 => "1 hour ago".to_string(),
            hours => format!("{hours} hours ago"),
        },
    }
}

/// Samples catalog templates into rendered activity items and detection boxes.
#[derive(Debug, Clone)]
pub struct FeedGenerator {
    catalog: Arc<CatalogStore>,
    sampler: RandomSampler,
    tick: u64,
}

impl FeedGenerator {
    pub fn new(catalog: Arc<CatalogStore>, sampler: RandomSampler) -> Self {
        Self {
            catalog,
            sampler,
            tick: 0,
        }
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn sampler(&mut self) -> &mut RandomSampler {
        &mut self.sampler
    }

    /// Number of batches produced so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn generate_activity_batch(
        &mut self,
        count: usize,
        spread: AgeSpread,
        drone: Option<DroneId>,
    ) -> SiteResult<Vec<RenderedActivityItem>> {
        self.tick += 1;
        let mut batch = Vec::with_capacity(count);
        for index in 0..count {
            let template = self.catalog.pick_activity(&mut self.sampler)?.clone();
            let (low, high) = spread.bounds(index);
            let age_minutes = self.sampler.sample_int(low, high)?;
            batch.push(RenderedActivityItem {
                template,
                age_minutes,
                inserted_at: self.tick,
                drone,
            });
        }
        Ok(batch)
    }

    /// Fresh overlay set; replaces whatever was shown before.
    pub fn generate_detection_batch(&mut self) -> SiteResult<Vec<RenderedDetectionBox>> {
        self.tick += 1;
        let count = self.sample(&DETECTION_COUNT)?;
        let mut boxes = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let template = self.catalog.pick_detection(&mut self.sampler)?.clone();
            boxes.push(RenderedDetectionBox {
                template,
                confidence_percent: self.sample(&CONFIDENCE_PERCENT)?,
                left: self.sample(&BOX_ORIGIN_PERCENT)?,
                top: self.sample(&BOX_ORIGIN_PERCENT)?,
                width: self.sample(&BOX_WIDTH_PERCENT)?,
                height: self.sample(&BOX_HEIGHT_PERCENT)?,
            });
        }
        Ok(boxes)
    }

    fn sample(&mut self, range: &RangeInclusive<u32>) -> SiteResult<u32> {
        self.sampler.sample_int(*range.start(), *range.end())
    }
}
