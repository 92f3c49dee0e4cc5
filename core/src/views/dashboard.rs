use crate::feed::{AlertTimes, BoundedSink, FeedGenerator, RenderedActivityItem};
use crate::monitoring::LogManager;
use crate::prelude::{FeedKind, FeedTarget, SiteResult, TickOutcome};
use crate::views::{ActivityRow, SinkLimits};
use serde::Serialize;

/// Site dashboard: rolling activity log and the active-alert time labels.
pub struct DashboardView {
    generator: FeedGenerator,
    limits: SinkLimits,
    activity_log: BoundedSink<RenderedActivityItem>,
    alert_times: AlertTimes,
    initialized: bool,
    logger: LogManager,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub activity_log: Vec<ActivityRow>,
    pub alert_times: AlertTimes,
}

impl DashboardView {
    const FEEDS: &'static [FeedKind] = &[FeedKind::ActivityLog, FeedKind::AlertTimes];

    pub fn new(generator: FeedGenerator, limits: SinkLimits) -> SiteResult<Self> {
        Ok(Self {
            generator,
            limits,
            activity_log: BoundedSink::new(limits.capacity)?,
            alert_times: AlertTimes::default(),
            initialized: false,
            logger: LogManager::new("dashboard"),
        })
    }

    pub fn initialize(&mut self) -> SiteResult<()> {
        let seed = self.generator.generate_activity_batch(
            self.limits.seed_count,
            self.limits.seed_spread,
            None,
        )?;
        self.activity_log.replace(seed);
        self.alert_times = AlertTimes::current();
        self.initialized = true;
        self.logger.record(&format!(
            "initialized with {} activity entries",
            self.activity_log.len()
        ));
        Ok(())
    }

    pub fn add_new_activity(&mut self) -> SiteResult<TickOutcome> {
        let batch = self
            .generator
            .generate_activity_batch(1, self.limits.tick_spread, None)?;
        let inserted = batch.len();
        let evicted = self.activity_log.insert_all(batch);
        Ok(TickOutcome::updated(inserted, evicted))
    }

    pub fn refresh_alert_times(&mut self) -> TickOutcome {
        self.alert_times = AlertTimes::current();
        TickOutcome::Refreshed
    }

    pub fn activity_log(&self) -> &BoundedSink<RenderedActivityItem> {
        &self.activity_log
    }

    pub fn alert_times(&self) -> &AlertTimes {
        &self.alert_times
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            activity_log: self.activity_log.iter().map(ActivityRow::from).collect(),
            alert_times: self.alert_times.clone(),
        }
    }
}

impl FeedTarget for DashboardView {
    fn name(&self) -> &'static str {
        "dashboard"
    }

    fn feeds(&self) -> &'static [FeedKind] {
        Self::FEEDS
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn refresh(&mut self, feed: FeedKind) -> SiteResult<TickOutcome> {
        match feed {
            FeedKind::ActivityLog => self.add_new_activity(),
            FeedKind::AlertTimes => Ok(self.refresh_alert_times()),
            _ => Ok(TickOutcome::ElementNotPresent),
        }
    }
}
