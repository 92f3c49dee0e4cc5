use crate::feed::{
    alert_summary_fixtures, AlertSummary, BoundedSink, ClockLabels, FeedGenerator,
    RenderedActivityItem,
};
use crate::fleet::{DroneRecord, FleetRegistry, FleetStatus};
use crate::monitoring::LogManager;
use crate::prelude::{DroneId, FeedKind, FeedTarget, SiteResult, TickOutcome};
use crate::session::{self, SelectionStore};
use crate::views::SinkLimits;
use serde::Serialize;

/// One roster entry on the fleet overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FleetCard {
    pub id: DroneId,
    pub name: String,
    pub battery: String,
    pub status_text: String,
    pub status: FleetStatus,
}

impl From<&DroneRecord> for FleetCard {
    fn from(drone: &DroneRecord) -> Self {
        Self {
            id: drone.id,
            name: drone.name.clone(),
            battery: format!("{}%", drone.battery_percent),
            status_text: drone.status_text.clone(),
            status: drone.fleet_status(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedRow {
    pub time: String,
    pub text: String,
}

impl From<&RenderedActivityItem> for FeedRow {
    fn from(item: &RenderedActivityItem) -> Self {
        Self {
            time: item.age_label(),
            text: format!("{} - {}", item.template.kind, item.template.location),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OverviewSnapshot {
    pub clock: ClockLabels,
    pub fleet: Vec<FleetCard>,
    pub alerts: Vec<AlertSummary>,
    pub activity_feed: Vec<FeedRow>,
}

/// Fleet overview: clock header, roster cards, alert summary, activity feed.
pub struct OverviewView {
    generator: FeedGenerator,
    registry: FleetRegistry,
    limits: SinkLimits,
    activity_feed: BoundedSink<RenderedActivityItem>,
    alerts: Vec<AlertSummary>,
    clock: ClockLabels,
    initialized: bool,
    logger: LogManager,
}

impl OverviewView {
    const FEEDS: &'static [FeedKind] = &[FeedKind::Clock, FeedKind::ActivityFeed];

    pub fn new(
        generator: FeedGenerator,
        registry: FleetRegistry,
        limits: SinkLimits,
    ) -> SiteResult<Self> {
        Ok(Self {
            generator,
            registry,
            limits,
            activity_feed: BoundedSink::new(limits.capacity)?,
            alerts: Vec::new(),
            clock: ClockLabels::default(),
            initialized: false,
            logger: LogManager::new("overview"),
        })
    }

    pub fn initialize(&mut self) -> SiteResult<()> {
        self.clock = ClockLabels::now();
        self.alerts = alert_summary_fixtures();
        let seed = self.generator.generate_activity_batch(
            self.limits.seed_count,
            self.limits.seed_spread,
            None,
        )?;
        self.activity_feed.replace(seed);
        self.initialized = true;
        self.logger.record(&format!(
            "initialized with {} drones",
            self.registry.drones().len()
        ));
        Ok(())
    }

    pub fn refresh_clock(&mut self) -> TickOutcome {
        self.clock = ClockLabels::now();
        TickOutcome::Refreshed
    }

    pub fn add_new_feed_item(&mut self) -> SiteResult<TickOutcome> {
        let batch = self
            .generator
            .generate_activity_batch(1, self.limits.tick_spread, None)?;
        let inserted = batch.len();
        let evicted = self.activity_feed.insert_all(batch);
        Ok(TickOutcome::updated(inserted, evicted))
    }

    /// Hands `id` to the live view through the selection store.
    pub fn view_live_feed(&self, id: DroneId, store: &mut dyn SelectionStore) -> SiteResult<()> {
        session::hand_off(store, id)?;
        self.logger.record(&format!("live feed requested for drone {id}"));
        Ok(())
    }

    pub fn fleet_cards(&self) -> Vec<FleetCard> {
        self.registry.drones().iter().map(FleetCard::from).collect()
    }

    pub fn activity_feed(&self) -> &BoundedSink<RenderedActivityItem> {
        &self.activity_feed
    }

    pub fn alerts(&self) -> &[AlertSummary] {
        &self.alerts
    }

    pub fn clock(&self) -> &ClockLabels {
        &self.clock
    }

    pub fn snapshot(&self) -> OverviewSnapshot {
        OverviewSnapshot {
            clock: self.clock.clone(),
            fleet: self.fleet_cards(),
            alerts: self.alerts.clone(),
            activity_feed: self.activity_feed.iter().map(FeedRow::from).collect(),
        }
    }
}

impl FeedTarget for OverviewView {
    fn name(&self) -> &'static str {
        "overview"
    }

    fn feeds(&self) -> &'static [FeedKind] {
        Self::FEEDS
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn refresh(&mut self, feed: FeedKind) -> SiteResult<TickOutcome> {
        match feed {
            FeedKind::Clock => Ok(self.refresh_clock()),
            FeedKind::ActivityFeed => self.add_new_feed_item(),
            _ => Ok(TickOutcome::ElementNotPresent),
        }
    }
}
