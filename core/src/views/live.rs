use crate::feed::generator::DETECTION_COUNT;
use crate::feed::{
    time_label, BoundedSink, FeedGenerator, RenderedActivityItem, RenderedDetectionBox,
    TelemetryReading,
};
use crate::fleet::FleetRegistry;
use crate::monitoring::LogManager;
use crate::prelude::{DroneId, FeedKind, FeedTarget, SiteError, SiteResult, TickOutcome};
use crate::session::{self, SelectionStore};
use crate::views::SinkLimits;
use chrono::Local;
use serde::Serialize;

/// Host surface able to put the video panel in fullscreen.
pub trait DisplaySurface: Send {
    fn enter_fullscreen(&mut self) -> SiteResult<()>;
    fn exit_fullscreen(&mut self) -> SiteResult<()>;
}

/// Surface for runs without a screen; requests always succeed.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessDisplay;

impl DisplaySurface for HeadlessDisplay {
    fn enter_fullscreen(&mut self) -> SiteResult<()> {
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> SiteResult<()> {
        Ok(())
    }
}

/// Event stream entry: the generated item plus the wall-clock stamp of insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventEntry {
    pub item: RenderedActivityItem,
    pub stamp: String,
}

impl EventEntry {
    fn stamped(item: RenderedActivityItem) -> Self {
        Self {
            item,
            stamp: time_label(&Local::now()),
        }
    }

    pub fn time_label(&self) -> String {
        format!("{} ({})", self.stamp, self.item.age_label())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LiveSnapshot {
    pub drone: DroneId,
    pub title: String,
    pub stream_source: String,
    pub fullscreen: bool,
    pub telemetry: Option<TelemetryReading>,
    pub detections: Vec<RenderedDetectionBox>,
    pub events: Vec<EventEntry>,
}

/// Live feed of the drone in focus: event stream, detection overlay, telemetry.
pub struct LiveView {
    generator: FeedGenerator,
    registry: FleetRegistry,
    limits: SinkLimits,
    events: BoundedSink<EventEntry>,
    detections: BoundedSink<RenderedDetectionBox>,
    telemetry: Option<TelemetryReading>,
    display: Box<dyn DisplaySurface>,
    fullscreen: bool,
    initialized: bool,
    logger: LogManager,
}

impl LiveView {
    const FEEDS: &'static [FeedKind] = &[
        FeedKind::Detections,
        FeedKind::EventStream,
        FeedKind::Telemetry,
    ];

    pub fn new(
        generator: FeedGenerator,
        registry: FleetRegistry,
        limits: SinkLimits,
        display: Box<dyn DisplaySurface>,
    ) -> SiteResult<Self> {
        Ok(Self {
            generator,
            registry,
            limits,
            events: BoundedSink::new(limits.capacity)?,
            detections: BoundedSink::new(*DETECTION_COUNT.end() as usize)?,
            telemetry: None,
            display,
            fullscreen: false,
            initialized: false,
            logger: LogManager::new("live"),
        })
    }

    /// Consumes a pending drone selection, then builds the drone-scoped feeds.
    pub fn initialize(&mut self, store: &mut dyn SelectionStore) -> SiteResult<()> {
        if let Some(id) = session::take_selected(store)? {
            self.logger.record(&format!("opening on handed-off drone {id}"));
            self.registry.set_current(id);
        }
        self.regenerate_drone_feeds()?;
        self.initialized = true;
        self.logger.record(&format!(
            "initialized on drone {}",
            self.registry.current_id()
        ));
        Ok(())
    }

    /// Moves focus to `id` and rebuilds the event stream and overlays at once.
    pub fn switch_drone(&mut self, id: DroneId) -> SiteResult<()> {
        self.registry.set_current(id);
        self.regenerate_drone_feeds()?;
        self.logger.record(&format!("switched to drone {id}"));
        Ok(())
    }

    fn regenerate_drone_feeds(&mut self) -> SiteResult<()> {
        let drone = self.registry.current_id();
        let seed = self.generator.generate_activity_batch(
            self.limits.seed_count,
            self.limits.seed_spread,
            Some(drone),
        )?;
        self.events.replace(seed.into_iter().map(EventEntry::stamped));
        self.refresh_detections()?;
        self.logger.detail(&format!(
            "regenerated {} events and {} detections for drone {drone}",
            self.events.len(),
            self.detections.len()
        ));
        Ok(())
    }

    pub fn refresh_detections(&mut self) -> SiteResult<TickOutcome> {
        let previous = self.detections.len();
        let boxes = self.generator.generate_detection_batch()?;
        let inserted = boxes.len();
        self.detections.replace(boxes);
        Ok(TickOutcome::updated(inserted, previous))
    }

    pub fn add_new_event(&mut self) -> SiteResult<TickOutcome> {
        let drone = self.registry.current_id();
        let batch =
            self.generator
                .generate_activity_batch(1, self.limits.tick_spread, Some(drone))?;
        let inserted = batch.len();
        let evicted = self
            .events
            .insert_all(batch.into_iter().map(EventEntry::stamped));
        Ok(TickOutcome::updated(inserted, evicted))
    }

    pub fn refresh_telemetry(&mut self) -> SiteResult<TickOutcome> {
        let reading =
            TelemetryReading::sample(self.generator.sampler(), self.registry.get_current())?;
        self.telemetry = Some(reading);
        Ok(TickOutcome::Refreshed)
    }

    /// Flips fullscreen on the display. Failures are logged and otherwise ignored.
    pub fn toggle_fullscreen(&mut self) {
        let result = if self.fullscreen {
            self.display.exit_fullscreen()
        } else {
            self.display.enter_fullscreen()
        };
        match result {
            Ok(()) => self.fullscreen = !self.fullscreen,
            Err(SiteError::Fullscreen(reason)) => self
                .logger
                .warn(&format!("error attempting to toggle fullscreen: {reason}")),
            Err(err) => self.logger.warn(&format!("fullscreen toggle failed: {err}")),
        }
    }

    pub fn current_drone(&self) -> DroneId {
        self.registry.current_id()
    }

    pub fn registry(&self) -> &FleetRegistry {
        &self.registry
    }

    pub fn events(&self) -> &BoundedSink<EventEntry> {
        &self.events
    }

    pub fn detections(&self) -> &BoundedSink<RenderedDetectionBox> {
        &self.detections
    }

    pub fn telemetry(&self) -> Option<&TelemetryReading> {
        self.telemetry.as_ref()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn title(&self) -> String {
        format!("Drone {} - Live Feed", self.registry.current_id())
    }

    pub fn stream_source(&self) -> String {
        let topic = self
            .registry
            .get_current()
            .map(|drone| drone.camera_topic.as_str())
            .unwrap_or("N/A");
        format!("Placeholder (Gazebo Topic: {topic})")
    }

    pub fn snapshot(&self) -> LiveSnapshot {
        LiveSnapshot {
            drone: self.registry.current_id(),
            title: self.title(),
            stream_source: self.stream_source(),
            fullscreen: self.fullscreen,
            telemetry: self.telemetry.clone(),
            detections: self.detections.iter().cloned().collect(),
            events: self.events.iter().cloned().collect(),
        }
    }
}

impl FeedTarget for LiveView {
    fn name(&self) -> &'static str {
        "live"
    }

    fn feeds(&self) -> &'static [FeedKind] {
        Self::FEEDS
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn refresh(&mut self, feed: FeedKind) -> SiteResult<TickOutcome> {
        match feed {
            FeedKind::Detections => self.refresh_detections(),
            FeedKind::EventStream => self.add_new_event(),
            FeedKind::Telemetry => self.refresh_telemetry(),
            _ => Ok(TickOutcome::ElementNotPresent),
        }
    }
}
