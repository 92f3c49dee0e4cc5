//! Repeating per-feed timers driving the view contexts.
//!
//! Every feed a context hosts gets its own [`FeedTimer`]. Timers are not
//! synchronized with each other. Each fire locks the context for the whole
//! generate + insert + evict step, so a sink never exceeds its capacity even
//! on a multi-threaded runtime. Nothing stops on its own: call
//! [`RefreshScheduler::stop_feed`], [`RefreshScheduler::stop_all`] or
//! [`RefreshScheduler::shutdown`].

pub mod plan;
pub mod timer;

pub use plan::RefreshPlan;
pub use timer::FeedTimer;

use crate::monitoring::FeedMetrics;
use crate::prelude::{FeedKind, FeedTarget, SiteError, SiteResult};
use log::info;
use std::sync::{Arc, Mutex, PoisonError};

pub struct RefreshScheduler {
    plan: RefreshPlan,
    metrics: Arc<FeedMetrics>,
    timers: Vec<FeedTimer>,
}

impl RefreshScheduler {
    pub fn new(plan: RefreshPlan) -> SiteResult<Self> {
        plan.validate()?;
        Ok(Self {
            plan,
            metrics: Arc::new(FeedMetrics::new()),
            timers: Vec::new(),
        })
    }

    pub fn metrics(&self) -> Arc<FeedMetrics> {
        self.metrics.clone()
    }

    /// Starts one timer per feed hosted by `target`. Must be called from
    /// within a tokio runtime, after the context has been initialized.
    /// A context whose feeds still hold timers here is rejected; drop them
    /// with [`RefreshScheduler::stop_feed`] before attaching again.
    pub fn attach<T>(&mut self, target: &Arc<Mutex<T>>) -> SiteResult<Vec<FeedKind>>
    where
        T: FeedTarget + Send + 'static,
    {
        let (name, feeds) = {
            let guard = target.lock().unwrap_or_else(PoisonError::into_inner);
            if !guard.is_initialized() {
                return Err(SiteError::NotInitialized(guard.name()));
            }
            (guard.name(), guard.feeds())
        };
        if let Some(timer) = self
            .timers
            .iter()
            .find(|timer| timer.view() == name && feeds.contains(&timer.feed()))
        {
            return Err(SiteError::AlreadyAttached {
                view: name,
                feed: timer.feed(),
            });
        }

        for &feed in feeds {
            let period = self.plan.period(feed);
            info!("[{}] starting {} timer every {:?}", name, feed, period);
            self.timers.push(FeedTimer::spawn(
                feed,
                period,
                target.clone(),
                self.metrics.clone(),
            ));
        }
        Ok(feeds.to_vec())
    }

    /// Feeds whose timer task is still alive, with the owning context.
    pub fn running(&self) -> Vec<(&'static str, FeedKind)> {
        self.timers
            .iter()
            .filter(|timer| timer.is_running())
            .map(|timer| (timer.view(), timer.feed()))
            .collect()
    }

    /// Stops and forgets every timer for `feed`. Returns how many were stopped.
    pub fn stop_feed(&mut self, feed: FeedKind) -> usize {
        let before = self.timers.len();
        self.timers.retain(|timer| {
            if timer.feed() == feed {
                timer.stop();
                false
            } else {
                true
            }
        });
        let stopped = before - self.timers.len();
        if stopped > 0 {
            info!("stopped {} {} timer(s)", stopped, feed);
        }
        stopped
    }

    pub fn stop_all(&self) {
        for timer in &self.timers {
            timer.stop();
        }
    }

    /// Stops every timer and waits for their tasks to finish.
    pub async fn shutdown(self) -> Arc<FeedMetrics> {
        info!("shutting down {} feed timer(s)", self.timers.len());
        for timer in self.timers {
            timer.join().await;
        }
        self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogStore;
    use crate::feed::FeedGenerator;
    use crate::fleet::FleetRegistry;
    use crate::prelude::{SiteResult, TickOutcome};
    use crate::sampling::RandomSampler;
    use crate::session::MemoryStore;
    use crate::views::{DashboardView, FeedLimits, HeadlessDisplay, LiveView};
    use std::time::Duration;
    use tokio::time::sleep;

    fn generator(seed: u64) -> FeedGenerator {
        FeedGenerator::new(
            Arc::new(CatalogStore::builtin().unwrap()),
            RandomSampler::seeded(seed),
        )
    }

    fn dashboard(initialize: bool) -> Arc<Mutex<DashboardView>> {
        let mut view =
            DashboardView::new(generator(1), FeedLimits::default().activity_log).unwrap();
        if initialize {
            view.initialize().unwrap();
        }
        Arc::new(Mutex::new(view))
    }

    fn live() -> Arc<Mutex<LiveView>> {
        let mut view = LiveView::new(
            generator(2),
            FleetRegistry::builtin().unwrap(),
            FeedLimits::default().event_stream,
            Box::new(HeadlessDisplay),
        )
        .unwrap();
        view.initialize(&mut MemoryStore::new()).unwrap();
        Arc::new(Mutex::new(view))
    }

    struct Failing;

    impl FeedTarget for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn feeds(&self) -> &'static [FeedKind] {
            &[FeedKind::Clock]
        }

        fn is_initialized(&self) -> bool {
            true
        }

        fn refresh(&mut self, _feed: FeedKind) -> SiteResult<TickOutcome> {
            Err(SiteError::Storage("disk gone".into()))
        }
    }

    #[test]
    fn invalid_plan_is_rejected() {
        let plan = RefreshPlan {
            telemetry_ms: 0,
            ..Default::default()
        };
        assert!(RefreshScheduler::new(plan).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn uninitialized_view_cannot_attach() {
        let mut scheduler = RefreshScheduler::new(RefreshPlan::default()).unwrap();
        let err = scheduler.attach(&dashboard(false)).unwrap_err();
        assert!(matches!(err, SiteError::NotInitialized("dashboard")));
        assert!(scheduler.running().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn second_attach_does_not_double_timers() {
        let view = dashboard(true);
        let mut scheduler = RefreshScheduler::new(RefreshPlan::default()).unwrap();
        scheduler.attach(&view).unwrap();
        let err = scheduler.attach(&view).unwrap_err();
        assert!(matches!(
            err,
            SiteError::AlreadyAttached {
                view: "dashboard",
                feed: FeedKind::ActivityLog
            }
        ));
        assert_eq!(scheduler.running().len(), 2);

        sleep(Duration::from_millis(10_500)).await;
        assert_eq!(scheduler.metrics().counters(FeedKind::ActivityLog).ticks, 1);
        assert_eq!(view.lock().unwrap().activity_log().len(), 16);

        scheduler.stop_feed(FeedKind::ActivityLog);
        scheduler.stop_feed(FeedKind::AlertTimes);
        assert_eq!(scheduler.attach(&view).unwrap().len(), 2);
        scheduler.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn timers_fire_at_their_own_period() {
        let view = dashboard(true);
        let mut scheduler = RefreshScheduler::new(RefreshPlan::default()).unwrap();
        let feeds = scheduler.attach(&view).unwrap();
        assert_eq!(feeds, vec![FeedKind::ActivityLog, FeedKind::AlertTimes]);

        sleep(Duration::from_millis(30_500)).await;
        let metrics = scheduler.metrics();
        assert_eq!(metrics.counters(FeedKind::ActivityLog).ticks, 3);
        assert_eq!(metrics.counters(FeedKind::AlertTimes).ticks, 0);
        assert_eq!(view.lock().unwrap().activity_log().len(), 18);

        sleep(Duration::from_secs(30)).await;
        assert_eq!(metrics.counters(FeedKind::AlertTimes).ticks, 1);

        scheduler.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn sink_stays_bounded_under_many_ticks() {
        let view = dashboard(true);
        let mut scheduler = RefreshScheduler::new(RefreshPlan {
            activity_log_ms: 10,
            ..Default::default()
        })
        .unwrap();
        scheduler.attach(&view).unwrap();

        sleep(Duration::from_millis(1_005)).await;
        let metrics = scheduler.shutdown().await;
        let counters = metrics.counters(FeedKind::ActivityLog);
        assert_eq!(counters.ticks, 100);
        assert_eq!(counters.evicted, 95);
        assert_eq!(view.lock().unwrap().activity_log().len(), 20);
    }

    #[tokio::test(start_paused = true)]
    async fn stopped_feed_no_longer_fires() {
        let view = live();
        let mut scheduler = RefreshScheduler::new(RefreshPlan::default()).unwrap();
        scheduler.attach(&view).unwrap();

        sleep(Duration::from_millis(8_500)).await;
        let metrics = scheduler.metrics();
        assert_eq!(metrics.counters(FeedKind::EventStream).ticks, 1);
        assert_eq!(metrics.counters(FeedKind::Telemetry).ticks, 4);

        assert_eq!(scheduler.stop_feed(FeedKind::Telemetry), 1);
        assert_eq!(scheduler.stop_feed(FeedKind::Clock), 0);
        sleep(Duration::from_secs(8)).await;
        assert_eq!(metrics.counters(FeedKind::Telemetry).ticks, 4);
        assert_eq!(metrics.counters(FeedKind::EventStream).ticks, 2);
        assert!(scheduler
            .running()
            .iter()
            .all(|(_, feed)| *feed != FeedKind::Telemetry));

        scheduler.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn stop_all_halts_every_timer() {
        let view = live();
        let mut scheduler = RefreshScheduler::new(RefreshPlan::default()).unwrap();
        scheduler.attach(&view).unwrap();
        scheduler.stop_all();

        sleep(Duration::from_secs(20)).await;
        assert!(scheduler.running().is_empty());
        assert!(scheduler.metrics().snapshot().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_errors_are_counted_not_fatal() {
        let target = Arc::new(Mutex::new(Failing));
        let mut scheduler = RefreshScheduler::new(RefreshPlan::default()).unwrap();
        scheduler.attach(&target).unwrap();

        sleep(Duration::from_millis(3_500)).await;
        let metrics = scheduler.shutdown().await;
        assert_eq!(metrics.counters(FeedKind::Clock).errors, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn drone_switch_between_ticks_keeps_stream_scoped() {
        let view = live();
        let mut scheduler = RefreshScheduler::new(RefreshPlan::default()).unwrap();
        scheduler.attach(&view).unwrap();

        sleep(Duration::from_millis(8_500)).await;
        view.lock().unwrap().switch_drone(2).unwrap();
        sleep(Duration::from_secs(8)).await;

        let guard = view.lock().unwrap();
        assert_eq!(guard.events().len(), 11);
        assert!(guard.events().iter().all(|e| e.item.drone == Some(2)));
        drop(guard);
        scheduler.shutdown().await;
    }
}
