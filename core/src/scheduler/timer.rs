use crate::monitoring::FeedMetrics;
use crate::prelude::{FeedKind, FeedTarget, TickOutcome};
use log::{debug, trace, warn};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Handle to one repeating feed refresh. Dropping the handle stops the timer.
pub struct FeedTimer {
    view: &'static str,
    feed: FeedKind,
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl FeedTimer {
    /// Spawns the timer on the current tokio runtime. The first fire happens
    /// one `period` after the call.
    pub fn spawn<T>(
        feed: FeedKind,
        period: Duration,
        target: Arc<Mutex<T>>,
        metrics: Arc<FeedMetrics>,
    ) -> Self
    where
        T: FeedTarget + Send + 'static,
    {
        let view = lock(&target).name();
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    changed = stop_rx.changed() => {
                        if changed.is_err() || *stop_rx.borrow() {
                            break;
                        }
                    }
                    _ = interval.tick() => fire(view, feed, &target, &metrics),
                }
            }
            debug!("[{}] {} timer stopped", view, feed);
        });

        Self {
            view,
            feed,
            stop_tx,
            task,
        }
    }

    pub fn view(&self) -> &'static str {
        self.view
    }

    pub fn feed(&self) -> FeedKind {
        self.feed
    }

    /// Requests the timer to stop; no fire starts after the task observes it.
    pub fn stop(&self) {
        let _ = self.stop_tx.send(true);
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    pub async fn join(self) {
        let FeedTimer { stop_tx, task, .. } = self;
        let _ = stop_tx.send(true);
        if let Err(err) = task.await {
            warn!("feed timer task ended abnormally: {}", err);
        }
    }
}

fn lock<T>(target: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    target.lock().unwrap_or_else(PoisonError::into_inner)
}

fn fire<T: FeedTarget>(view: &str, feed: FeedKind, target: &Mutex<T>, metrics: &FeedMetrics) {
    let result = lock(target).refresh(feed);
    match result {
        Ok(outcome) => {
            if outcome == TickOutcome::ElementNotPresent {
                trace!("[{}] {} not present", view, feed);
            } else {
                trace!("[{}] {} tick {:?}", view, feed, outcome);
            }
            metrics.record_outcome(feed, outcome);
        }
        Err(err) => {
            warn!("[{}] {} refresh failed: {}", view, feed, err);
            metrics.record_error(feed);
        }
    }
}
