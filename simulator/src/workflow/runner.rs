use crate::gui_bridge::model::SiteSnapshot;
use crate::workflow::config::SimulationConfig;
use anyhow::Context;
use siteguardcore::catalog::CatalogStore;
use siteguardcore::feed::FeedGenerator;
use siteguardcore::fleet::FleetRegistry;
use siteguardcore::sampling::RandomSampler;
use siteguardcore::scheduler::RefreshScheduler;
use siteguardcore::session::SelectionStore;
use siteguardcore::views::{DashboardView, HeadlessDisplay, LiveView, OverviewView};
use siteguardcore::DroneId;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub type Shared<T> = Arc<Mutex<T>>;

pub fn lock<T: ?Sized>(shared: &Mutex<T>) -> MutexGuard<'_, T> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

fn sampler_for(seed: Option<u64>, stream: u64) -> RandomSampler {
    match seed {
        Some(seed) => RandomSampler::seeded(seed.wrapping_add(stream)),
        None => RandomSampler::from_entropy(),
    }
}

/// Owns the three view contexts and the selection store they share.
pub struct Runner {
    pub dashboard: Shared<DashboardView>,
    pub live: Shared<LiveView>,
    pub overview: Shared<OverviewView>,
    store: Shared<Box<dyn SelectionStore>>,
}

impl Runner {
    pub fn new(config: &SimulationConfig, store: Box<dyn SelectionStore>) -> anyhow::Result<Self> {
        let catalog = Arc::new(CatalogStore::builtin().context("loading catalogs")?);
        let registry = FleetRegistry::builtin().context("loading fleet roster")?;
        let generator =
            |stream: u64| FeedGenerator::new(catalog.clone(), sampler_for(config.seed, stream));

        let dashboard = DashboardView::new(generator(0), config.limits.activity_log)
            .context("building dashboard view")?;
        let live = LiveView::new(
            generator(1),
            registry.clone(),
            config.limits.event_stream,
            Box::new(HeadlessDisplay),
        )
        .context("building live view")?;
        let overview = OverviewView::new(generator(2), registry, config.limits.activity_feed)
            .context("building overview")?;

        Ok(Self {
            dashboard: Arc::new(Mutex::new(dashboard)),
            live: Arc::new(Mutex::new(live)),
            overview: Arc::new(Mutex::new(overview)),
            store: Arc::new(Mutex::new(store)),
        })
    }

    /// Hands `id` from the overview to the live view. Only takes effect if
    /// called before [`Runner::initialize`] or picked up by a later run.
    pub fn select_drone(&self, id: DroneId) -> anyhow::Result<()> {
        let mut store = lock(&self.store);
        lock(&self.overview)
            .view_live_feed(id, &mut **store)
            .with_context(|| format!("handing off drone {id}"))
    }

    pub fn initialize(&self) -> anyhow::Result<()> {
        lock(&self.dashboard)
            .initialize()
            .context("initializing dashboard")?;
        lock(&self.overview)
            .initialize()
            .context("initializing overview")?;
        let mut store = lock(&self.store);
        lock(&self.live)
            .initialize(&mut **store)
            .context("initializing live view")?;
        Ok(())
    }

    pub fn start(&self, scheduler: &mut RefreshScheduler) -> anyhow::Result<()> {
        scheduler
            .attach(&self.dashboard)
            .context("scheduling dashboard feeds")?;
        scheduler
            .attach(&self.live)
            .context("scheduling live feeds")?;
        scheduler
            .attach(&self.overview)
            .context("scheduling overview feeds")?;
        Ok(())
    }

    pub fn switch_drone(&self, id: DroneId) -> anyhow::Result<()> {
        lock(&self.live)
            .switch_drone(id)
            .with_context(|| format!("switching live view to drone {id}"))
    }

    pub fn snapshot(&self) -> SiteSnapshot {
        SiteSnapshot {
            dashboard: lock(&self.dashboard).snapshot(),
            live: lock(&self.live).snapshot(),
            overview: lock(&self.overview).snapshot(),
        }
    }
}
