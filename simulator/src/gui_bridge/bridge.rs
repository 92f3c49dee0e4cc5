use crate::workflow::runner::{lock, Runner};
use anyhow::Context;
use serde_json::json;
use siteguardcore::DroneId;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use warp::{http::StatusCode, Filter};

/// JSON snapshot routes over the running view contexts.
pub fn routes(
    runner: Arc<Runner>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let runner_filter = warp::any().map(move || runner.clone());

    let snapshot_route = warp::path!("snapshot")
        .and(warp::get())
        .and(runner_filter.clone())
        .map(|runner: Arc<Runner>| warp::reply::json(&runner.snapshot()));

    let dashboard_route = warp::path!("dashboard")
        .and(warp::get())
        .and(runner_filter.clone())
        .map(|runner: Arc<Runner>| {
            let snapshot = lock(&runner.dashboard).snapshot();
            warp::reply::json(&snapshot)
        });

    let live_route = warp::path!("live")
        .and(warp::get())
        .and(runner_filter.clone())
        .map(|runner: Arc<Runner>| {
            let snapshot = lock(&runner.live).snapshot();
            warp::reply::json(&snapshot)
        });

    let overview_route = warp::path!("overview")
        .and(warp::get())
        .and(runner_filter.clone())
        .map(|runner: Arc<Runner>| {
            let snapshot = lock(&runner.overview).snapshot();
            warp::reply::json(&snapshot)
        });

    let switch_route = warp::path!("live" / "drone" / DroneId)
        .and(warp::post())
        .and(runner_filter)
        .map(|id: DroneId, runner: Arc<Runner>| match runner.switch_drone(id) {
            Ok(()) => warp::reply::with_status(
                warp::reply::json(&json!({"status": "ok", "drone": id})),
                StatusCode::OK,
            ),
            Err(err) => {
                log::error!("switch to drone {} failed: {:#}", id, err);
                warp::reply::with_status(
                    warp::reply::json(&json!({"status": "error", "message": err.to_string()})),
                    StatusCode::INTERNAL_SERVER_ERROR,
                )
            }
        });

    snapshot_route
        .or(dashboard_route)
        .or(live_route)
        .or(overview_route)
        .or(switch_route)
}

/// HTTP bridge serving the snapshot routes until stopped.
pub struct GuiBridge {
    addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    server: JoinHandle<()>,
}

impl GuiBridge {
    /// Binds `addr` and serves on the current runtime.
    pub fn start(runner: Arc<Runner>, addr: SocketAddr) -> anyhow::Result<Self> {
        let (shutdown, shutdown_rx) = oneshot::channel::<()>();
        let (bound, server) = warp::serve(routes(runner))
            .try_bind_with_graceful_shutdown(addr, async move {
                let _ = shutdown_rx.await;
            })
            .with_context(|| format!("binding snapshot bridge on {addr}"))?;
        log::info!("snapshot bridge listening on http://{}", bound);
        Ok(Self {
            addr: bound,
            shutdown,
            server: tokio::spawn(server),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub async fn stop(self) {
        let _ = self.shutdown.send(());
        if let Err(err) = self.server.await {
            log::warn!("snapshot bridge ended abnormally: {}", err);
        }
    }
}
