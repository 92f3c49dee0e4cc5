use anyhow::Context;
use clap::Parser;
use gui_bridge::bridge::GuiBridge;
use gui_bridge::model::RunReport;
use siteguardcore::scheduler::RefreshScheduler;
use siteguardcore::session::FileStore;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::SimulationConfig;
use workflow::runner::Runner;

mod gui_bridge;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Headless SiteGuard surveillance simulation")]
struct Args {
    /// Load a simulation config from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed every generator for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
    /// File backing the drone selection handoff
    #[arg(long)]
    state_file: Option<PathBuf>,
    /// Hand this drone to the live view before it initializes
    #[arg(long)]
    select: Option<u32>,
    /// Print one snapshot of every view and exit
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Stop after this many seconds instead of waiting for Ctrl+C
    #[arg(long)]
    duration: Option<u64>,
    /// Serve JSON snapshots of the views over HTTP
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    }
    .with_overrides(args.seed, args.state_file.clone());

    let store = FileStore::new(&config.state_file);
    let runner = Arc::new(Runner::new(&config, Box::new(store))?);
    if let Some(id) = args.select {
        runner.select_drone(id)?;
    }
    runner.initialize()?;

    if args.offline {
        let snapshot = serde_json::to_string_pretty(&runner.snapshot())
            .context("encoding offline snapshot")?;
        println!("{snapshot}");
        return Ok(());
    }

    // Single-threaded: timer callbacks interleave between awaits.
    let runtime = TokioBuilder::new_current_thread()
        .enable_all()
        .build()
        .context("creating simulation runtime")?;
    runtime.block_on(simulate(runner, config, args.serve, args.duration))
}

async fn simulate(
    runner: Arc<Runner>,
    config: SimulationConfig,
    serve: bool,
    duration: Option<u64>,
) -> anyhow::Result<()> {
    let mut scheduler = RefreshScheduler::new(config.refresh.clone())?;
    runner.start(&mut scheduler)?;

    let bridge = if serve {
        let bridge = GuiBridge::start(runner.clone(), config.bridge_addr)?;
        println!("[SIM] snapshot bridge on http://{}", bridge.addr());
        Some(bridge)
    } else {
        None
    };

    match duration {
        Some(secs) => {
            println!("[SIM] running for {secs}s (Ctrl+C to stop early)...");
            tokio::select! {
                _ = tokio::time::sleep(Duration::from_secs(secs)) => {}
                interrupted = signal::ctrl_c() => interrupted.context("awaiting Ctrl+C to exit")?,
            }
        }
        None => {
            println!("[SIM] running (Ctrl+C to stop)...");
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
        }
    }

    let metrics = scheduler.shutdown().await;
    if let Some(bridge) = bridge {
        bridge.stop().await;
    }

    let report = RunReport {
        feeds: metrics.snapshot(),
    };
    for line in report.lines() {
        println!("[SIM] {line}");
    }
    let live = runner.snapshot().live;
    println!(
        "[SIM] {}: {} events, {} detections",
        live.title,
        live.events.len(),
        live.detections.len()
    );
    Ok(())
}
