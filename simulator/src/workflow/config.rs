use anyhow::Context;
use serde::{Deserialize, Serialize};
use siteguardcore::scheduler::RefreshPlan;
use siteguardcore::views::FeedLimits;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for every generator; fresh entropy when absent.
    pub seed: Option<u64>,
    /// File backing the drone selection handoff.
    pub state_file: PathBuf,
    pub bridge_addr: SocketAddr,
    pub refresh: RefreshPlan,
    pub limits: FeedLimits,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            state_file: PathBuf::from("tools/data/selection.json"),
            bridge_addr: SocketAddr::from(([127, 0, 0, 1], 9000)),
            refresh: RefreshPlan::default(),
            limits: FeedLimits::default(),
        }
    }
}

impl SimulationConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading simulation config {}", path_ref.display()))?;
        let config: SimulationConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing simulation config {}", path_ref.display()))?;
        config
            .refresh
            .validate()
            .with_context(|| format!("validating refresh plan in {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn with_overrides(mut self, seed: Option<u64>, state_file: Option<PathBuf>) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        if let Some(path) = state_file {
            self.state_file = path;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use siteguardcore::FeedKind;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config_uses_site_periods() {
        let cfg = SimulationConfig::default();
        assert_eq!(cfg.refresh.period(FeedKind::ActivityLog), Duration::from_secs(10));
        assert_eq!(cfg.limits.activity_log.capacity, 20);
        assert_eq!(cfg.bridge_addr.port(), 9000);
    }

    #[test]
    fn config_load_reads_partial_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"seed: 7\nrefresh:\n  clock_ms: 500\n").unwrap();
        let path = temp.into_temp_path();
        let cfg = SimulationConfig::load(&path).unwrap();
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.refresh.clock_ms, 500);
        assert_eq!(cfg.refresh.telemetry_ms, 2_000);
        assert_eq!(cfg.limits.event_stream.capacity, 15);
    }

    #[test]
    fn config_load_rejects_zero_period() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"refresh:\n  detections_ms: 0\n").unwrap();
        let path = temp.into_temp_path();
        assert!(SimulationConfig::load(&path).is_err());
    }

    #[test]
    fn overrides_replace_only_given_values() {
        let cfg = SimulationConfig {
            seed: Some(1),
            ..Default::default()
        }
        .with_overrides(None, Some(PathBuf::from("/tmp/sel.json")));
        assert_eq!(cfg.seed, Some(1));
        assert_eq!(cfg.state_file, PathBuf::from("/tmp/sel.json"));
    }
}
