use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::core::validator::ValidatorMonitor;
use crate::models::MonitorConfig;

/// Suppresses repeat alerts inside a cooldown window.
#[derive(Debug)]
struct AlertGate {
    cooldown: Duration,
    last_fired: Option<Instant>,
}

impl AlertGate {
    fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_fired: None,
        }
    }

    fn should_fire_at(&mut self, now: Instant) -> bool {
        match self.last_fired {
            Some(last) if now.duration_since(last) < self.cooldown => false,
            _ => {
                self.last_fired = Some(now);
                true
            }
        }
    }
}

/// Periodic validator watcher with an explicit lifecycle: `start`
/// spawns one owned task that checks the attestation miss rate every
/// interval, `stop` signals it and waits for it to finish. No detached
/// threads; dropping the watcher aborts the task.
pub struct Watcher {
    interval: Duration,
    cooldown: Duration,
    miss_rate_threshold: f64,
    handle: Option<JoinHandle<()>>,
    shutdown: Option<watch::Sender<bool>>,
}

impl Watcher {
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            interval: Duration::from_secs(config.watch_interval_secs),
            cooldown: Duration::from_secs(config.alert_cooldown_secs),
            miss_rate_threshold: config.alert_miss_rate,
            handle: None,
            shutdown: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn start(&mut self, validator: ValidatorMonitor) {
        if self.is_running() {
            warn!("watcher already active");
            return;
        }

        let (tx, mut rx) = watch::channel(false);
        let interval = self.interval;
        let threshold = self.miss_rate_threshold;
        let mut gate = AlertGate::new(self.cooldown);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        check_miss_rate(&validator, threshold, &mut gate).await;
                    }
                    _ = rx.changed() => break,
                }
            }
        });

        self.handle = Some(handle);
        self.shutdown = Some(tx);
        info!("started watcher with {}s interval", interval.as_secs());
    }

    pub async fn stop(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(true);
        }
        let _ = handle.await;
        info!("stopped watcher");
    }
}

impl Drop for Watcher {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

async fn check_miss_rate(validator: &ValidatorMonitor, threshold: f64, gate: &mut AlertGate) {
    let status = validator.validator_status().await;
    let Some(data) = status.validator else {
        return;
    };

    let miss_rate = data.attestation_miss_rate();
    if miss_rate > threshold && gate.should_fire_at(Instant::now()) {
        warn!(
            "high attestation miss rate: {:.1}% (threshold {:.1}%)",
            miss_rate, threshold
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_fires_first_time() {
        let mut gate = AlertGate::new(Duration::from_secs(1800));
        assert!(gate.should_fire_at(Instant::now()));
    }

    #[test]
    fn test_gate_suppresses_within_cooldown() {
        let mut gate = AlertGate::new(Duration::from_secs(1800));
        let t0 = Instant::now();
        assert!(gate.should_fire_at(t0));
        assert!(!gate.should_fire_at(t0 + Duration::from_secs(1799)));
    }

    #[test]
    fn test_gate_fires_again_after_cooldown() {
        let mut gate = AlertGate::new(Duration::from_secs(1800));
        let t0 = Instant::now();
        assert!(gate.should_fire_at(t0));
        assert!(gate.should_fire_at(t0 + Duration::from_secs(1800)));
    }

    #[test]
    fn test_gate_resets_window_on_fire() {
        let mut gate = AlertGate::new(Duration::from_secs(100));
        let t0 = Instant::now();
        assert!(gate.should_fire_at(t0));
        assert!(gate.should_fire_at(t0 + Duration::from_secs(100)));
        // The second alert opened a fresh window.
        assert!(!gate.should_fire_at(t0 + Duration::from_secs(150)));
    }

    #[tokio::test]
    async fn test_start_stop_lifecycle() {
        let config = MonitorConfig {
            watch_interval_secs: 3600,
            ..MonitorConfig::default()
        };
        let mut watcher = Watcher::new(&config);
        assert!(!watcher.is_running());

        watcher.start(ValidatorMonitor::with_api(
            "http://127.0.0.1:1".to_string(),
            "aztecprotocol/aztec:latest".to_string(),
        ));
        assert!(watcher.is_running());

        watcher.stop().await;
        assert!(!watcher.is_running());
    }

    #[tokio::test]
    async fn test_double_start_is_ignored() {
        let config = MonitorConfig {
            watch_interval_secs: 3600,
            ..MonitorConfig::default()
        };
        let mut watcher = Watcher::new(&config);
        let make_validator = || {
            ValidatorMonitor::with_api(
                "http://127.0.0.1:1".to_string(),
                "aztecprotocol/aztec:latest".to_string(),
            )
        };

        watcher.start(make_validator());
        watcher.start(make_validator());
        assert!(watcher.is_running());
        watcher.stop().await;
    }

    #[tokio::test]
    async fn test_stop_without_start_is_noop() {
        let mut watcher = Watcher::new(&MonitorConfig::default());
        watcher.stop().await;
        assert!(!watcher.is_running());
    }
}
