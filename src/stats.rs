//! System stats for the status bar
//!
//! Either a bounded random walk or a poll of the backend's `/stats`
//! endpoint. A failed poll never blanks the bar; the walk takes over from
//! the last known values.

mod worker;

use std::time::{Duration, Instant};

use crate::backend::{BackendClient, BackendStats};
use crate::error::GhosttermError;
use worker::StatsWorker;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemStats {
    /// Percent
    pub cpu: f64,
    /// Percent
    pub memory: f64,
    /// MB
    pub network_up: f64,
    /// MB
    pub network_down: f64,
}

impl Default for SystemStats {
    fn default() -> Self {
        Self {
            cpu: 17.0,
            memory: 33.0,
            network_up: 1.0,
            network_down: 1.0,
        }
    }
}

impl From<BackendStats> for SystemStats {
    fn from(raw: BackendStats) -> Self {
        Self {
            cpu: raw.cpu,
            memory: raw.mem,
            network_up: raw.net_up / BYTES_PER_MB,
            network_down: raw.net_down / BYTES_PER_MB,
        }
    }
}

/// Bounded random walk over [`SystemStats`]
#[derive(Debug, Clone)]
pub struct StatsSimulator {
    rng: fastrand::Rng,
}

impl Default for StatsSimulator {
    fn default() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }
}

impl StatsSimulator {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn step(&mut self, prev: &SystemStats) -> SystemStats {
        SystemStats {
            cpu: (prev.cpu + self.jitter(10.0)).clamp(5.0, 95.0),
            memory: (prev.memory + self.jitter(5.0)).clamp(20.0, 80.0),
            network_up: (prev.network_up + self.jitter(2.0)).max(0.1),
            network_down: (prev.network_down + self.jitter(2.0)).max(0.1),
        }
    }

    /// Uniform in `[-span / 2, span / 2)`
    fn jitter(&mut self, span: f64) -> f64 {
        (self.rng.f64() - 0.5) * span
    }
}

enum StatsSource {
    Simulated,
    Remote {
        worker: StatsWorker,
        /// A poll was sent and has not answered yet
        in_flight: bool,
    },
}

/// Timer-driven stats collaborator owned by the app
pub struct StatsFeed {
    source: StatsSource,
    simulator: StatsSimulator,
    current: SystemStats,
    interval: Duration,
    next_due: Option<Instant>,
}

impl StatsFeed {
    pub fn simulated(interval: Duration) -> Self {
        Self::with_source(StatsSource::Simulated, interval)
    }

    /// Poll `client` in the background, each poll bounded by `timeout`
    pub fn remote(
        client: BackendClient,
        timeout: Duration,
        interval: Duration,
    ) -> Result<Self, GhosttermError> {
        let worker = StatsWorker::spawn(client, timeout)?;
        Ok(Self::with_source(
            StatsSource::Remote {
                worker,
                in_flight: false,
            },
            interval,
        ))
    }

    fn with_source(source: StatsSource, interval: Duration) -> Self {
        Self {
            source,
            simulator: StatsSimulator::default(),
            current: SystemStats::default(),
            interval,
            next_due: None,
        }
    }

    /// Replace the random source, for reproducible walks
    pub fn with_simulator(mut self, simulator: StatsSimulator) -> Self {
        self.simulator = simulator;
        self
    }

    pub fn current(&self) -> SystemStats {
        self.current
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_remote(&self) -> bool {
        matches!(self.source, StatsSource::Remote { .. })
    }

    /// Apply finished polls and start due ones; true when the values changed
    ///
    /// Never waits on the network. The first call arms the timer, and a
    /// remote feed also sends its first poll right away so real numbers show
    /// up from the start.
    pub fn poll_due(&mut self, now: Instant) -> bool {
        let mut changed = self.apply_reply();

        let due = match self.next_due {
            None => {
                self.next_due = Some(now + self.interval);
                self.is_remote()
            }
            Some(due) if now >= due => {
                self.next_due = Some(now + self.interval);
                true
            }
            Some(_) => false,
        };
        if due {
            changed |= self.refresh();
        }
        changed
    }

    fn apply_reply(&mut self) -> bool {
        let StatsSource::Remote { worker, in_flight } = &mut self.source else {
            return false;
        };
        if !*in_flight {
            return false;
        }
        let Some(reply) = worker.try_reply() else {
            return false;
        };

        *in_flight = false;
        self.current = match reply {
            Ok(raw) => SystemStats::from(raw),
            Err(e) => {
                log::debug!("Stats poll failed, simulating: {}", e);
                self.simulator.step(&self.current)
            }
        };
        true
    }

    fn refresh(&mut self) -> bool {
        match &mut self.source {
            StatsSource::Simulated => {}
            StatsSource::Remote {
                in_flight: true, ..
            } => {
                log::debug!("Previous stats poll still running, skipping");
                return false;
            }
            StatsSource::Remote { worker, in_flight } => {
                if worker.request() {
                    *in_flight = true;
                    return false;
                }
                log::warn!("Stats worker is gone, simulating");
            }
        }
        self.current = self.simulator.step(&self.current);
        true
    }
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod stats_tests;
