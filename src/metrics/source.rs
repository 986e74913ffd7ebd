use std::time::Duration;

use sysinfo::{CpuRefreshKind, MemoryRefreshKind, RefreshKind, System};
use thiserror::Error;

use super::metric::Metric;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SourceError {
    #[error("{} counter is unavailable", .0.label())]
    Unavailable(Metric),

    #[error("{} reading is not a finite number: {value}", .metric.label())]
    NotFinite { metric: Metric, value: f64 },

    #[error("counter refresh failed: {0}")]
    Refresh(String),
}

/// Supplies instantaneous utilization percentages in `[0, 100]`.
pub trait MetricSource {
    /// Update cached counters before a round of reads.
    fn refresh(&mut self) -> Result<(), SourceError> {
        Ok(())
    }

    fn read(&mut self, metric: Metric) -> Result<f64, SourceError>;

    /// Shortest refresh period that still yields meaningful readings.
    fn min_interval(&self) -> Duration {
        Duration::ZERO
    }
}

impl<S: MetricSource + ?Sized> MetricSource for Box<S> {
    fn refresh(&mut self) -> Result<(), SourceError> {
        (**self).refresh()
    }

    fn read(&mut self, metric: Metric) -> Result<f64, SourceError> {
        (**self).read(metric)
    }

    fn min_interval(&self) -> Duration {
        (**self).min_interval()
    }
}

/// OS counters through `sysinfo`.
pub struct SysinfoSource {
    sys: System,
}

impl Default for SysinfoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoSource {
    pub fn new() -> Self {
        // The first CPU refresh only primes the counters; usage is a delta
        // between two refreshes.
        let sys = System::new_with_specifics(
            RefreshKind::nothing()
                .with_cpu(CpuRefreshKind::nothing().with_cpu_usage())
                .with_memory(MemoryRefreshKind::nothing().with_ram()),
        );
        SysinfoSource { sys }
    }

    fn memory_percent(&self) -> Option<f64> {
        let total = self.sys.total_memory();
        if total == 0 {
            return None;
        }
        Some(self.sys.used_memory() as f64 / total as f64 * 100.0)
    }
}

impl MetricSource for SysinfoSource {
    fn refresh(&mut self) -> Result<(), SourceError> {
        let _span = tracing::trace_span!("source.refresh").entered();
        self.sys.refresh_cpu_usage();
        self.sys
            .refresh_memory_specifics(MemoryRefreshKind::nothing().with_ram());
        Ok(())
    }

    fn read(&mut self, metric: Metric) -> Result<f64, SourceError> {
        let value = match metric {
            Metric::Cpu => {
                if self.sys.cpus().is_empty() {
                    return Err(SourceError::Unavailable(metric));
                }
                self.sys.global_cpu_usage() as f64
            }
            Metric::Ram => self
                .memory_percent()
                .ok_or(SourceError::Unavailable(metric))?,
        };
        if !value.is_finite() {
            return Err(SourceError::NotFinite { metric, value });
        }
        Ok(value)
    }

    // CPU usage is a delta between refreshes; closer refreshes read as noise.
    fn min_interval(&self) -> Duration {
        sysinfo::MINIMUM_CPU_UPDATE_INTERVAL
    }
}
