use super::metric::Metric;
use super::registry::MonitoringRegistry;
use super::scheduler::SampleScheduler;
use super::source::MetricSource;

/// Which metric is bound to the chart. Switching never touches sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricSelection {
    active: Metric,
}

impl MetricSelection {
    pub fn new(active: Metric) -> Self {
        Self { active }
    }

    pub fn active(&self) -> Metric {
        self.active
    }

    /// Returns `true` when the active metric changed and the chart needs a
    /// rebind.
    pub fn set_active(&mut self, metric: Metric) -> bool {
        if self.active == metric {
            return false;
        }
        tracing::info!(from = self.active.label(), to = metric.label(), "metric selected");
        self.active = metric;
        true
    }

    pub fn clear_active(&self, registry: &MonitoringRegistry) {
        registry.window(self.active).clear();
        tracing::info!(metric = self.active.label(), "history cleared");
    }

    pub fn clear_all(&self, registry: &MonitoringRegistry) {
        registry.clear_all();
        tracing::info!("all history cleared");
    }
}

impl Default for MetricSelection {
    fn default() -> Self {
        Self::new(Metric::Cpu)
    }
}

/// Pause-while-held: stop on modifier press, resume on release.
///
/// Only a press that actually stopped the scheduler arms the release, so a
/// stray key-up never resumes sampling the user paused some other way.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PauseGesture {
    engaged: bool,
}

impl PauseGesture {
    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    pub fn press<S>(&mut self, scheduler: &mut SampleScheduler<S>)
    where
        S: MetricSource + Send + 'static,
    {
        if self.engaged || !scheduler.is_running() {
            return;
        }
        scheduler.stop();
        self.engaged = true;
    }

    pub fn release<S>(&mut self, scheduler: &mut SampleScheduler<S>)
    where
        S: MetricSource + Send + 'static,
    {
        if !self.engaged {
            return;
        }
        scheduler.start();
        self.engaged = false;
    }

    /// Forget a pending hold, e.g. after an explicit resume.
    pub fn disarm(&mut self) {
        self.engaged = false;
    }
}
