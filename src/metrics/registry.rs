use std::sync::Arc;

use super::metric::Metric;
use super::window::SlidingWindow;

/// One window per [`Metric`], fixed at construction.
///
/// Windows are reference counted so the scheduler task and the app can
/// both hold the registry.
#[derive(Debug, Clone)]
pub struct MonitoringRegistry {
    windows: [Arc<SlidingWindow>; Metric::COUNT],
}

impl MonitoringRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            windows: Metric::ALL.map(|_| Arc::new(SlidingWindow::new(capacity))),
        }
    }

    pub fn window(&self, metric: Metric) -> &SlidingWindow {
        &self.windows[metric.index()]
    }

    pub fn metrics(&self) -> impl Iterator<Item = Metric> {
        Metric::ALL.into_iter()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, &SlidingWindow)> {
        Metric::ALL
            .into_iter()
            .map(move |metric| (metric, self.window(metric)))
    }

    pub fn clear_all(&self) {
        for window in &self.windows {
            window.clear();
        }
    }
}

impl Default for MonitoringRegistry {
    fn default() -> Self {
        Self::new(super::window::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_are_independent() {
        let registry = MonitoringRegistry::new(4);
        registry.window(Metric::Cpu).append(0.5);
        assert_eq!(registry.window(Metric::Cpu).len(), 1);
        assert!(registry.window(Metric::Ram).is_empty());
    }

    #[test]
    fn clones_share_windows() {
        let registry = MonitoringRegistry::new(4);
        let shared = registry.clone();
        shared.window(Metric::Ram).append(0.7);
        assert_eq!(registry.window(Metric::Ram).snapshot(), vec![0.7]);
    }

    #[test]
    fn clear_all_empties_every_window() {
        let registry = MonitoringRegistry::new(4);
        for (_, window) in registry.iter() {
            window.append(0.3);
        }
        registry.clear_all();
        assert!(registry.iter().all(|(_, w)| w.is_empty()));
        assert_eq!(registry.metrics().count(), Metric::COUNT);
    }
}
