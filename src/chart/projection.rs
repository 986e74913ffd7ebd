use crate::metrics::window::{Sample, SlidingWindow, max_of};
use crate::metrics::{Metric, MonitoringRegistry};

/// Everything the chart needs to draw one metric: the line series and a
/// flat marker at the running maximum.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartProjection {
    pub metric: Metric,
    pub points: Vec<(f64, f64)>,
    pub max: Sample,
    pub max_line: [(f64, f64); 2],
    pub latest: Option<Sample>,
    pub capacity: usize,
}

impl ChartProjection {
    pub fn from_window(metric: Metric, window: &SlidingWindow) -> Self {
        // One snapshot feeds both the series and the max so they always agree.
        Self::from_samples(metric, &window.snapshot(), window.capacity())
    }

    pub fn for_active(registry: &MonitoringRegistry, metric: Metric) -> Self {
        Self::from_window(metric, registry.window(metric))
    }

    pub fn from_samples(metric: Metric, samples: &[Sample], capacity: usize) -> Self {
        let points = samples
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f64, *v))
            .collect();
        let max = max_of(samples.iter().copied());
        let right = samples.len().saturating_sub(1) as f64;

        ChartProjection {
            metric,
            points,
            max,
            max_line: [(0.0, max), (right, max)],
            latest: samples.last().copied(),
            capacity,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Inclusive x range of the chart, wide enough for a full window.
    pub fn x_bounds(&self) -> [f64; 2] {
        [0.0, self.capacity.saturating_sub(1).max(1) as f64]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_window_projects_degenerate_marker() {
        let window = SlidingWindow::new(5);
        let projection = ChartProjection::from_window(Metric::Cpu, &window);
        assert!(projection.is_empty());
        assert_eq!(projection.max, 0.0);
        assert_eq!(projection.max_line, [(0.0, 0.0), (0.0, 0.0)]);
        assert_eq!(projection.latest, None);
    }

    #[test]
    fn marker_spans_index_range_at_max() {
        let window = SlidingWindow::new(3);
        for v in [0.10, 0.20, 0.30, 0.40] {
            window.append(v);
        }
        let projection = ChartProjection::from_window(Metric::Ram, &window);
        assert_eq!(projection.points, vec![(0.0, 0.20), (1.0, 0.30), (2.0, 0.40)]);
        assert_eq!(projection.max, 0.40);
        assert_eq!(projection.max_line, [(0.0, 0.40), (2.0, 0.40)]);
        assert_eq!(projection.latest, Some(0.40));
    }

    #[test]
    fn x_bounds_cover_capacity() {
        let projection = ChartProjection::from_samples(Metric::Cpu, &[0.5], 20);
        assert_eq!(projection.x_bounds(), [0.0, 19.0]);
        let projection = ChartProjection::from_samples(Metric::Cpu, &[0.5], 1);
        assert_eq!(projection.x_bounds(), [0.0, 1.0]);
    }
}
