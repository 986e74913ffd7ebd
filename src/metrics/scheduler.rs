use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use super::metric::Metric;
use super::registry::MonitoringRegistry;
use super::source::{MetricSource, SourceError};
use super::window::normalize_percent;

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);
pub const MIN_INTERVAL: Duration = Duration::from_millis(50);

/// Outcome of one tick, sent to the presentation layer after the windows
/// have been updated.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub sampled: Vec<Metric>,
    pub skipped: Vec<(Metric, SourceError)>,
}

impl TickReport {
    pub fn touched(&self, metric: Metric) -> bool {
        self.sampled.contains(&metric)
    }
}

/// Periodic, resumable sampler feeding every window in a registry.
pub struct SampleScheduler<S> {
    registry: MonitoringRegistry,
    source: Arc<Mutex<S>>,
    period: Duration,
    notify: mpsc::UnboundedSender<TickReport>,
    task: Option<JoinHandle<()>>,
}

impl<S> SampleScheduler<S>
where
    S: MetricSource + Send + 'static,
{
    pub fn new(
        registry: MonitoringRegistry,
        source: S,
        period: Duration,
        notify: mpsc::UnboundedSender<TickReport>,
    ) -> Self {
        let floor = MIN_INTERVAL.max(source.min_interval());
        if period < floor {
            tracing::info!(
                requested_ms = period.as_millis() as u64,
                floor_ms = floor.as_millis() as u64,
                "sample interval raised to the source minimum"
            );
        }
        Self {
            registry,
            source: Arc::new(Mutex::new(source)),
            period: period.max(floor),
            notify,
            task: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn registry(&self) -> &MonitoringRegistry {
        &self.registry
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Begin ticking one period from now. No-op while already running.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }

        let registry = self.registry.clone();
        let source = Arc::clone(&self.source);
        let notify = self.notify.clone();
        let period = self.period;

        self.task = Some(tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let report = sample_all(&registry, &source);
                if notify.send(report).is_err() {
                    break;
                }
            }
        }));
        tracing::info!(period_ms = period.as_millis() as u64, "sampling started");
    }

    /// Halt ticking. Samples already taken are kept. No-op while stopped.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::info!("sampling stopped");
        }
    }

    /// Run one tick body right away, whether or not the timer is running.
    ///
    /// The report goes back to the caller only; nothing is sent on the
    /// notify channel.
    pub fn sample_now(&self) -> TickReport {
        sample_all(&self.registry, &self.source)
    }
}

impl<S> Drop for SampleScheduler<S> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

fn sample_all<S: MetricSource>(registry: &MonitoringRegistry, source: &Mutex<S>) -> TickReport {
    let _span = tracing::debug_span!("scheduler.tick").entered();
    let mut source = source.lock().unwrap_or_else(PoisonError::into_inner);
    let mut report = TickReport {
        sampled: Vec::with_capacity(Metric::COUNT),
        skipped: Vec::new(),
    };

    if let Err(err) = source.refresh() {
        tracing::warn!(error = %err, "skipping tick");
        report.skipped = registry.metrics().map(|m| (m, err.clone())).collect();
        return report;
    }

    for (metric, window) in registry.iter() {
        let reading = source.read(metric).and_then(|percent| {
            normalize_percent(percent).ok_or(SourceError::NotFinite {
                metric,
                value: percent,
            })
        });
        match reading {
            Ok(sample) => {
                window.append(sample);
                report.sampled.push(metric);
            }
            Err(err) => {
                tracing::warn!(metric = metric.label(), error = %err, "sample skipped");
                report.skipped.push((metric, err));
            }
        }
    }

    tracing::debug!(
        sampled = report.sampled.len(),
        skipped = report.skipped.len(),
        "tick"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Pops one scripted reading per metric per call, then repeats the last.
    struct ScriptedSource {
        cpu: VecDeque<Result<f64, SourceError>>,
        ram: VecDeque<Result<f64, SourceError>>,
    }

    impl ScriptedSource {
        fn new(cpu: Vec<Result<f64, SourceError>>, ram: Vec<Result<f64, SourceError>>) -> Self {
            Self {
                cpu: cpu.into(),
                ram: ram.into(),
            }
        }
    }

    impl MetricSource for ScriptedSource {
        fn read(&mut self, metric: Metric) -> Result<f64, SourceError> {
            let queue = match metric {
                Metric::Cpu => &mut self.cpu,
                Metric::Ram => &mut self.ram,
            };
            if queue.len() > 1 {
                queue.pop_front().unwrap_or(Ok(0.0))
            } else {
                queue.front().cloned().unwrap_or(Ok(0.0))
            }
        }
    }

    struct BrokenRefresh;

    impl MetricSource for BrokenRefresh {
        fn refresh(&mut self) -> Result<(), SourceError> {
            Err(SourceError::Refresh("counters offline".to_string()))
        }

        fn read(&mut self, _metric: Metric) -> Result<f64, SourceError> {
            Ok(10.0)
        }
    }

    fn scheduler<S: MetricSource + Send + 'static>(
        source: S,
    ) -> (SampleScheduler<S>, mpsc::UnboundedReceiver<TickReport>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler =
            SampleScheduler::new(MonitoringRegistry::new(3), source, DEFAULT_INTERVAL, tx);
        (scheduler, rx)
    }

    #[tokio::test]
    async fn sample_now_normalizes_percentages() {
        let source = ScriptedSource::new(vec![Ok(50.0)], vec![Ok(25.0)]);
        let (scheduler, mut rx) = scheduler(source);

        let report = scheduler.sample_now();

        assert_eq!(report.sampled, vec![Metric::Cpu, Metric::Ram]);
        assert_eq!(scheduler.registry().window(Metric::Cpu).snapshot(), vec![0.5]);
        assert_eq!(scheduler.registry().window(Metric::Ram).snapshot(), vec![0.25]);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn failed_read_skips_only_that_metric() {
        let source = ScriptedSource::new(
            vec![Err(SourceError::Unavailable(Metric::Cpu)), Ok(40.0)],
            vec![Ok(20.0)],
        );
        let (scheduler, _rx) = scheduler(source);

        let first = scheduler.sample_now();
        assert!(!first.touched(Metric::Cpu));
        assert!(first.touched(Metric::Ram));
        assert_eq!(first.skipped.len(), 1);

        scheduler.sample_now();
        assert_eq!(scheduler.registry().window(Metric::Cpu).snapshot(), vec![0.4]);
        assert_eq!(
            scheduler.registry().window(Metric::Ram).snapshot(),
            vec![0.2, 0.2]
        );
    }

    #[tokio::test]
    async fn non_finite_reading_is_skipped() {
        let source = ScriptedSource::new(vec![Ok(f64::NAN)], vec![Ok(30.0)]);
        let (scheduler, _rx) = scheduler(source);

        let report = scheduler.sample_now();

        assert!(matches!(
            report.skipped.as_slice(),
            [(Metric::Cpu, SourceError::NotFinite { .. })]
        ));
        assert!(scheduler.registry().window(Metric::Cpu).is_empty());
    }

    #[tokio::test]
    async fn refresh_failure_skips_whole_tick() {
        let (scheduler, _rx) = scheduler(BrokenRefresh);

        let report = scheduler.sample_now();

        assert!(report.sampled.is_empty());
        assert_eq!(report.skipped.len(), Metric::COUNT);
        assert!(scheduler.registry().iter().all(|(_, w)| w.is_empty()));
    }

    #[tokio::test]
    async fn start_and_stop_are_idempotent() {
        let (mut scheduler, _rx) = scheduler(ScriptedSource::new(vec![Ok(1.0)], vec![Ok(1.0)]));
        assert!(!scheduler.is_running());

        scheduler.start();
        scheduler.start();
        assert!(scheduler.is_running());

        scheduler.stop();
        assert!(!scheduler.is_running());
        scheduler.stop();
        assert!(!scheduler.is_running());
    }

    #[test]
    fn period_has_a_floor() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let scheduler = SampleScheduler::new(
            MonitoringRegistry::default(),
            BrokenRefresh,
            Duration::from_millis(1),
            tx,
        );
        assert_eq!(scheduler.period(), MIN_INTERVAL);
    }

    struct SlowCounters;

    impl MetricSource for SlowCounters {
        fn read(&mut self, _metric: Metric) -> Result<f64, SourceError> {
            Ok(1.0)
        }

        fn min_interval(&self) -> Duration {
            Duration::from_millis(200)
        }
    }

    #[test]
    fn period_respects_source_minimum() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let fast = SampleScheduler::new(
            MonitoringRegistry::default(),
            SlowCounters,
            Duration::from_millis(60),
            tx.clone(),
        );
        assert_eq!(fast.period(), Duration::from_millis(200));

        let slow = SampleScheduler::new(
            MonitoringRegistry::default(),
            SlowCounters,
            Duration::from_millis(750),
            tx,
        );
        assert_eq!(slow.period(), Duration::from_millis(750));
    }
}
