use color_eyre::eyre::{Result, eyre};
use serde::Serialize;
use tokio::sync::mpsc;

use crate::metrics::{Metric, MetricSource, Sample, SampleScheduler, TickReport};

#[derive(Debug, Serialize)]
pub struct CaptureReport {
    pub interval_ms: u64,
    pub ticks: usize,
    pub windows: Vec<WindowReport>,
}

#[derive(Debug, Serialize)]
pub struct WindowReport {
    pub metric: Metric,
    pub capacity: usize,
    pub samples: Vec<Sample>,
    pub max: Sample,
    pub skipped: usize,
}

/// Let the scheduler run for `ticks` ticks without a terminal, then dump
/// every window.
pub async fn run_capture<S>(
    scheduler: &mut SampleScheduler<S>,
    reports: &mut mpsc::UnboundedReceiver<TickReport>,
    ticks: usize,
) -> Result<CaptureReport>
where
    S: MetricSource + Send + 'static,
{
    if ticks == 0 {
        return Err(eyre!("--headless-ticks must be greater than 0"));
    }

    let mut skipped = [0usize; Metric::COUNT];
    scheduler.start();
    for _ in 0..ticks {
        let report = reports
            .recv()
            .await
            .ok_or_else(|| eyre!("sampler stopped before the capture finished"))?;
        for (metric, _) in &report.skipped {
            skipped[metric.index()] += 1;
        }
    }
    scheduler.stop();

    let windows = scheduler
        .registry()
        .iter()
        .map(|(metric, window)| {
            let samples = window.snapshot();
            WindowReport {
                metric,
                capacity: window.capacity(),
                max: crate::metrics::window::max_of(samples.iter().copied()),
                samples,
                skipped: skipped[metric.index()],
            }
        })
        .collect();

    Ok(CaptureReport {
        interval_ms: scheduler.period().as_millis() as u64,
        ticks,
        windows,
    })
}

impl CaptureReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
