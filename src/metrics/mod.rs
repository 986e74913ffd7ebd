pub mod metric;
pub mod registry;
pub mod scheduler;
pub mod selection;
pub mod source;
pub mod window;

pub use metric::Metric;
pub use registry::MonitoringRegistry;
pub use scheduler::{SampleScheduler, TickReport};
pub use selection::{MetricSelection, PauseGesture};
pub use source::{MetricSource, SourceError, SysinfoSource};
pub use window::{Sample, SlidingWindow};
