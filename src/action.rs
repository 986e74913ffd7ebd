use crate::metrics::Metric;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    SelectMetric(Metric),
    CycleMetric,
    ClearActive,
    ClearAll,
    HoldPause,
    ReleasePause,
    TogglePause,
    SampleNow,
    CycleTheme,
    ToggleHelp,
    None,
}
