use insta::assert_debug_snapshot;
use loadline::chart::ChartProjection;
use loadline::metrics::{Metric, MonitoringRegistry};

#[test]
fn ram_projection_snapshot() {
    let registry = MonitoringRegistry::new(6);
    for v in [0.25, 0.5, 0.75, 0.5] {
        registry.window(Metric::Ram).append(v);
    }
    registry.window(Metric::Cpu).append(1.0);

    let projection = ChartProjection::for_active(&registry, Metric::Ram);

    assert_debug_snapshot!("ram_projection", projection);
}

#[test]
fn projection_follows_eviction() {
    let registry = MonitoringRegistry::new(3);
    let window = registry.window(Metric::Cpu);
    for v in [0.9, 0.1, 0.2, 0.3] {
        window.append(v);
    }

    let projection = ChartProjection::for_active(&registry, Metric::Cpu);

    // the evicted 0.9 no longer holds the marker up
    assert_eq!(projection.max, 0.3);
    assert_eq!(projection.max_line, [(0.0, 0.3), (2.0, 0.3)]);
}
