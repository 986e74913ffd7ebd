pub mod projection;

pub use projection::ChartProjection;
