pub mod action;
pub mod app;
pub mod capture;
pub mod chart;
pub mod config;
pub mod event;
pub mod format;
pub mod logging;
pub mod metrics;
pub mod ui;
