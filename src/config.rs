use std::path::{Path, PathBuf};

use crossterm::event::KeyCode;
use serde::Deserialize;

pub const MIN_INTERVAL_MS: u64 = 50;
pub const MAX_CAPACITY: usize = 1000;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub chart: ChartConfig,
    pub colors: ColorsConfig,
    pub keybinds: KeybindsConfig,
}

impl Config {
    /// Clamp values that would make the sampler misbehave.
    pub fn sanitized(mut self) -> Self {
        self.general.sample_interval_ms = self.general.sample_interval_ms.max(MIN_INTERVAL_MS);
        self.general.window_capacity = self.general.window_capacity.clamp(1, MAX_CAPACITY);
        self
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub sample_interval_ms: u64,
    pub window_capacity: usize,
    pub default_metric: String,
    pub color_support: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            sample_interval_ms: 500,
            window_capacity: 20,
            default_metric: "cpu".to_string(),
            color_support: "auto".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub show_max_marker: bool,
    pub marker: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            show_max_marker: true,
            marker: "braille".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    pub theme: String,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        ColorsConfig {
            theme: "dark".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct KeybindsConfig {
    pub quit: String,
    pub select_cpu: String,
    pub select_ram: String,
    pub cycle_metric: String,
    pub clear: String,
    pub clear_all: String,
    pub pause: String,
    pub sample_now: String,
    pub cycle_theme: String,
    pub help: String,
}

impl Default for KeybindsConfig {
    fn default() -> Self {
        KeybindsConfig {
            quit: "q".to_string(),
            select_cpu: "c".to_string(),
            select_ram: "r".to_string(),
            cycle_metric: "Tab".to_string(),
            clear: "x".to_string(),
            clear_all: "X".to_string(),
            pause: "p".to_string(),
            sample_now: "Space".to_string(),
            cycle_theme: "t".to_string(),
            help: "?".to_string(),
        }
    }
}

/// Parse a keybind string: a single character or a named key.
pub fn parse_key(s: &str) -> Option<KeyCode> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c));
    }
    match s.to_lowercase().as_str() {
        "space" => Some(KeyCode::Char(' ')),
        "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "backspace" => Some(KeyCode::Backspace),
        "delete" | "del" => Some(KeyCode::Delete),
        _ => None,
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("loadline").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    let config = match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(path = %path.display(), error = %err, "invalid config, using defaults");
            Config::default()
        }),
        Err(_) => Config::default(),
    };
    config.sanitized()
}
