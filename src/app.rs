use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode};
use tokio::sync::mpsc;

use crate::action::Action;
use crate::chart::ChartProjection;
use crate::config::{Config, parse_key};
use crate::metrics::{
    Metric, MetricSelection, MetricSource, MonitoringRegistry, PauseGesture, SampleScheduler,
    TickReport,
};
use crate::ui::theme::{ColorSupport, Theme, resolve_color_support};

pub type DynSource = Box<dyn MetricSource + Send>;

const STATUS_TTL_SECS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
    pub created: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Help,
}

#[derive(Debug, Clone)]
pub struct ResolvedKeybinds {
    pub quit: KeyCode,
    pub select_cpu: KeyCode,
    pub select_ram: KeyCode,
    pub cycle_metric: KeyCode,
    pub clear: KeyCode,
    pub clear_all: KeyCode,
    pub pause: KeyCode,
    pub sample_now: KeyCode,
    pub cycle_theme: KeyCode,
    pub help: KeyCode,
}

impl ResolvedKeybinds {
    pub fn from_config(kb: &crate::config::KeybindsConfig) -> Self {
        Self {
            quit: parse_key(&kb.quit).unwrap_or(KeyCode::Char('q')),
            select_cpu: parse_key(&kb.select_cpu).unwrap_or(KeyCode::Char('c')),
            select_ram: parse_key(&kb.select_ram).unwrap_or(KeyCode::Char('r')),
            cycle_metric: parse_key(&kb.cycle_metric).unwrap_or(KeyCode::Tab),
            clear: parse_key(&kb.clear).unwrap_or(KeyCode::Char('x')),
            clear_all: parse_key(&kb.clear_all).unwrap_or(KeyCode::Char('X')),
            pause: parse_key(&kb.pause).unwrap_or(KeyCode::Char('p')),
            sample_now: parse_key(&kb.sample_now).unwrap_or(KeyCode::Char(' ')),
            cycle_theme: parse_key(&kb.cycle_theme).unwrap_or(KeyCode::Char('t')),
            help: parse_key(&kb.help).unwrap_or(KeyCode::Char('?')),
        }
    }

    /// Returns (key_label, description) pairs for all configurable keybinds.
    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        let mut entries = vec![
            (key_label(self.select_cpu), "Show CPU"),
            (key_label(self.select_ram), "Show RAM"),
            (key_label(self.cycle_metric), "Next metric"),
            (key_label(self.clear), "Clear shown history"),
            (key_label(self.clear_all), "Clear all history"),
            (key_label(self.pause), "Pause / resume"),
            (key_label(self.sample_now), "Sample now"),
            (key_label(self.cycle_theme), "Cycle theme"),
            (key_label(self.help), "Toggle help"),
            (key_label(self.quit), "Quit"),
        ];
        entries.push(("Ctrl".to_string(), "Hold to pause"));
        entries.push(("Ctrl+C".to_string(), "Quit (always)"));
        entries
    }
}

pub fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Bksp".to_string(),
        KeyCode::Delete => "Del".to_string(),
        _ => "?".to_string(),
    }
}

fn is_ctrl_modifier(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::Modifier(ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl)
    )
}

// With the kitty protocol a shifted letter can arrive as lowercase + SHIFT.
fn normalize_code(key: &KeyEvent) -> KeyCode {
    match key.code {
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::SHIFT) => {
            KeyCode::Char(c.to_ascii_uppercase())
        }
        code => code,
    }
}

pub struct App {
    pub running: bool,
    pub registry: MonitoringRegistry,
    pub scheduler: SampleScheduler<DynSource>,
    pub selection: MetricSelection,
    pub projection: ChartProjection,
    pub pause: PauseGesture,
    pub input_mode: InputMode,
    pub theme: Theme,
    pub color_support: ColorSupport,
    pub show_max_marker: bool,
    pub marker: String,
    pub status_message: Option<StatusMessage>,
    pub keybinds: ResolvedKeybinds,
}

impl App {
    /// Builds the app without starting the sampler; call [`App::start`]
    /// from inside the runtime.
    pub fn new(
        config: &Config,
        source: DynSource,
        notify: mpsc::UnboundedSender<TickReport>,
    ) -> Self {
        let registry = MonitoringRegistry::new(config.general.window_capacity);
        let scheduler = SampleScheduler::new(
            registry.clone(),
            source,
            Duration::from_millis(config.general.sample_interval_ms),
            notify,
        );
        let selection =
            MetricSelection::new(Metric::from_str_config(&config.general.default_metric));
        let projection = ChartProjection::for_active(&registry, selection.active());
        let color_support = resolve_color_support(&config.general.color_support);
        let theme = Theme::from_config(&config.colors.theme, color_support);

        App {
            running: true,
            registry,
            scheduler,
            selection,
            projection,
            pause: PauseGesture::default(),
            input_mode: InputMode::Normal,
            theme,
            color_support,
            show_max_marker: config.chart.show_max_marker,
            marker: config.chart.marker.clone(),
            status_message: None,
            keybinds: ResolvedKeybinds::from_config(&config.keybinds),
        }
    }

    pub fn start(&mut self) {
        self.scheduler.start();
    }

    pub fn is_paused(&self) -> bool {
        !self.scheduler.is_running()
    }

    pub fn active_metric(&self) -> Metric {
        self.selection.active()
    }

    /// Rebuild the chart data only when the shown window changed.
    pub fn on_sampled(&mut self, report: &TickReport) {
        if report.touched(self.selection.active()) {
            self.reproject();
        }
        if let Some((metric, err)) = report.skipped.first() {
            self.set_status(
                StatusKind::Error,
                format!("{} sample skipped: {err}", metric.label()),
            );
        }
    }

    pub fn on_housekeeping(&mut self) {
        if let Some(status) = &self.status_message
            && status.created.elapsed().as_secs() >= STATUS_TTL_SECS
        {
            self.status_message = None;
        }
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        if is_ctrl_modifier(key.code) {
            return match key.kind {
                KeyEventKind::Press | KeyEventKind::Repeat => Action::HoldPause,
                KeyEventKind::Release => Action::ReleasePause,
            };
        }
        if key.kind != KeyEventKind::Press {
            return Action::None;
        }

        // Ctrl+C always quits (hardwired safety)
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        match self.input_mode {
            InputMode::Normal => self.map_key_normal(key),
            InputMode::Help => self.map_key_help(key),
        }
    }

    fn map_key_normal(&self, key: KeyEvent) -> Action {
        let code = normalize_code(&key);
        let kb = &self.keybinds;

        if code == kb.quit {
            return Action::Quit;
        }
        if code == kb.select_cpu {
            return Action::SelectMetric(Metric::Cpu);
        }
        if code == kb.select_ram {
            return Action::SelectMetric(Metric::Ram);
        }
        if code == kb.cycle_metric {
            return Action::CycleMetric;
        }
        if code == kb.clear {
            return Action::ClearActive;
        }
        if code == kb.clear_all {
            return Action::ClearAll;
        }
        if code == kb.pause {
            return Action::TogglePause;
        }
        if code == kb.sample_now {
            return Action::SampleNow;
        }
        if code == kb.cycle_theme {
            return Action::CycleTheme;
        }
        if code == kb.help {
            return Action::ToggleHelp;
        }

        Action::None
    }

    fn map_key_help(&self, key: KeyEvent) -> Action {
        let code = normalize_code(&key);
        // In help mode, only the help key and Esc dismiss, everything else is ignored
        if code == self.keybinds.help || code == KeyCode::Esc {
            return Action::ToggleHelp;
        }
        Action::None
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.scheduler.stop();
                self.running = false;
            }
            Action::SelectMetric(metric) => {
                if self.selection.set_active(metric) {
                    self.reproject();
                }
            }
            Action::CycleMetric => {
                let next = self.selection.active().next();
                self.dispatch(Action::SelectMetric(next));
            }
            Action::ClearActive => {
                self.selection.clear_active(&self.registry);
                self.reproject();
                let label = self.active_metric().label();
                self.set_status(StatusKind::Info, format!("Cleared {label} history"));
            }
            Action::ClearAll => {
                self.selection.clear_all(&self.registry);
                self.reproject();
                self.set_status(StatusKind::Info, "Cleared all history".to_string());
            }
            Action::HoldPause => self.pause.press(&mut self.scheduler),
            Action::ReleasePause => self.pause.release(&mut self.scheduler),
            Action::TogglePause => {
                if self.scheduler.is_running() {
                    self.scheduler.stop();
                    self.set_status(StatusKind::Info, "Paused".to_string());
                } else {
                    self.pause.disarm();
                    self.scheduler.start();
                    self.set_status(StatusKind::Info, "Resumed".to_string());
                }
            }
            Action::SampleNow => {
                let report = self.scheduler.sample_now();
                self.on_sampled(&report);
            }
            Action::CycleTheme => {
                self.theme = self.theme.next(self.color_support);
            }
            Action::ToggleHelp => {
                self.input_mode = if self.input_mode == InputMode::Help {
                    InputMode::Normal
                } else {
                    InputMode::Help
                };
            }
            Action::None => {}
        }
    }

    pub fn show_help(&self) -> bool {
        self.input_mode == InputMode::Help
    }

    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        self.keybinds.help_entries()
    }

    fn reproject(&mut self) {
        self.projection = ChartProjection::for_active(&self.registry, self.selection.active());
    }

    fn set_status(&mut self, kind: StatusKind, text: String) {
        self.status_message = Some(StatusMessage {
            text,
            kind,
            created: Instant::now(),
        });
    }
}
