use ratatui::style::Color;

use crate::metrics::Metric;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSupport {
    Auto,
    Truecolor,
    Color256,
    Mono,
}

impl ColorSupport {
    pub fn from_config_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "truecolor" | "24bit" => ColorSupport::Truecolor,
            "256" | "256color" => ColorSupport::Color256,
            "mono" | "monochrome" => ColorSupport::Mono,
            _ => ColorSupport::Auto,
        }
    }
}

pub fn detect_color_support() -> ColorSupport {
    let colorterm = std::env::var("COLORTERM")
        .unwrap_or_default()
        .to_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        return ColorSupport::Truecolor;
    }

    let term = std::env::var("TERM").unwrap_or_default().to_lowercase();
    if term == "dumb" {
        return ColorSupport::Mono;
    }
    ColorSupport::Color256
}

pub fn resolve_color_support(config: &str) -> ColorSupport {
    let parsed = ColorSupport::from_config_str(config);
    if parsed == ColorSupport::Auto {
        detect_color_support()
    } else {
        parsed
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    pub header_accent_bg: Color,
    pub header_accent_fg: Color,
    pub status_ok: Color,
    pub status_err: Color,
    pub statusbar_bg: Color,
    pub overlay_border: Color,
    pub text_secondary: Color,
    pub pill_key_bg: Color,
    pub pill_key_fg: Color,
    pub pill_desc_fg: Color,
    pub surface_bg: Color,
    pub gauge_unfilled: Color,
    pub series_cpu: Color,
    pub series_ram: Color,
    pub max_marker: Color,
    pub axis: Color,
    pub paused_badge: Color,
}

impl Theme {
    pub fn from_config(theme_name: &str, support: ColorSupport) -> Self {
        if support == ColorSupport::Mono {
            return Self::mono();
        }
        let mut theme = match theme_name.to_lowercase().as_str() {
            "light" => Self::light(),
            _ => Self::dark(),
        };
        if support == ColorSupport::Color256 {
            theme.downgrade_to_256();
        }
        theme
    }

    pub fn next(&self, support: ColorSupport) -> Self {
        if support == ColorSupport::Mono {
            return Self::mono();
        }
        let next_name = match self.name {
            "dark" => "light",
            _ => "dark",
        };
        Theme::from_config(next_name, support)
    }

    pub fn series_color(&self, metric: Metric) -> Color {
        match metric {
            Metric::Cpu => self.series_cpu,
            Metric::Ram => self.series_ram,
        }
    }

    fn downgrade_to_256(&mut self) {
        self.header_accent_bg = to_indexed(self.header_accent_bg);
        self.header_accent_fg = to_indexed(self.header_accent_fg);
        self.status_ok = to_indexed(self.status_ok);
        self.status_err = to_indexed(self.status_err);
        self.statusbar_bg = to_indexed(self.statusbar_bg);
        self.overlay_border = to_indexed(self.overlay_border);
        self.text_secondary = to_indexed(self.text_secondary);
        self.pill_key_bg = to_indexed(self.pill_key_bg);
        self.pill_key_fg = to_indexed(self.pill_key_fg);
        self.pill_desc_fg = to_indexed(self.pill_desc_fg);
        self.surface_bg = to_indexed(self.surface_bg);
        self.gauge_unfilled = to_indexed(self.gauge_unfilled);
        self.series_cpu = to_indexed(self.series_cpu);
        self.series_ram = to_indexed(self.series_ram);
        self.max_marker = to_indexed(self.max_marker);
        self.axis = to_indexed(self.axis);
        self.paused_badge = to_indexed(self.paused_badge);
    }

    pub fn dark() -> Self {
        Theme {
            name: "dark",
            header_accent_bg: Color::Green,
            header_accent_fg: Color::Black,
            status_ok: Color::Green,
            status_err: Color::Red,
            statusbar_bg: Color::DarkGray,
            overlay_border: Color::DarkGray,
            text_secondary: Color::Gray,
            pill_key_bg: Color::Yellow,
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            surface_bg: Color::DarkGray,
            gauge_unfilled: Color::DarkGray,
            series_cpu: Color::Rgb(103, 232, 249),
            series_ram: Color::Rgb(192, 132, 252),
            max_marker: Color::Rgb(251, 146, 60),
            axis: Color::Gray,
            paused_badge: Color::Rgb(239, 68, 68),
        }
    }

    pub fn light() -> Self {
        Theme {
            name: "light",
            header_accent_bg: Color::Blue,
            header_accent_fg: Color::White,
            status_ok: Color::Rgb(0, 120, 0),
            status_err: Color::Red,
            statusbar_bg: Color::Rgb(220, 220, 220),
            overlay_border: Color::Rgb(150, 150, 150),
            text_secondary: Color::DarkGray,
            pill_key_bg: Color::Blue,
            pill_key_fg: Color::White,
            pill_desc_fg: Color::Black,
            surface_bg: Color::Rgb(200, 200, 200),
            gauge_unfilled: Color::Rgb(200, 200, 200),
            series_cpu: Color::Rgb(70, 130, 180),
            series_ram: Color::Rgb(160, 80, 160),
            max_marker: Color::Rgb(200, 100, 0),
            axis: Color::DarkGray,
            paused_badge: Color::Rgb(200, 60, 60),
        }
    }

    pub fn mono() -> Self {
        Theme {
            name: "mono",
            header_accent_bg: Color::Black,
            header_accent_fg: Color::White,
            status_ok: Color::White,
            status_err: Color::White,
            statusbar_bg: Color::Black,
            overlay_border: Color::White,
            text_secondary: Color::Gray,
            pill_key_bg: Color::White,
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            surface_bg: Color::Black,
            gauge_unfilled: Color::Black,
            series_cpu: Color::White,
            series_ram: Color::White,
            max_marker: Color::Gray,
            axis: Color::Gray,
            paused_badge: Color::White,
        }
    }
}

fn to_indexed(color: Color) -> Color {
    match color {
        Color::Rgb(r, g, b) => Color::Indexed(rgb_to_ansi256(r, g, b)),
        _ => color,
    }
}

// 6x6x6 cube only; the grayscale ramp is not worth the extra branch here.
fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    let r = (r as f32 / 255.0 * 5.0).round() as u8;
    let g = (g as f32 / 255.0 * 5.0).round() as u8;
    let b = (b as f32 / 255.0 * 5.0).round() as u8;
    16 + 36 * r + 6 * g + b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_cycle_alternates() {
        let theme = Theme::from_config("dark", ColorSupport::Truecolor);
        assert_eq!(theme.next(ColorSupport::Truecolor).name, "light");
        assert_eq!(theme.next(ColorSupport::Truecolor).next(ColorSupport::Truecolor).name, "dark");
    }

    #[test]
    fn mono_support_forces_mono_theme() {
        let theme = Theme::from_config("light", ColorSupport::Mono);
        assert_eq!(theme.name, "mono");
        assert_eq!(theme.next(ColorSupport::Mono).name, "mono");
    }

    #[test]
    fn color256_maps_rgb_to_indexed() {
        let theme = Theme::from_config("dark", ColorSupport::Color256);
        assert!(matches!(theme.series_cpu, Color::Indexed(_)));
        assert_eq!(theme.header_accent_bg, Color::Green);
        assert_eq!(rgb_to_ansi256(0, 0, 0), 16);
        assert_eq!(rgb_to_ansi256(255, 255, 255), 231);
    }

    #[test]
    fn only_256_support_rewrites_rgb() {
        let truecolor = Theme::from_config("dark", ColorSupport::Truecolor);
        assert_eq!(truecolor.series_cpu, Color::Rgb(103, 232, 249));
        assert_eq!(truecolor.max_marker, Color::Rgb(251, 146, 60));

        let mono = Theme::from_config("dark", ColorSupport::Mono);
        assert_eq!(mono.series_cpu, Theme::mono().series_cpu);
        assert!(!matches!(mono.max_marker, Color::Rgb(..) | Color::Indexed(_)));
    }

    #[test]
    fn color_support_parsing() {
        assert_eq!(ColorSupport::from_config_str("truecolor"), ColorSupport::Truecolor);
        assert_eq!(ColorSupport::from_config_str("256"), ColorSupport::Color256);
        assert_eq!(ColorSupport::from_config_str("MONO"), ColorSupport::Mono);
        assert_eq!(ColorSupport::from_config_str("whatever"), ColorSupport::Auto);
    }
}
