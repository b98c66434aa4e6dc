//! Color themes, selectable with `--theme`.

use ratatui::style::Color;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Muted modern palette (default)
    #[default]
    Nord,
    /// Bright white on blue
    DosBlue,
    /// Amber on black
    AmberCrt,
    /// Green on black
    GreenPhosphor,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Nord, Theme::DosBlue, Theme::AmberCrt, Theme::GreenPhosphor];

    pub fn colors(&self) -> ColorScheme {
        match self {
            Theme::Nord => ColorScheme::nord(),
            Theme::DosBlue => ColorScheme::dos_blue(),
            Theme::AmberCrt => ColorScheme::amber_crt(),
            Theme::GreenPhosphor => ColorScheme::green_phosphor(),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nord" => Ok(Theme::Nord),
            "dos" | "dosblue" | "dos-blue" => Ok(Theme::DosBlue),
            "amber" | "ambercrt" | "amber-crt" => Ok(Theme::AmberCrt),
            "green" | "greenphosphor" | "green-phosphor" => Ok(Theme::GreenPhosphor),
            _ => Err(format!(
                "Unknown theme '{s}'. Available: nord, dos-blue, amber-crt, green-phosphor"
            )),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Nord => write!(f, "nord"),
            Theme::DosBlue => write!(f, "dos-blue"),
            Theme::AmberCrt => write!(f, "amber-crt"),
            Theme::GreenPhosphor => write!(f, "green-phosphor"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ColorScheme {
    /// Subtle tint behind the focused pane
    pub background_focused: Color,
    pub text: Color,
    pub text_dim: Color,
    pub focus_border: Color,
    pub unfocused_border: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    /// Auth badges, hovered bars and the active category chip
    pub badge: Color,
    /// Compare tray and selected-for-compare marker
    pub compare: Color,
    pub toast_success: Color,
    pub toast_error: Color,
    pub debug_indicator: Color,
    pub chart: ChartColors,
}

/// Colors used inside preview drawings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartColors {
    pub line: Color,
    pub bar: Color,
    pub grid: Color,
    pub up: Color,
    pub down: Color,
    /// Today's forecast bar
    pub today: Color,
    pub pin: Color,
}

/// Single-hue CRT look: everything is a shade of one phosphor color.
struct Phosphor {
    base: Color,
    bright: Color,
    dim: Color,
    tint: Color,
    grid: Color,
    today: Color,
}

impl Phosphor {
    fn scheme(self, toast_success: Color, debug_indicator: Color) -> ColorScheme {
        ColorScheme {
            background_focused: self.tint,
            text: self.base,
            text_dim: self.dim,
            focus_border: self.bright,
            unfocused_border: self.dim,
            selection_bg: self.base,
            selection_fg: Color::Black,
            badge: self.bright,
            compare: self.bright,
            toast_success,
            toast_error: Color::Red,
            debug_indicator,
            chart: ChartColors {
                line: self.bright,
                bar: self.base,
                grid: self.grid,
                up: self.bright,
                down: Color::Red,
                today: self.today,
                pin: Color::Red,
            },
        }
    }
}

impl ColorScheme {
    pub fn nord() -> Self {
        let red = Color::Rgb(191, 97, 106);
        Self {
            background_focused: Color::Rgb(40, 40, 40),
            text: Color::White,
            text_dim: Color::Gray,
            focus_border: Color::Yellow,
            unfocused_border: Color::Gray,
            selection_bg: Color::Yellow,
            selection_fg: Color::Black,
            badge: Color::Cyan,
            compare: Color::Rgb(136, 192, 208),
            toast_success: Color::Green,
            toast_error: Color::Red,
            debug_indicator: Color::Magenta,
            chart: ChartColors {
                line: Color::Rgb(129, 161, 193),
                bar: Color::Rgb(94, 129, 172),
                grid: Color::DarkGray,
                up: Color::Rgb(163, 190, 140),
                down: red,
                today: Color::Rgb(235, 203, 139),
                pin: red,
            },
        }
    }

    pub fn dos_blue() -> Self {
        Self {
            background_focused: Color::Rgb(20, 20, 255),
            text: Color::White,
            text_dim: Color::LightBlue,
            focus_border: Color::Yellow,
            unfocused_border: Color::Cyan,
            selection_bg: Color::Cyan,
            selection_fg: Color::Black,
            badge: Color::LightCyan,
            compare: Color::LightYellow,
            toast_success: Color::LightGreen,
            toast_error: Color::LightRed,
            debug_indicator: Color::LightMagenta,
            chart: ChartColors {
                line: Color::White,
                bar: Color::LightCyan,
                grid: Color::LightBlue,
                up: Color::LightGreen,
                down: Color::LightRed,
                today: Color::Yellow,
                pin: Color::LightRed,
            },
        }
    }

    pub fn amber_crt() -> Self {
        Phosphor {
            base: Color::Rgb(255, 176, 0),
            bright: Color::Rgb(255, 200, 100),
            dim: Color::Rgb(180, 120, 0),
            tint: Color::Rgb(30, 20, 0),
            grid: Color::Rgb(90, 60, 0),
            today: Color::Rgb(255, 230, 180),
        }
        .scheme(Color::Rgb(100, 255, 100), Color::Rgb(255, 100, 255))
    }

    pub fn green_phosphor() -> Self {
        let bright = Color::Rgb(100, 255, 100);
        Phosphor {
            base: Color::Rgb(0, 255, 0),
            bright,
            dim: Color::Rgb(0, 180, 0),
            tint: Color::Rgb(0, 25, 0),
            grid: Color::Rgb(0, 90, 0),
            today: Color::Rgb(200, 255, 200),
        }
        .scheme(bright, Color::Cyan)
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::nord()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_parsing() {
        assert_eq!("nord".parse::<Theme>().unwrap(), Theme::Nord);
        assert_eq!("NORD".parse::<Theme>().unwrap(), Theme::Nord);
        assert_eq!("dos".parse::<Theme>().unwrap(), Theme::DosBlue);
        assert_eq!("dos-blue".parse::<Theme>().unwrap(), Theme::DosBlue);
        assert_eq!("amber".parse::<Theme>().unwrap(), Theme::AmberCrt);
        assert_eq!("green".parse::<Theme>().unwrap(), Theme::GreenPhosphor);
        assert!("invalid".parse::<Theme>().is_err());
    }

    #[test]
    fn test_display_parses_back() {
        for theme in Theme::ALL {
            assert_eq!(theme.to_string().parse::<Theme>().unwrap(), theme);
        }
    }

    #[test]
    fn test_trend_colors_differ() {
        for theme in Theme::ALL {
            let c = theme.colors();
            assert_ne!(c.chart.up, c.chart.down);
            assert_ne!(c.chart.today, c.chart.bar);
            assert_ne!(c.selection_bg, c.selection_fg);
        }
    }

    #[test]
    fn test_crt_themes_share_one_hue() {
        let amber = Theme::AmberCrt.colors();
        assert_eq!(amber.text, amber.selection_bg);
        assert_eq!(amber.focus_border, amber.chart.line);
        assert_eq!(amber.unfocused_border, amber.text_dim);
        assert_eq!(Theme::GreenPhosphor.colors().toast_success, Theme::GreenPhosphor.colors().badge);
    }
}
