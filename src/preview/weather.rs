//! Current conditions plus a forecast strip.

use chrono::{Datelike, Local, Weekday};
use serde::Serialize;
use serde_json::Value;

use super::geometry::Domain;
use super::Mode;
use crate::resolve::{round_half_up, stringify_value, to_number};
use crate::types::PreviewData;

const DEFAULT_TEMP_UNIT: &str = "\u{b0}C";
const DEFAULT_WIND_UNIT: &str = "km/h";
const DEFAULT_CODE: f64 = 1.0;
const THUNDERSTORM_FROM: i64 = 95;
const DEFAULT_DESCRIPTION: &str = "Clear";

pub const FORECAST_HEADER: &str = "7-Day Forecast";

/// WMO weather code to icon, first match wins.
pub fn weather_icon(code: i64) -> &'static str {
    match code {
        0 => "\u{2600}\u{fe0f}",
        1 => "\u{1f324}\u{fe0f}",
        2 => "\u{26c5}",
        3 => "\u{2601}\u{fe0f}",
        45..=48 => "\u{1f32b}\u{fe0f}",
        51..=57 => "\u{1f326}\u{fe0f}",
        61..=67 => "\u{1f327}\u{fe0f}",
        71..=77 => "\u{1f328}\u{fe0f}",
        80..=82 => "\u{1f327}\u{fe0f}",
        85..=86 => "\u{1f328}\u{fe0f}",
        c if c >= THUNDERSTORM_FROM => "\u{26c8}\u{fe0f}",
        _ => "\u{1f324}\u{fe0f}",
    }
}

/// Icon for a raw `weathercode`. Only whole codes hit the exact arms and
/// ranges; a fractional code is thunder past 95 and the default otherwise.
pub fn icon_for_code(code: f64) -> &'static str {
    if code.fract() == 0.0 && code.is_finite() {
        weather_icon(code as i64)
    } else if code >= THUNDERSTORM_FROM as f64 {
        weather_icon(THUNDERSTORM_FROM)
    } else {
        weather_icon(DEFAULT_CODE as i64)
    }
}

/// `(base, span)` of forecast bar heights in pixels.
fn bar_scale(mode: Mode) -> (f64, f64) {
    match mode {
        Mode::Compact => (8.0, 32.0),
        Mode::Full => (16.0, 64.0),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastBar {
    /// Full day name, or just its first character in compact mode.
    pub day: String,
    pub temperature: f64,
    /// `"23°"`, full mode only.
    pub temperature_label: Option<String>,
    pub height: f64,
    pub today: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherView {
    pub title: String,
    pub mode: Mode,
    pub icon: String,
    pub description: String,
    /// Rounded temperature, if the sample has one.
    pub temperature: Option<i64>,
    pub temperature_unit: String,
    /// `"65%"`, full mode only.
    pub humidity: Option<String>,
    /// `"12.5 km/h"`, full mode only.
    pub wind: Option<String>,
    pub forecast: Vec<ForecastBar>,
    /// Tallest possible bar for this mode.
    pub max_bar_height: f64,
}

impl WeatherView {
    /// `21°C`, or a dash when the temperature is missing.
    pub fn headline(&self) -> String {
        match self.temperature {
            Some(t) => format!("{t}{}", self.temperature_unit),
            None => crate::resolve::PLACEHOLDER.to_string(),
        }
    }

    pub fn forecast_header(&self) -> Option<&'static str> {
        (!self.forecast.is_empty() && !self.mode.is_compact()).then_some(FORECAST_HEADER)
    }
}

fn weekday_abbrev(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "mon",
        Weekday::Tue => "tue",
        Weekday::Wed => "wed",
        Weekday::Thu => "thu",
        Weekday::Fri => "fri",
        Weekday::Sat => "sat",
        Weekday::Sun => "sun",
    }
}

/// Index of `today` in `days`, compared case-insensitively.
pub fn today_index(days: &[String], today: Weekday) -> Option<usize> {
    let needle = weekday_abbrev(today);
    days.iter().position(|d| d.to_lowercase() == needle)
}

pub fn render(data: &PreviewData, mode: Mode) -> WeatherView {
    render_for_day(data, mode, Local::now().weekday())
}

/// [`render`] with an explicit "today".
pub fn render_for_day(data: &PreviewData, mode: Mode, today: Weekday) -> WeatherView {
    let doc = &data.sample_response;
    let str_or = |key: &str, default: &str| {
        doc.get(key)
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    };

    let temperature = doc
        .get("temperature")
        .and_then(Value::as_f64)
        .map(|t| round_half_up(t) as i64);
    let code = doc
        .get("weathercode")
        .and_then(Value::as_f64)
        .unwrap_or(DEFAULT_CODE);
    let wind_unit = str_or("windspeed_unit", DEFAULT_WIND_UNIT);

    let full = !mode.is_compact();
    let humidity = doc
        .get("humidity")
        .filter(|v| full && !v.is_null())
        .map(|h| format!("{}%", stringify_value(h)));
    let wind = doc
        .get("windspeed")
        .filter(|v| full && !v.is_null())
        .map(|w| format!("{} {wind_unit}", stringify_value(w)));

    let forecast = doc.get("forecast");
    let days: Vec<String> = forecast
        .and_then(|f| f.get("days"))
        .and_then(Value::as_array)
        .map(|a| a.iter().map(|d| d.as_str().map(str::to_string).unwrap_or_default()).collect())
        .unwrap_or_default();
    let temps: Vec<f64> = forecast
        .and_then(|f| f.get("temperatures"))
        .and_then(Value::as_array)
        .map(|a| a.iter().map(|t| to_number(Some(t))).collect())
        .unwrap_or_default();

    let domain = Domain::of(&temps).unwrap_or(Domain::from_bounds(0.0, 1.0));
    let (base, span) = bar_scale(mode);
    let today = today_index(&days, today);

    let bars = temps
        .iter()
        .enumerate()
        .map(|(i, &t)| {
            let day = days.get(i).cloned().unwrap_or_default();
            ForecastBar {
                day: if full {
                    day
                } else {
                    day.chars().next().map(String::from).unwrap_or_default()
                },
                temperature: t,
                temperature_label: full.then(|| format!("{}\u{b0}", round_half_up(t) as i64)),
                height: domain.normalize(t) * span + base,
                today: today == Some(i),
            }
        })
        .collect();

    WeatherView {
        title: data.preview_config.title.clone(),
        mode,
        icon: icon_for_code(code).to_string(),
        description: str_or("weathercode_description", DEFAULT_DESCRIPTION),
        temperature,
        temperature_unit: str_or("temperature_unit", DEFAULT_TEMP_UNIT),
        humidity,
        wind,
        forecast: bars,
        max_bar_height: base + span,
    }
}
