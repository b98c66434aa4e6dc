//! Stylised location ping. Pin placement is decorative, not a projection.

use serde::Serialize;
use serde_json::Value;

use super::geometry::Point;
use super::{Field, Mode};
use crate::resolve::{format_label, resolve_key, stringify_value, PLACEHOLDER};
use crate::types::PreviewData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Lat,
    Lon,
}

/// `35.6762° N`, `139.6503° E`.
pub fn format_coord(value: f64, axis: Axis) -> String {
    let dir = match (axis, value >= 0.0) {
        (Axis::Lat, true) => "N",
        (Axis::Lat, false) => "S",
        (Axis::Lon, true) => "E",
        (Axis::Lon, false) => "W",
    };
    format!("{:.4}\u{b0} {dir}", value.abs())
}

/// Normalised pin position in `[0, 1]` on both axes.
///
/// x needs both coordinates, y only latitude; anything missing centres
/// that axis.
pub fn pin_position(lat: Option<f64>, lon: Option<f64>) -> Point {
    let x = match (lat, lon) {
        (Some(_), Some(lon)) => 0.35 + ((lon + 180.0) / 360.0) * 0.3,
        _ => 0.5,
    };
    let y = match lat {
        Some(lat) => 0.3 + ((90.0 - lat) / 180.0) * 0.4,
        None => 0.5,
    };
    Point::new(x, y)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub title: String,
    pub subtitle: Option<String>,
    pub mode: Mode,
    /// `city, country`, or the title when there is no city.
    pub place: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub pin: Point,
    /// Formatted `(lat, lon)` when both are known.
    pub coords: Option<(String, String)>,
    /// Configured display fields, full mode only.
    pub fields: Vec<Field>,
}

fn map_field(doc: &Value, key: &str) -> Field {
    let value = resolve_key(doc, key);
    let text = match (key, value.and_then(Value::as_f64)) {
        ("lat", Some(n)) => format_coord(n, Axis::Lat),
        ("lon", Some(n)) => format_coord(n, Axis::Lon),
        _ => match value {
            None | Some(Value::Null) => PLACEHOLDER.to_string(),
            Some(v) => stringify_value(v),
        },
    };
    Field {
        key: key.to_string(),
        label: format_label(key),
        value: text,
    }
}

pub fn render(data: &PreviewData, mode: Mode) -> MapView {
    let doc = &data.sample_response;
    let cfg = &data.preview_config;

    let lat = doc.get("lat").and_then(Value::as_f64);
    let lon = doc.get("lon").and_then(Value::as_f64);
    let city = doc.get("city").and_then(Value::as_str);
    let country = doc.get("country").and_then(Value::as_str);

    let mut place = city.unwrap_or(cfg.title.as_str()).to_string();
    if let Some(country) = country.filter(|c| !c.is_empty()) {
        place.push_str(", ");
        place.push_str(country);
    }

    let coords = lat
        .zip(lon)
        .map(|(la, lo)| (format_coord(la, Axis::Lat), format_coord(lo, Axis::Lon)));

    let fields = if mode.is_compact() {
        Vec::new()
    } else {
        cfg.display_fields
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|k| map_field(doc, k))
            .collect()
    };

    MapView {
        title: cfg.title.clone(),
        subtitle: cfg.subtitle.clone(),
        mode,
        place,
        lat,
        lon,
        pin: pin_position(lat, lon),
        coords,
        fields,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PreviewConfig, PreviewType};
    use serde_json::json;

    fn map(sample: Value, fields: Option<Vec<&str>>) -> PreviewData {
        PreviewData {
            id: "ip-api".into(),
            preview_type: PreviewType::Map,
            sample_response: sample,
            preview_config: PreviewConfig {
                title: "IP Geolocation".into(),
                display_fields: fields.map(|f| f.into_iter().map(String::from).collect()),
                ..Default::default()
            },
        }
    }

    #[test]
    fn coordinates_format_with_hemisphere() {
        assert_eq!(format_coord(35.6762, Axis::Lat), "35.6762\u{b0} N");
        assert_eq!(format_coord(-33.8688, Axis::Lat), "33.8688\u{b0} S");
        assert_eq!(format_coord(-122.4194, Axis::Lon), "122.4194\u{b0} W");
        assert_eq!(format_coord(0.0, Axis::Lon), "0.0000\u{b0} E");
    }

    #[test]
    fn pin_placement_is_decorative() {
        let p = pin_position(Some(90.0), Some(180.0));
        assert!((p.x - 0.65).abs() < 1e-12);
        assert!((p.y - 0.3).abs() < 1e-12);
        let p = pin_position(Some(-90.0), Some(-180.0));
        assert!((p.x - 0.35).abs() < 1e-12);
        assert!((p.y - 0.7).abs() < 1e-12);
    }

    #[test]
    fn missing_coordinates_centre_the_pin() {
        assert_eq!(pin_position(None, None), Point::new(0.5, 0.5));
        assert_eq!(pin_position(None, Some(10.0)).x, 0.5);
        let p = pin_position(Some(0.0), None);
        assert_eq!(p.x, 0.5);
        assert!((p.y - 0.5).abs() < 1e-12);
    }

    #[test]
    fn compact_place_and_coords() {
        let v = render(
            &map(json!({"lat": 37.7749, "lon": -122.4194, "city": "San Francisco", "country": "United States"}), None),
            Mode::Compact,
        );
        assert_eq!(v.place, "San Francisco, United States");
        let (la, lo) = v.coords.unwrap();
        assert_eq!(la, "37.7749\u{b0} N");
        assert_eq!(lo, "122.4194\u{b0} W");
        assert!(v.fields.is_empty());
    }

    #[test]
    fn place_falls_back_to_title() {
        let v = render(&map(json!({}), None), Mode::Compact);
        assert_eq!(v.place, "IP Geolocation");
        assert!(v.coords.is_none());
    }

    #[test]
    fn full_fields_use_coordinate_formatting_for_lat_lon() {
        let v = render(
            &map(
                json!({"lat": 51.5, "lon": -0.12, "isp": "BT", "zip": null, "as": 2856}),
                Some(vec!["lat", "lon", "isp", "zip", "as"]),
            ),
            Mode::Full,
        );
        let values: Vec<_> = v.fields.iter().map(|f| f.value.as_str()).collect();
        assert_eq!(
            values,
            vec!["51.5000\u{b0} N", "0.1200\u{b0} W", "BT", "\u{2014}", "2856"]
        );
    }
}
