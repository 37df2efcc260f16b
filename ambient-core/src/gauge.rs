//! Gauge geometry and color rules.
//!
//! A gauge encodes a bounded value as a stroke dash-offset on an arc track:
//! `offset = L * (max - value) / max`, so the visible arc grows with the
//! value and a reading at `max` shows the full track.

/// Scale ceiling of the temperature gauge, in °C.
pub const MAX_TEMPERATURE: f64 = 50.0;
/// Scale ceiling of the humidity gauge, in % relative.
pub const MAX_HUMIDITY: f64 = 100.0;

pub const UNIT_TEMPERATURE: &str = "°C";
pub const UNIT_HUMIDITY: &str = "%";

/// Stroke for temperatures at or below 17 °C.
pub const STROKE_COLD: Stroke = Stroke::rgb(0x04, 0x5D, 0xC2);
/// Stroke for temperatures above 17 °C up to 34 °C.
pub const STROKE_MILD: Stroke = Stroke::rgb(0x01, 0xAA, 0x0F);
/// Stroke for temperatures above 34 °C.
pub const STROKE_HOT: Stroke = Stroke::rgb(0xC2, 0x04, 0x04);
/// The humidity gauge's stroke, never value-dependent.
pub const STROKE_HUMIDITY: Stroke = Stroke::rgb(0x05, 0x84, 0xEC);

/// An RGB stroke color.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Stroke {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Stroke {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Fixed value range of one gauge, `[0, max]`.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct GaugeScale {
    max: f64,
}

impl GaugeScale {
    pub const fn new(max: f64) -> Self {
        Self { max }
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Dash offset for `value` on a track of length `path_length`.
    ///
    /// Linearly inverts value to offset and clamps into
    /// `[0, path_length]`: readings above `max` render as a full gauge,
    /// readings below zero as an empty one.
    pub fn dash_offset(&self, path_length: f64, value: f64) -> f64 {
        let raw = path_length * ((self.max - value) / self.max);
        raw.clamp(0.0, path_length)
    }
}

/// Threshold rule for the temperature stroke.
pub fn temperature_stroke(temperature: f64) -> Stroke {
    if temperature <= 17.0 {
        STROKE_COLD
    } else if temperature <= 34.0 {
        STROKE_MILD
    } else {
        STROKE_HOT
    }
}

pub fn humidity_stroke() -> Stroke {
    STROKE_HUMIDITY
}

/// Label text for a gauge: the raw value plus its unit suffix, with
/// minimal digits (`20.0` renders as `"20 °C"`, `20.5` as `"20.5 °C"`).
pub fn label(value: f64, unit: &str) -> String {
    format!("{value} {unit}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_monotonically_non_increasing() {
        let scale = GaugeScale::new(MAX_TEMPERATURE);
        let length = 100.0;
        let mut previous = f64::INFINITY;
        for step in 0..=500 {
            let value = f64::from(step) * 0.1;
            let offset = scale.dash_offset(length, value);
            assert!(offset <= previous, "offset rose at value {value}");
            assert!((0.0..=length).contains(&offset));
            previous = offset;
        }
    }

    #[test]
    fn over_scale_readings_clamp_to_zero() {
        let scale = GaugeScale::new(MAX_TEMPERATURE);
        assert_eq!(scale.dash_offset(100.0, 50.0), 0.0);
        assert_eq!(scale.dash_offset(100.0, 60.0), 0.0);
        assert_eq!(scale.dash_offset(100.0, 1e9), 0.0);
    }

    #[test]
    fn under_scale_readings_clamp_to_full_offset() {
        let scale = GaugeScale::new(MAX_HUMIDITY);
        assert_eq!(scale.dash_offset(100.0, -5.0), 100.0);
    }

    #[test]
    fn temperature_thresholds_are_exact() {
        assert_eq!(temperature_stroke(17.0), STROKE_COLD);
        assert_eq!(temperature_stroke(17.0001), STROKE_MILD);
        assert_eq!(temperature_stroke(34.0), STROKE_MILD);
        assert_eq!(temperature_stroke(34.0001), STROKE_HOT);
    }

    #[test]
    fn humidity_stroke_is_constant() {
        assert_eq!(humidity_stroke(), Stroke::rgb(0x05, 0x84, 0xEC));
    }

    #[test]
    fn labels_use_minimal_digits() {
        assert_eq!(label(20.0, UNIT_TEMPERATURE), "20 °C");
        assert_eq!(label(20.5, UNIT_TEMPERATURE), "20.5 °C");
        assert_eq!(label(45.0, UNIT_HUMIDITY), "45 %");
    }
}
