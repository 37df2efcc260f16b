//! The render-target seam between the update logic and whatever actually
//! draws the gauges. The updater is a pure function of one reading plus
//! surface geometry, so any `GaugeSurface` implementation gets the same
//! behavior.

use crate::error::RenderError;
use crate::gauge::{self, GaugeScale, Stroke};
use crate::reading::Reading;

/// One gauge's render target.
pub trait GaugeSurface {
    /// Total traversable length of the gauge track. Queried on every
    /// update; the surface may have been laid out differently since the
    /// last one.
    fn path_length(&self) -> f64;

    /// Called between computing and applying the new offset. The surface
    /// synchronizes with its currently rendered state here so the offset
    /// change animates from that state instead of snapping.
    fn begin_transition(&mut self);

    fn set_dash_offset(&mut self, offset: f64);
    fn set_stroke(&mut self, stroke: Stroke);
    fn set_label(&mut self, text: &str);
}

/// Writes one reading onto the two gauge surfaces.
#[derive(Debug, Clone, Copy)]
pub struct DisplayUpdater {
    temperature: GaugeScale,
    humidity: GaugeScale,
}

impl Default for DisplayUpdater {
    fn default() -> Self {
        Self {
            temperature: GaugeScale::new(gauge::MAX_TEMPERATURE),
            humidity: GaugeScale::new(gauge::MAX_HUMIDITY),
        }
    }
}

impl DisplayUpdater {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders `reading` onto both gauges. Idempotent for a fixed reading
    /// and surface geometry. An unusable surface fails this call only;
    /// the caller's loop is expected to log and continue.
    pub fn update(
        &self,
        temperature: &mut dyn GaugeSurface,
        humidity: &mut dyn GaugeSurface,
        reading: Reading,
    ) -> Result<(), RenderError> {
        update_gauge(
            temperature,
            "temperature",
            &self.temperature,
            reading.temperature,
            gauge::temperature_stroke(reading.temperature),
            gauge::UNIT_TEMPERATURE,
        )?;
        update_gauge(
            humidity,
            "humidity",
            &self.humidity,
            reading.humidity,
            gauge::humidity_stroke(),
            gauge::UNIT_HUMIDITY,
        )
    }
}

fn update_gauge(
    surface: &mut dyn GaugeSurface,
    name: &'static str,
    scale: &GaugeScale,
    value: f64,
    stroke: Stroke,
    unit: &str,
) -> Result<(), RenderError> {
    let path_length = surface.path_length();
    if !path_length.is_finite() || path_length <= 0.0 {
        return Err(RenderError::Surface {
            gauge: name,
            path_length,
        });
    }

    let offset = scale.dash_offset(path_length, value);

    surface.begin_transition();
    surface.set_dash_offset(offset);
    surface.set_stroke(stroke);
    surface.set_label(&gauge::label(value, unit));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gauge::{STROKE_HOT, STROKE_HUMIDITY, STROKE_MILD};

    /// Records every call so tests can check both values and ordering.
    struct FakeSurface {
        path_length: f64,
        calls: Vec<Call>,
    }

    #[derive(Debug, PartialEq, Clone)]
    enum Call {
        BeginTransition,
        DashOffset(f64),
        Stroke(Stroke),
        Label(String),
    }

    impl FakeSurface {
        fn with_length(path_length: f64) -> Self {
            Self {
                path_length,
                calls: Vec::new(),
            }
        }
    }

    impl GaugeSurface for FakeSurface {
        fn path_length(&self) -> f64 {
            self.path_length
        }

        fn begin_transition(&mut self) {
            self.calls.push(Call::BeginTransition);
        }

        fn set_dash_offset(&mut self, offset: f64) {
            self.calls.push(Call::DashOffset(offset));
        }

        fn set_stroke(&mut self, stroke: Stroke) {
            self.calls.push(Call::Stroke(stroke));
        }

        fn set_label(&mut self, text: &str) {
            self.calls.push(Call::Label(text.to_string()));
        }
    }

    #[test]
    fn renders_an_in_range_reading() {
        let mut temperature = FakeSurface::with_length(100.0);
        let mut humidity = FakeSurface::with_length(100.0);
        let reading = Reading {
            temperature: 20.0,
            humidity: 45.0,
        };

        DisplayUpdater::new()
            .update(&mut temperature, &mut humidity, reading)
            .unwrap();

        assert_eq!(
            temperature.calls,
            vec![
                Call::BeginTransition,
                Call::DashOffset(60.0),
                Call::Stroke(STROKE_MILD),
                Call::Label("20 °C".to_string()),
            ]
        );
        assert_eq!(
            humidity.calls,
            vec![
                Call::BeginTransition,
                Call::DashOffset(55.0),
                Call::Stroke(STROKE_HUMIDITY),
                Call::Label("45 %".to_string()),
            ]
        );
    }

    #[test]
    fn clamps_an_over_scale_reading() {
        let mut temperature = FakeSurface::with_length(100.0);
        let mut humidity = FakeSurface::with_length(100.0);
        let reading = Reading {
            temperature: 60.0,
            humidity: 100.0,
        };

        DisplayUpdater::new()
            .update(&mut temperature, &mut humidity, reading)
            .unwrap();

        assert!(temperature.calls.contains(&Call::DashOffset(0.0)));
        assert!(temperature.calls.contains(&Call::Stroke(STROKE_HOT)));
        assert!(humidity.calls.contains(&Call::DashOffset(0.0)));
        assert!(humidity.calls.contains(&Call::Stroke(STROKE_HUMIDITY)));
    }

    #[test]
    fn unusable_surface_fails_without_touching_the_other_gauge() {
        let mut temperature = FakeSurface::with_length(0.0);
        let mut humidity = FakeSurface::with_length(100.0);
        let reading = Reading {
            temperature: 20.0,
            humidity: 45.0,
        };

        let err = DisplayUpdater::new()
            .update(&mut temperature, &mut humidity, reading)
            .unwrap_err();

        assert!(matches!(
            err,
            RenderError::Surface {
                gauge: "temperature",
                ..
            }
        ));
        assert!(temperature.calls.is_empty());
        assert!(humidity.calls.is_empty());
    }
}
