//! Terminal arc gauge: the concrete [`GaugeSurface`] the display updater
//! writes to, plus its ratatui widget.

use std::cell::Cell;
use std::f64::consts::PI;

use ambient_core::{GaugeSurface, Stroke};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Style},
    symbols,
    text::Line,
    widgets::{
        Block, BorderType, Widget,
        canvas::{Canvas, Context, Line as CanvasLine},
    },
};

/// Arc sweep of the track, in radians: 270° with the gap at the bottom.
const SWEEP: f64 = 1.5 * PI;
/// The arc starts at the bottom-left end of the gap and fills clockwise.
const START_ANGLE: f64 = 1.25 * PI;
/// Canvas-space radius of the track.
const RADIUS: f64 = 80.0;
/// Per-frame catch-up factor of the sweep animation.
const SWEEP_STEP: f64 = 0.2;

const TRACK_COLOR: Color = Color::DarkGray;

/// One gauge on the terminal.
///
/// The updater drives it through [`GaugeSurface`]; the widget render reads
/// the shown offset, which chases the target offset one animation step per
/// frame so updates sweep instead of snapping.
#[derive(Debug)]
pub struct TuiGauge {
    title: &'static str,
    /// Track length measured at the last render. Written from the render
    /// path, which only has a shared borrow.
    measured_length: Cell<f64>,
    target_offset: f64,
    shown_offset: f64,
    stroke: Stroke,
    label: String,
}

impl TuiGauge {
    pub fn new(title: &'static str) -> Self {
        let initial_length = SWEEP * RADIUS;
        Self {
            title,
            measured_length: Cell::new(initial_length),
            // Full offset: the gauge starts empty until a reading arrives.
            target_offset: initial_length,
            shown_offset: initial_length,
            stroke: Stroke::rgb(0x80, 0x80, 0x80),
            label: String::from("--"),
        }
    }

    /// Moves the rendered arc one step toward its target offset. Called
    /// from the UI tick at the frame rate.
    pub fn animate(&mut self) {
        let delta = self.target_offset - self.shown_offset;
        if delta.abs() < 0.5 {
            self.shown_offset = self.target_offset;
        } else {
            self.shown_offset += delta * SWEEP_STEP;
        }
    }

    /// Fraction of the track currently drawn.
    fn shown_fraction(&self) -> f64 {
        let length = self.measured_length.get();
        if length <= 0.0 {
            return 0.0;
        }
        (1.0 - self.shown_offset / length).clamp(0.0, 1.0)
    }
}

impl GaugeSurface for TuiGauge {
    fn path_length(&self) -> f64 {
        self.measured_length.get()
    }

    fn begin_transition(&mut self) {
        // Re-anchor the in-flight sweep to the current track geometry so
        // the coming offset change animates from what is on screen now.
        let length = self.measured_length.get();
        self.shown_offset = self.shown_offset.clamp(0.0, length);
    }

    fn set_dash_offset(&mut self, offset: f64) {
        self.target_offset = offset;
    }

    fn set_stroke(&mut self, stroke: Stroke) {
        self.stroke = stroke;
    }

    fn set_label(&mut self, text: &str) {
        self.label = text.to_string();
    }
}

impl Widget for &TuiGauge {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(self.title)
            .title_alignment(Alignment::Center)
            .border_type(BorderType::Rounded);

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < 8 || inner.height < 4 {
            return;
        }

        // The track length follows the rendered area; offsets computed
        // against it stay proportional across resizes.
        let radius_cells = f64::from(inner.width.min(inner.height * 2)) / 2.0;
        self.measured_length.set(SWEEP * radius_cells);

        let fraction = self.shown_fraction();
        let color = Color::Rgb(self.stroke.r, self.stroke.g, self.stroke.b);
        let label = self.label.clone();
        let cell_width = 200.0 / f64::from(inner.width);

        let canvas = Canvas::default()
            .x_bounds([-100.0, 100.0])
            .y_bounds([-100.0, 100.0])
            .marker(symbols::Marker::Braille)
            .paint(move |ctx| {
                draw_arc(ctx, 1.0, TRACK_COLOR);
                draw_arc(ctx, fraction, color);
                let x = -(label.chars().count() as f64) * cell_width / 2.0;
                ctx.print(x, -20.0, Line::styled(label.clone(), Style::default().fg(color)));
            });
        canvas.render(inner, buf);
    }
}

/// Draws `fraction` of the arc track as short chords, clockwise from the
/// start angle.
fn draw_arc(ctx: &mut Context, fraction: f64, color: Color) {
    if fraction <= 0.0 {
        return;
    }
    let steps = ((120.0 * fraction).ceil() as usize).max(1);
    let mut previous = arc_point(START_ANGLE);
    for i in 1..=steps {
        let t = fraction * i as f64 / steps as f64;
        let next = arc_point(START_ANGLE - t * SWEEP);
        ctx.draw(&CanvasLine {
            x1: previous.0,
            y1: previous.1,
            x2: next.0,
            y2: next.1,
            color,
        });
        previous = next;
    }
}

fn arc_point(angle: f64) -> (f64, f64) {
    (RADIUS * angle.cos(), RADIUS * angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty_with_a_placeholder_label() {
        let gauge = TuiGauge::new("Temperature");
        assert_eq!(gauge.shown_fraction(), 0.0);
        assert_eq!(gauge.label, "--");
    }

    #[test]
    fn animation_converges_on_the_target_offset() {
        let mut gauge = TuiGauge::new("Temperature");
        gauge.begin_transition();
        gauge.set_dash_offset(0.0);
        for _ in 0..200 {
            gauge.animate();
        }
        assert_eq!(gauge.shown_offset, 0.0);
        assert_eq!(gauge.shown_fraction(), 1.0);
    }

    #[test]
    fn render_measures_the_track_from_the_area() {
        let gauge = TuiGauge::new("Humidity");
        let area = Rect::new(0, 0, 40, 20);
        let mut buf = Buffer::empty(area);
        (&gauge).render(area, &mut buf);

        let length = gauge.path_length();
        assert!(length.is_finite() && length > 0.0);

        // A taller and wider area yields a longer track.
        let bigger = Rect::new(0, 0, 80, 40);
        let mut buf = Buffer::empty(bigger);
        (&gauge).render(bigger, &mut buf);
        assert!(gauge.path_length() > length);
    }
}
