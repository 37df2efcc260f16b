use std::rc::Rc;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Stylize},
    widgets::{Paragraph, Widget},
};

use crate::app::App;
use crate::log_widget::LogListWidget;

impl Widget for &App {
    /// Renders the user interface: the two gauges side by side over a
    /// status line, with the log panel in the bottom third when enabled.
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = if self.log_state.enabled {
            Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(3), Constraint::Percentage(33)])
                .split(area)
        } else {
            Rc::from([area])
        };

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(chunks[0]);

        let gauge_row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(main_chunks[0]);

        self.temperature_gauge.render(gauge_row[0], buf);
        self.humidity_gauge.render(gauge_row[1], buf);

        let status = if let Some(reading) = self.last_reading {
            format!(
                "last reading: {} °C / {} %",
                reading.temperature, reading.humidity
            )
        } else {
            String::from("waiting for data...")
        };
        Paragraph::new(status)
            .fg(Color::DarkGray)
            .centered()
            .render(main_chunks[1], buf);

        if self.log_state.enabled && chunks.len() > 1 {
            let lines = self.log_state.buffer.lines();
            let log_widget = LogListWidget::new(&lines, "Logs", self.log_state.scroll);
            log_widget.render(chunks[1], buf);
        }
    }
}
