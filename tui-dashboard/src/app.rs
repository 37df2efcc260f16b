use std::time::Duration;

use ambient_core::{DisplayUpdater, Reading};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::DefaultTerminal;
use tracing::error;

use crate::event::{AppEvent, Event, EventHandler};
use crate::gauge_widget::TuiGauge;
use crate::log_widget::LogState;
use crate::poller::{Poller, PollerHandle};

/// Application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    pub running: bool,
    /// Event handler.
    pub events: EventHandler,
    /// Log panel state.
    pub log_state: LogState,

    pub temperature_gauge: TuiGauge,
    pub humidity_gauge: TuiGauge,
    pub last_reading: Option<Reading>,

    updater: DisplayUpdater,
    poller: PollerHandle,
}

impl App {
    /// Constructs a new instance of [`App`] and starts the poll loop.
    pub fn new(url: String, interval: Duration, log_state: LogState) -> Self {
        let events = EventHandler::new();
        let poller = Poller::new(url, interval, events.sender()).spawn();
        Self {
            running: true,
            events,
            log_state,
            temperature_gauge: TuiGauge::new("Temperature"),
            humidity_gauge: TuiGauge::new("Humidity"),
            last_reading: None,
            updater: DisplayUpdater::new(),
            poller,
        }
    }

    /// Run the application's main loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        while self.running {
            terminal.draw(|frame| frame.render_widget(&self, frame.area()))?;
            match self.events.next().await? {
                Event::Tick => self.tick(),
                Event::Crossterm(event) => match event {
                    crossterm::event::Event::Key(key_event)
                        if key_event.kind == crossterm::event::KeyEventKind::Press =>
                    {
                        self.handle_key_events(key_event)?
                    }
                    _ => {}
                },
                Event::App(app_event) => match app_event {
                    AppEvent::Reading(reading) => self.apply_reading(reading),
                    AppEvent::ToggleLogs => self.log_state.toggle(),
                    AppEvent::Quit => self.quit(),
                },
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    pub fn handle_key_events(&mut self, key_event: KeyEvent) -> color_eyre::Result<()> {
        match key_event.code {
            KeyCode::Esc | KeyCode::Char('q') => self.events.send(AppEvent::Quit),
            KeyCode::Char('c' | 'C') if key_event.modifiers == KeyModifiers::CONTROL => {
                self.events.send(AppEvent::Quit)
            }
            KeyCode::Char('L') if key_event.modifiers == KeyModifiers::SHIFT => {
                self.events.send(AppEvent::ToggleLogs)
            }
            KeyCode::Up => self.log_state.scroll_up(1),
            KeyCode::Down => self.log_state.scroll_down(1),
            KeyCode::PageUp => self.log_state.scroll_up(10),
            KeyCode::PageDown => self.log_state.scroll_down(10),
            _ => {}
        }
        Ok(())
    }

    /// Handles the tick event of the terminal: advances the gauge sweep
    /// animations one frame.
    pub fn tick(&mut self) {
        self.temperature_gauge.animate();
        self.humidity_gauge.animate();
    }

    /// Writes a freshly polled reading onto both gauges. A render failure
    /// loses this update only; the loop keeps running.
    fn apply_reading(&mut self, reading: Reading) {
        self.last_reading = Some(reading);
        if let Err(err) =
            self.updater
                .update(&mut self.temperature_gauge, &mut self.humidity_gauge, reading)
        {
            error!(%err, "display update failed");
        }
    }

    /// Set running to false to quit the application.
    pub fn quit(&mut self) {
        self.poller.stop();
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log_widget::{LogBuffer, LogState};
    use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

    fn test_app() -> App {
        App::new(
            String::from("http://127.0.0.1:1/data"),
            Duration::from_secs(3600),
            LogState::new(LogBuffer::new(), false),
        )
    }

    fn rendered_text(app: &App) -> String {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        app.render(area, &mut buf);
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[tokio::test]
    async fn status_line_shows_the_last_reading() {
        let mut app = test_app();
        assert!(rendered_text(&app).contains("waiting for data..."));

        app.apply_reading(Reading {
            temperature: 20.0,
            humidity: 45.0,
        });
        assert!(rendered_text(&app).contains("last reading: 20 °C / 45 %"));
    }
}
