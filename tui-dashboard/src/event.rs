use std::time::Duration;

use ambient_core::Reading;
use color_eyre::eyre::OptionExt;
use futures::{FutureExt, StreamExt};
use tokio::sync::mpsc;

/// Frame rate of the terminal tick, which also drives the gauge sweep
/// animation.
const TICK_FPS: f64 = 30.0;

#[derive(Clone, Debug)]
pub enum Event {
    /// Periodic terminal tick.
    Tick,
    /// Crossterm terminal event (key press, resize, ...).
    Crossterm(crossterm::event::Event),
    /// Application event.
    App(AppEvent),
}

#[derive(Clone, Debug)]
pub enum AppEvent {
    /// A validated reading arrived from the poller.
    Reading(Reading),
    /// Toggle the log panel.
    ToggleLogs,
    /// Quit the application.
    Quit,
}

/// Terminal event handler.
///
/// Fans terminal ticks, crossterm events and application events into one
/// channel. Background tasks publish through a cloned [`sender`].
///
/// [`sender`]: Self::sender
#[derive(Debug)]
pub struct EventHandler {
    sender: mpsc::UnboundedSender<Event>,
    receiver: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Constructs a new instance and spawns the event pump task.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let pump = EventPump::new(sender.clone());
        tokio::spawn(async { pump.run().await });
        Self { sender, receiver }
    }

    /// Receives the next event, waiting until one is available.
    pub async fn next(&mut self) -> color_eyre::Result<Event> {
        self.receiver
            .recv()
            .await
            .ok_or_eyre("failed to receive event")
    }

    /// Queues an application event from the UI loop itself.
    pub fn send(&mut self, app_event: AppEvent) {
        let _ = self.sender.send(Event::App(app_event));
    }

    /// Sender handle for tasks that publish events from outside the UI
    /// loop, e.g. the poller.
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.sender.clone()
    }
}

struct EventPump {
    sender: mpsc::UnboundedSender<Event>,
}

impl EventPump {
    fn new(sender: mpsc::UnboundedSender<Event>) -> Self {
        Self { sender }
    }

    async fn run(self) {
        let mut reader = crossterm::event::EventStream::new();
        let mut tick = tokio::time::interval(Duration::from_secs_f64(1.0 / TICK_FPS));
        loop {
            let tick_delay = tick.tick();
            let crossterm_event = reader.next().fuse();
            tokio::select! {
                // Receiver dropped, the application is shutting down.
                _ = self.sender.closed() => break,
                _ = tick_delay => self.send(Event::Tick),
                Some(Ok(evt)) = crossterm_event => self.send(Event::Crossterm(evt)),
            }
        }
    }

    fn send(&self, event: Event) {
        let _ = self.sender.send(event);
    }
}
