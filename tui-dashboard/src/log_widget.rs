use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, BorderType, List, ListItem, Widget},
};
use tracing::Level;

const LOG_CAPACITY: usize = 1000;

/// One formatted log event, kept with its level so the panel can style it.
#[derive(Debug, Clone)]
pub struct LogLine {
    pub level: Level,
    pub text: String,
}

/// Shared ring of recent log events: the tracing layer pushes into it,
/// the log panel reads from it.
#[derive(Debug, Clone, Default)]
pub struct LogBuffer {
    lines: Arc<Mutex<VecDeque<LogLine>>>,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self {
            lines: Arc::new(Mutex::new(VecDeque::with_capacity(LOG_CAPACITY))),
        }
    }

    pub fn push(&self, level: Level, text: String) {
        if let Ok(mut lines) = self.lines.lock() {
            if lines.len() >= LOG_CAPACITY {
                lines.pop_front();
            }
            lines.push_back(LogLine { level, text });
        }
    }

    pub fn lines(&self) -> MutexGuard<'_, VecDeque<LogLine>> {
        self.lines.lock().unwrap()
    }
}

#[derive(Debug, Clone)]
pub struct LogState {
    pub buffer: LogBuffer,
    pub enabled: bool,
    pub scroll: u16,
}

impl LogState {
    pub fn new(buffer: LogBuffer, enabled: bool) -> Self {
        Self {
            buffer,
            enabled,
            scroll: 0,
        }
    }

    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    pub fn scroll_up(&mut self, amount: u16) {
        self.scroll = self.scroll.saturating_add(amount);
    }

    pub fn scroll_down(&mut self, amount: u16) {
        self.scroll = self.scroll.saturating_sub(amount);
    }
}

pub struct LogListWidget<'a> {
    lines: &'a VecDeque<LogLine>,
    title: String,
    scroll_offset: u16,
}

impl<'a> LogListWidget<'a> {
    pub fn new(lines: &'a VecDeque<LogLine>, title: &str, scroll_offset: u16) -> Self {
        Self {
            lines,
            title: title.to_string(),
            scroll_offset,
        }
    }
}

fn level_style(level: Level) -> Style {
    let color = if level == Level::ERROR {
        Color::Red
    } else if level == Level::WARN {
        Color::Yellow
    } else if level == Level::DEBUG {
        Color::Green
    } else if level == Level::TRACE {
        Color::DarkGray
    } else {
        Color::White
    };
    Style::default().fg(color)
}

impl Widget for &LogListWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 10 || area.height < 3 {
            return;
        }

        let block = Block::bordered()
            .title(self.title.as_str())
            .border_type(BorderType::Rounded);

        let inner_area = block.inner(area);
        block.render(area, buf);

        let total = self.lines.len();
        let visible_height = inner_area.height as usize;

        let max_scroll = total.saturating_sub(visible_height);
        let scroll = std::cmp::min(self.scroll_offset as usize, max_scroll);

        let items: Vec<ListItem> = self
            .lines
            .iter()
            .skip(scroll)
            .take(visible_height)
            .map(|line| ListItem::new(line.text.as_str()).style(level_style(line.level)))
            .collect();

        if !items.is_empty() {
            let list = List::new(items).block(Block::new()).style(Style::default());
            list.render(inner_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_drops_oldest_lines_at_capacity() {
        let buffer = LogBuffer::new();
        for i in 0..LOG_CAPACITY + 5 {
            buffer.push(Level::INFO, format!("line {i}"));
        }
        let lines = buffer.lines();
        assert_eq!(lines.len(), LOG_CAPACITY);
        assert_eq!(lines.front().unwrap().text, "line 5");
    }

    #[test]
    fn scroll_saturates_at_zero() {
        let mut state = LogState::new(LogBuffer::new(), true);
        state.scroll_down(3);
        assert_eq!(state.scroll, 0);
        state.scroll_up(2);
        state.scroll_down(1);
        assert_eq!(state.scroll, 1);
    }
}
