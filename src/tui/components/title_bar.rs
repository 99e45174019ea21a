//! # TitleBar Component
//!
//! Top status bar: where you are, and what the app is doing.
//!
//! Stateless: all three fields are props supplied by the navigation loop
//! every frame.
//!
//! 1. **Loading**: `"GitHub Issues | rust-lang › Repositories | Loading..."`
//! 2. **Status message**: `"GitHub Issues | rust-lang › Repositories | 12 items"`
//! 3. **Default**: `"GitHub Issues | rust-lang › Repositories"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    pub breadcrumb: String,
    pub status_message: String,
    pub is_loading: bool,
}

impl TitleBar {
    pub fn new(breadcrumb: String, status_message: String, is_loading: bool) -> Self {
        Self {
            breadcrumb,
            status_message,
            is_loading,
        }
    }

    fn text(&self) -> String {
        let mut text = "GitHub Issues".to_string();
        if !self.breadcrumb.is_empty() {
            text.push_str(" | ");
            text.push_str(&self.breadcrumb);
        }
        if self.is_loading {
            text.push_str(" | Loading...");
        } else if !self.status_message.is_empty() {
            text.push_str(" | ");
            text.push_str(&self.status_message);
        }
        text
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = if self.is_loading {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        frame.render_widget(Line::from(Span::styled(self.text(), style)), area);
    }
}
