//! # TitleBar Component
//!
//! Top status bar: the latest status message and the latest event the flow
//! observer saw anywhere in the coordinator graph.
//!
//! ## Conditional Formatting
//!
//! 1. **Status and event**: `"Flowpilot | Answer: yes | Confirm dismissed by user"`
//! 2. **Only one of them**: `"Flowpilot | Answer: yes"`
//! 3. **Default**: `"Flowpilot"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

/// Top status bar component.
pub struct TitleBar {
    /// Status message (e.g., "Answer: yes")
    pub status_message: String,
    /// Display form of the last flow event, if any
    pub last_event: Option<String>,
}

impl TitleBar {
    pub fn new(status_message: String, last_event: Option<String>) -> Self {
        Self {
            status_message,
            last_event,
        }
    }

    fn text(&self) -> String {
        let mut parts = vec!["Flowpilot".to_string()];
        if !self.status_message.is_empty() {
            parts.push(self.status_message.clone());
        }
        if let Some(event) = &self.last_event {
            parts.push(event.clone());
        }
        parts.join(" | ")
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Span::raw(self.text()), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
            })
            .unwrap();

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_title_bar_with_status_and_event() {
        let mut title_bar = TitleBar::new(
            "Answer: yes".to_string(),
            Some("Confirm dismissed by user".to_string()),
        );
        let text = rendered(&mut title_bar);

        assert!(text.contains("Flowpilot | Answer: yes | Confirm dismissed by user"));
    }

    #[test]
    fn test_title_bar_event_only() {
        let mut title_bar = TitleBar::new(String::new(), Some("First registered".to_string()));
        let text = rendered(&mut title_bar);

        assert!(text.contains("Flowpilot | First registered"));
    }

    #[test]
    fn test_title_bar_default_no_status() {
        let mut title_bar = TitleBar::new(String::new(), None);
        let text = rendered(&mut title_bar);

        assert!(text.contains("Flowpilot"));
        assert!(!text.contains('|'));
    }
}
