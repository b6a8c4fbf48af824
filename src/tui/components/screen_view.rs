//! # ScreenView Component
//!
//! Renders one [`Screen`]: its text, then its actions as `[key] label` rows.
//! The block title carries the trail of the container the screen sits in,
//! e.g. `main › Root › First #1`.

use crate::tui::component::Component;
use crate::tui::screen::Screen;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

pub struct ScreenView<'a> {
    pub screen: &'a Screen,
    pub trail: Vec<String>,
    pub border_color: Color,
}

impl<'a> ScreenView<'a> {
    pub fn new(screen: &'a Screen, trail: Vec<String>) -> Self {
        Self {
            screen,
            trail,
            border_color: Color::DarkGray,
        }
    }

    pub fn border_color(mut self, color: Color) -> Self {
        self.border_color = color;
        self
    }

    fn title(&self) -> String {
        if self.trail.is_empty() {
            format!(" {} ", self.screen.title())
        } else {
            format!(" {} ", self.trail.join(" › "))
        }
    }

    fn body(&self) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = self
            .screen
            .lines()
            .into_iter()
            .map(Line::from)
            .collect();
        if !self.screen.actions().is_empty() {
            lines.push(Line::default());
        }
        let key_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        for action in self.screen.actions() {
            lines.push(Line::from(vec![
                Span::styled(format!("[{}]", action.key), key_style),
                Span::raw(format!(" {}", action.label)),
            ]));
        }
        lines
    }
}

impl Component for ScreenView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.border_color))
            .title(self.title())
            .padding(Padding::horizontal(1));

        let paragraph = Paragraph::new(self.body())
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_screen_view_renders_lines_actions_and_trail() {
        let screen = Screen::builder("First #1")
            .line("Counter: 1")
            .action('d', "Dismiss", || {})
            .build();
        let mut view = ScreenView::new(&screen, vec!["Root".into(), "First #1".into()]);

        let backend = TestBackend::new(60, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| view.render(f, f.area())).unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("Root › First #1"));
        assert!(text.contains("Counter: 1"));
        assert!(text.contains("[d] Dismiss"));
    }

    #[test]
    fn test_title_falls_back_to_screen_title() {
        let screen = Screen::builder("Alone").build();
        let view = ScreenView::new(&screen, Vec::new());
        assert_eq!(view.title(), " Alone ");
    }
}
