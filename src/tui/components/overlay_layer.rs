//! # OverlayLayer Component
//!
//! Draws the top overlay layer as a centered popup over the main surface.

use crate::tui::component::Component;
use crate::tui::components::ScreenView;
use crate::tui::screen::Screen;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Color;
use ratatui::widgets::Clear;

pub struct OverlayLayer<'a> {
    pub screen: &'a Screen,
    pub trail: Vec<String>,
}

impl<'a> OverlayLayer<'a> {
    pub fn new(screen: &'a Screen, trail: Vec<String>) -> Self {
        Self { screen, trail }
    }
}

impl Component for OverlayLayer<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let popup = centered_rect(70, 60, area);

        // Clear underlying content
        frame.render_widget(Clear, popup);

        ScreenView::new(self.screen, self.trail.clone())
            .border_color(Color::Cyan)
            .render(frame, popup);
    }
}

/// Compute a centered rect using percentage of the outer rect.
pub fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
