use crate::tui::component::Component;
use crate::tui::components::{OverlayLayer, ScreenView, TitleBar};
use crate::tui::flows::Shell;
use crate::tui::screen::{trail, visible_screen};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Paragraph};

pub fn draw_ui(frame: &mut Frame, shell: &Shell) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, footer_area] = layout.areas(frame.area());

    TitleBar::new(shell.status(), shell.observer.last().map(|e| e.to_string()))
        .render(frame, title_area);

    draw_main_surface(frame, main_area, shell);

    // The overlay covers the main surface only
    if let Some(layer) = shell.overlay.top()
        && let Some(screen) = visible_screen(&layer)
    {
        OverlayLayer::new(&screen, trail(&layer)).render(frame, main_area);
    }

    frame.render_widget(Span::styled(footer_text(shell), Style::default().fg(Color::DarkGray)), footer_area);
}

fn draw_main_surface(frame: &mut Frame, area: Rect, shell: &Shell) {
    let Some(root) = shell.window.root() else {
        draw_empty_view(frame, area);
        return;
    };
    match visible_screen(&root) {
        Some(screen) => ScreenView::new(&screen, trail(&root)).render(frame, area),
        None => draw_empty_view(frame, area),
    }
}

fn draw_empty_view(frame: &mut Frame, area: Rect) {
    let empty = Paragraph::new("Nothing presented.")
        .block(Block::bordered())
        .alignment(Alignment::Center);
    frame.render_widget(empty, area);
}

fn footer_text(shell: &Shell) -> String {
    let motion = if shell.motion.allows_animation() { "on" } else { "off" };
    format!(" Esc back  q quit  | animations: {} ", motion)
}
