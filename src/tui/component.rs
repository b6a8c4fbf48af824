use ratatui::Frame;
use ratatui::layout::Rect;

/// A reusable UI component.
///
/// Components receive their data as props (struct fields) and render to a
/// `Frame` within a given `Rect`. They never reach into the coordinator graph
/// themselves.
pub trait Component {
    /// Render the component into the given area.
    ///
    /// Takes `&mut self` so a component may cache layout between frames.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}
