//! # TUI Components
//!
//! Stateless, props-based components. Each receives everything it draws as
//! struct fields and renders into the area it is given:
//!
//! - `TitleBar`: status message and the latest flow event
//! - `ScreenView`: one screen with its trail, text and key actions
//! - `OverlayLayer`: a `ScreenView` in a cleared, centered popup
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status bar)
//! ├── screen_view.rs   (A screen inside a bordered block)
//! └── overlay_layer.rs (Centered popup for the overlay port)
//! ```

mod overlay_layer;
mod screen_view;
mod title_bar;

pub use overlay_layer::OverlayLayer;
pub use screen_view::ScreenView;
pub use title_bar::TitleBar;
