//! # Reference Ports
//!
//! In-memory presentation ports: platform-neutral state machines that a
//! renderer can draw from. Each one shows and hides view handles on one kind
//! of surface and reports out-of-band removals to the removed handle.
//!
//! ```text
//!   NavigationStack   push / pop / clear           (also a view handle)
//!   OverlayPort       modal layers                 (user_dismiss = swipe-down)
//!   WindowPort        single root slot
//!   FloatingPort      attachable panel
//!   PresentationDualityAdapter<Outer>
//!                     NavigationStack shown through an OverlayPort or WindowPort
//! ```

pub mod duality;
pub mod floating;
pub mod overlay;
pub mod stack;
pub mod window;

pub use duality::{ModalNavigation, PresentationDualityAdapter, SurfaceAction, WindowNavigation};
pub use floating::FloatingPort;
pub use overlay::OverlayPort;
pub use stack::{NavigationStack, PopAction};
pub use window::WindowPort;
