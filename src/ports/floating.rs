//! # Floating Port
//!
//! A panel that floats over the current surface. The panel attaches on the
//! first presentation and then just swaps its content. `dismiss` empties the
//! panel but leaves it attached; `dismiss_entire_surface` detaches it.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::core::router::{Completion, PresentationPort};
use crate::core::view::{ViewRef, same_view};

#[derive(Default)]
pub struct FloatingPort {
    attached: Cell<bool>,
    content: RefCell<Option<ViewRef>>,
}

impl FloatingPort {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn is_attached(&self) -> bool {
        self.attached.get()
    }

    pub fn content(&self) -> Option<ViewRef> {
        self.content.borrow().clone()
    }
}

impl PresentationPort for FloatingPort {
    fn present(&self, view: ViewRef, animated: bool) {
        if !self.attached.replace(true) {
            debug!("Floating: panel attached (animated: {})", animated);
        }
        debug!("Floating: content set to {}", view.name());
        let previous = self.content.borrow_mut().replace(view);
        drop(previous);
    }

    fn dismiss(&self, _animated: bool, on_complete: Option<Completion>) {
        let previous = self.content.borrow_mut().take();
        drop(previous);
        if let Some(done) = on_complete {
            done();
        }
    }

    fn dismiss_view(&self, view: &ViewRef, animated: bool, on_complete: Option<Completion>) {
        let shown = self.content.borrow().as_ref().is_some_and(|content| same_view(content, view));
        if shown {
            self.dismiss(animated, on_complete);
            return;
        }
        debug!("Floating: {} is not the content, dismiss ignored", view.name());
        if let Some(done) = on_complete {
            done();
        }
    }

    fn dismiss_entire_surface(&self, animated: bool, on_complete: Option<Completion>) {
        let previous = self.content.borrow_mut().take();
        drop(previous);
        if self.attached.replace(false) {
            debug!("Floating: panel detached (animated: {})", animated);
        }
        if let Some(done) = on_complete {
            done();
        }
    }
}

impl fmt::Debug for FloatingPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FloatingPort")
            .field("attached", &self.attached.get())
            .field("content", &self.content.borrow().as_ref().map(|v| v.name().to_string()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestView;

    #[test]
    fn test_attach_once_then_swap_content() {
        let panel = FloatingPort::new();
        panel.present(TestView::named("header"), true);
        panel.present(TestView::named("body"), true);

        assert!(panel.is_attached());
        assert_eq!(panel.content().unwrap().name(), "body");
    }

    #[test]
    fn test_dismiss_keeps_panel_attached() {
        let panel = FloatingPort::new();
        panel.present(TestView::named("body"), false);
        panel.dismiss(false, None);
        assert!(panel.is_attached());
        assert!(panel.content().is_none());

        panel.dismiss_entire_surface(false, None);
        assert!(!panel.is_attached());
    }
}
