//! # Window Port
//!
//! A single root slot. Presenting replaces whatever was there; the old root
//! is simply released, so the coordinators riding on it finalize.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::core::router::{Completion, PresentationPort};
use crate::core::view::{ViewRef, same_view};

#[derive(Default)]
pub struct WindowPort {
    root: RefCell<Option<ViewRef>>,
}

impl WindowPort {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn root(&self) -> Option<ViewRef> {
        self.root.borrow().clone()
    }

    pub fn has_root(&self) -> bool {
        self.root.borrow().is_some()
    }

    fn release(&self, on_complete: Option<Completion>) {
        let released = self.root.borrow_mut().take();
        if let Some(view) = &released {
            debug!("Window: root {} released", view.name());
        }
        drop(released);
        if let Some(done) = on_complete {
            done();
        }
    }
}

impl PresentationPort for WindowPort {
    fn present(&self, view: ViewRef, animated: bool) {
        debug!("Window: root set to {} (animated: {})", view.name(), animated);
        let previous = self.root.borrow_mut().replace(view);
        drop(previous);
    }

    fn dismiss(&self, _animated: bool, on_complete: Option<Completion>) {
        self.release(on_complete);
    }

    fn dismiss_view(&self, view: &ViewRef, _animated: bool, on_complete: Option<Completion>) {
        let shown = self.root.borrow().as_ref().is_some_and(|root| same_view(root, view));
        if shown {
            self.release(on_complete);
            return;
        }
        debug!("Window: {} is not the root, dismiss ignored", view.name());
        if let Some(done) = on_complete {
            done();
        }
    }

    fn dismiss_entire_surface(&self, _animated: bool, on_complete: Option<Completion>) {
        self.release(on_complete);
    }
}

impl fmt::Debug for WindowPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowPort")
            .field("root", &self.root.borrow().as_ref().map(|v| v.name().to_string()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestView;

    #[test]
    fn test_present_replaces_root() {
        let window = WindowPort::new();
        let first = TestView::named("first");
        let weak = Rc::downgrade(&first);
        window.present(first, false);
        window.present(TestView::named("second"), true);

        assert_eq!(window.root().unwrap().name(), "second");
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_dismiss_clears_root() {
        let window = WindowPort::new();
        window.present(TestView::named("only"), false);
        window.dismiss(false, None);
        assert!(!window.has_root());
    }
}
