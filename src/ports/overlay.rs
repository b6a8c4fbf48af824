//! # Overlay Port
//!
//! Modal layers stacked over whatever is underneath. `present` adds a layer,
//! `dismiss` removes the top one, `dismiss_entire_surface` removes them all.
//!
//! [`OverlayPort::user_dismiss`] models a swipe-down: the top layer is removed
//! and it (with everything nested in it) is told the port removed it. The
//! optional `on_dismiss` hook fires for user dismissals only.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::core::router::{Completion, PresentationPort};
use crate::core::view::{ViewRef, notify_tree_dismissed_by_port, same_view};

type DismissHook = Box<dyn Fn(&ViewRef)>;

#[derive(Default)]
pub struct OverlayPort {
    layers: RefCell<Vec<ViewRef>>,
    on_dismiss: RefCell<Option<DismissHook>>,
}

impl OverlayPort {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Called with the removed layer after a user dismissal.
    pub fn set_on_dismiss(&self, hook: impl Fn(&ViewRef) + 'static) {
        *self.on_dismiss.borrow_mut() = Some(Box::new(hook));
    }

    /// Swipe-down on the top layer. Returns `false` if nothing is shown.
    pub fn user_dismiss(&self) -> bool {
        let Some(layer) = self.layers.borrow_mut().pop() else {
            return false;
        };
        debug!("Overlay: user dismissed {}", layer.name());
        notify_tree_dismissed_by_port(&layer);
        if let Some(hook) = self.on_dismiss.borrow().as_ref() {
            hook(&layer);
        }
        true
    }

    pub fn is_presenting(&self) -> bool {
        !self.layers.borrow().is_empty()
    }

    pub fn len(&self) -> usize {
        self.layers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.borrow().is_empty()
    }

    pub fn top(&self) -> Option<ViewRef> {
        self.layers.borrow().last().cloned()
    }

    pub fn layers(&self) -> Vec<ViewRef> {
        self.layers.borrow().clone()
    }
}

impl PresentationPort for OverlayPort {
    fn present(&self, view: ViewRef, animated: bool) {
        debug!("Overlay: present {} (animated: {})", view.name(), animated);
        self.layers.borrow_mut().push(view);
    }

    fn dismiss(&self, animated: bool, on_complete: Option<Completion>) {
        let removed = self.layers.borrow_mut().pop();
        if let Some(layer) = &removed {
            debug!("Overlay: dismiss {} (animated: {})", layer.name(), animated);
        }
        drop(removed);
        if let Some(done) = on_complete {
            done();
        }
    }

    /// Removes `view`'s layer and every layer stacked over it.
    fn dismiss_view(&self, view: &ViewRef, animated: bool, on_complete: Option<Completion>) {
        let removed = {
            let mut layers = self.layers.borrow_mut();
            match layers.iter().position(|layer| same_view(layer, view)) {
                Some(index) => layers.split_off(index),
                None => Vec::new(),
            }
        };
        if removed.is_empty() {
            debug!("Overlay: {} is not shown, dismiss ignored", view.name());
        } else {
            debug!("Overlay: dismiss {} and {} above (animated: {})", view.name(), removed.len() - 1, animated);
        }
        drop(removed);
        if let Some(done) = on_complete {
            done();
        }
    }

    fn dismiss_entire_surface(&self, animated: bool, on_complete: Option<Completion>) {
        let removed = std::mem::take(&mut *self.layers.borrow_mut());
        debug!("Overlay: dismiss all {} layer(s) (animated: {})", removed.len(), animated);
        drop(removed);
        if let Some(done) = on_complete {
            done();
        }
    }
}

impl fmt::Debug for OverlayPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayPort")
            .field("layers", &self.layers.borrow().len())
            .finish()
    }
}
