//! # View Handles
//!
//! The contract a UI unit must satisfy to be driven by coordinators. The core
//! never renders anything; it only needs:
//!
//! - **Identity**: handles are compared with `Rc::ptr_eq` (see [`same_view`]).
//! - **Ownership**: a handle keeps its coordinator alive. The coordinator only
//!   holds a `Weak` back to the handle, so the coordinator lives exactly as
//!   long as the view it backs.
//! - **Out-of-band dismissal**: when a port removes a handle on its own (back
//!   gesture, swipe-down), it calls [`ViewBinding::notify_dismissed_by_port`]
//!   so the backing coordinator can update its bookkeeping.
//!
//! ```text
//!  port stack ──Rc──▶ ViewHandle ──Rc (binding)──▶ Coordinator
//!                         ▲                            │
//!                         └──────────Weak (anchor)─────┘
//! ```
//!
//! Implementors embed a [`ViewBinding`] and hand it out from
//! [`ViewHandle::binding`].

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::core::coordinator::AsAnyRc;

/// Shared, identity-comparable handle to a view.
pub type ViewRef = Rc<dyn ViewHandle>;

/// An opaque UI unit a coordinator can present.
pub trait ViewHandle: AsAnyRc + 'static {
    /// Ownership and dismissal plumbing for this view.
    fn binding(&self) -> &ViewBinding;

    /// Short name used in log lines.
    fn name(&self) -> &str {
        "view"
    }

    /// Handles displayed *inside* this one (a stack container's entries).
    /// Ports notify these too when the outer handle is dismissed out-of-band.
    fn nested(&self) -> Vec<ViewRef> {
        Vec::new()
    }
}

/// Identity comparison for view handles.
pub fn same_view(a: &ViewRef, b: &ViewRef) -> bool {
    Rc::ptr_eq(a, b)
}

/// Recover the concrete handle type, e.g. for a renderer.
pub fn downcast_view<T: ViewHandle>(view: &ViewRef) -> Option<Rc<T>> {
    Rc::clone(view).as_any_rc().downcast::<T>().ok()
}

type DismissObserver = Box<dyn FnOnce()>;

/// Per-view state the coordinator layer relies on.
#[derive(Default)]
pub struct ViewBinding {
    /// Strong owners riding on this view's lifetime (its coordinators).
    owners: RefCell<Vec<Rc<dyn Any>>>,
    /// One-shot callbacks fired when a port removes the view on its own.
    dismiss_observers: RefCell<Vec<DismissObserver>>,
}

impl ViewBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep `owner` alive for as long as this view is alive.
    pub fn retain(&self, owner: Rc<dyn Any>) {
        self.owners.borrow_mut().push(owner);
    }

    /// Number of owners riding on this view.
    pub fn owner_count(&self) -> usize {
        self.owners.borrow().len()
    }

    /// Register a callback for the next out-of-band dismissal.
    pub fn on_dismissed_by_port(&self, observer: impl FnOnce() + 'static) {
        self.dismiss_observers.borrow_mut().push(Box::new(observer));
    }

    /// Called by a port that removed this view without being asked to.
    ///
    /// Observers fire once; the list is drained before they run, so observers
    /// may safely register new ones or touch the view again.
    pub fn notify_dismissed_by_port(&self) {
        let observers: Vec<DismissObserver> = self.dismiss_observers.borrow_mut().drain(..).collect();
        if !observers.is_empty() {
            debug!("Notifying {} dismissal observer(s)", observers.len());
        }
        for observer in observers {
            observer();
        }
    }
}

impl fmt::Debug for ViewBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewBinding")
            .field("owners", &self.owners.borrow().len())
            .field("dismiss_observers", &self.dismiss_observers.borrow().len())
            .finish()
    }
}

/// Notify `view` and everything nested in it, outermost first.
///
/// Nested handles are collected up front: an observer on the outer handle may
/// empty the container, and the inner handles still need their notification.
pub fn notify_tree_dismissed_by_port(view: &ViewRef) {
    let nested = view.nested();
    view.binding().notify_dismissed_by_port();
    for inner in nested {
        notify_tree_dismissed_by_port(&inner);
    }
}
