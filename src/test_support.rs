//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::core::coordinator::{Coordinator, CoordinatorCore};
use crate::core::router::{Completion, PresentationPort, RouterCoordinator, RouterCore};
use crate::core::view::{ViewBinding, ViewHandle, ViewRef};

/// A view that only has a name.
pub struct TestView {
    name: String,
    binding: ViewBinding,
}

impl TestView {
    pub fn named(name: &str) -> ViewRef {
        Rc::new(Self {
            name: name.to_string(),
            binding: ViewBinding::new(),
        })
    }
}

impl ViewHandle for TestView {
    fn binding(&self) -> &ViewBinding {
        &self.binding
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// What a [`RecordingPort`] was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortCall {
    Present(String, bool),
    Dismiss(bool),
    DismissSurface(bool),
}

/// A stack-like port that records every call and holds what it shows.
#[derive(Default)]
pub struct RecordingPort {
    calls: RefCell<Vec<PortCall>>,
    shown: RefCell<Vec<ViewRef>>,
}

impl RecordingPort {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<PortCall> {
        self.calls.borrow().clone()
    }

    pub fn presented_count(&self) -> usize {
        self.count(|call| matches!(call, PortCall::Present(..)))
    }

    pub fn dismiss_count(&self) -> usize {
        self.count(|call| matches!(call, PortCall::Dismiss(_)))
    }

    pub fn top(&self) -> Option<ViewRef> {
        self.shown.borrow().last().cloned()
    }

    fn count(&self, pick: impl Fn(&PortCall) -> bool) -> usize {
        self.calls.borrow().iter().filter(|call| pick(call)).count()
    }
}

impl PresentationPort for RecordingPort {
    fn present(&self, view: ViewRef, animated: bool) {
        self.calls
            .borrow_mut()
            .push(PortCall::Present(view.name().to_string(), animated));
        self.shown.borrow_mut().push(view);
    }

    fn dismiss(&self, animated: bool, on_complete: Option<Completion>) {
        self.calls.borrow_mut().push(PortCall::Dismiss(animated));
        let popped = self.shown.borrow_mut().pop();
        drop(popped);
        if let Some(done) = on_complete {
            done();
        }
    }

    fn dismiss_entire_surface(&self, animated: bool, on_complete: Option<Completion>) {
        self.calls.borrow_mut().push(PortCall::DismissSurface(animated));
        let cleared = std::mem::take(&mut *self.shown.borrow_mut());
        drop(cleared);
        if let Some(done) = on_complete {
            done();
        }
    }
}

/// A coordinator with no port. Records whether it was registered with a
/// parent by the time `start` ran.
pub struct Plain {
    core: CoordinatorCore,
    identifier: Option<String>,
    pub started_with_parent: Cell<bool>,
}

impl Plain {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            core: CoordinatorCore::new(),
            identifier: None,
            started_with_parent: Cell::new(false),
        })
    }

    pub fn identified(identifier: &str) -> Rc<Self> {
        Rc::new(Self {
            core: CoordinatorCore::new(),
            identifier: Some(identifier.to_string()),
            started_with_parent: Cell::new(false),
        })
    }
}

impl Coordinator for Plain {
    fn core(&self) -> &CoordinatorCore {
        &self.core
    }

    fn start(self: Rc<Self>, _animated: bool) {
        let registered = self.core.parent().is_some() && self.core.registered_key().is_some();
        self.started_with_parent.set(registered);
    }

    fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }
}

/// A router coordinator whose `start` presents one [`TestView`].
pub struct TestScreen {
    router: RouterCore,
}

impl TestScreen {
    pub fn new(port: Rc<dyn PresentationPort>) -> Rc<Self> {
        Rc::new(Self {
            router: RouterCore::new(port),
        })
    }
}

impl Coordinator for TestScreen {
    fn core(&self) -> &CoordinatorCore {
        self.router.core()
    }

    fn start(self: Rc<Self>, animated: bool) {
        self.present(TestView::named("screen"), animated);
    }
}

impl RouterCoordinator for TestScreen {
    fn router(&self) -> &RouterCore {
        &self.router
    }
}
