//! # Flow Observer
//!
//! A [`ParentNotifiable`] that sits above a root coordinator and records what
//! reaches it: dismiss requests, out-of-band dismissals and finalizations.
//! Hosts use it to preview a flow in isolation or to show flow activity.
//!
//! A dismiss request is recorded and then carried out the default way, by
//! hiding the child through its own port.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::core::coordinator::{ChildKey, Coordinator, CoordinatorId, ParentNotifiable};
use crate::core::router::RouterCore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowEvent {
    Registered(ChildKey),
    Dismiss { child: ChildKey, animated: bool },
    DismissedByPort(ChildKey),
    Finalized(ChildKey),
}

impl fmt::Display for FlowEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowEvent::Registered(key) => write!(f, "{key} registered"),
            FlowEvent::Dismiss { child, animated } => {
                write!(f, "{child} dismissed{}", if *animated { " (animated)" } else { "" })
            }
            FlowEvent::DismissedByPort(key) => write!(f, "{key} dismissed by user"),
            FlowEvent::Finalized(key) => write!(f, "{key} finalized"),
        }
    }
}

type Listener = Box<dyn Fn(&FlowEvent)>;

#[derive(Default)]
pub struct FlowObserver {
    events: RefCell<Vec<FlowEvent>>,
    listener: RefCell<Option<Listener>>,
}

impl FlowObserver {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// This observer as the upward channel of a root coordinator.
    pub fn as_parent(self: &Rc<Self>) -> Rc<dyn ParentNotifiable> {
        Rc::clone(self) as Rc<dyn ParentNotifiable>
    }

    /// Make this observer the parent of `root`.
    pub fn observe<C: Coordinator>(self: &Rc<Self>, root: &Rc<C>) {
        root.set_parent(&self.as_parent());
    }

    /// Called after each recorded event.
    pub fn on_event(&self, listener: impl Fn(&FlowEvent) + 'static) {
        *self.listener.borrow_mut() = Some(Box::new(listener));
    }

    pub fn events(&self) -> Vec<FlowEvent> {
        self.events.borrow().clone()
    }

    pub fn last(&self) -> Option<FlowEvent> {
        self.events.borrow().last().cloned()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn finalized(&self) -> Vec<ChildKey> {
        self.collect(|event| match event {
            FlowEvent::Finalized(key) => Some(key.clone()),
            _ => None,
        })
    }

    pub fn dismissed_by_port(&self) -> Vec<ChildKey> {
        self.collect(|event| match event {
            FlowEvent::DismissedByPort(key) => Some(key.clone()),
            _ => None,
        })
    }

    pub fn dismiss_requests(&self) -> Vec<(ChildKey, bool)> {
        self.collect(|event| match event {
            FlowEvent::Dismiss { child, animated } => Some((child.clone(), *animated)),
            _ => None,
        })
    }

    fn collect<T>(&self, pick: impl Fn(&FlowEvent) -> Option<T>) -> Vec<T> {
        self.events.borrow().iter().filter_map(pick).collect()
    }

    fn record(&self, event: FlowEvent) {
        debug!("Flow event: {}", event);
        self.events.borrow_mut().push(event.clone());
        if let Some(listener) = self.listener.borrow().as_ref() {
            listener(&event);
        }
    }
}

impl ParentNotifiable for FlowObserver {
    fn on_child_registered(&self, child: &Rc<dyn Coordinator>) {
        self.record(FlowEvent::Registered(child.child_key()));
    }

    fn on_child_finalized(&self, child: &ChildKey) {
        self.record(FlowEvent::Finalized(child.clone()));
    }

    fn on_child_dismiss(&self, child: &RouterCore, animated: bool) {
        if let Some(key) = child.core().registered_key() {
            self.record(FlowEvent::Dismiss { child: key, animated });
        }
        child.dismiss_via_port(animated);
    }

    fn on_child_dismissed_by_port(&self, child: &ChildKey, _id: CoordinatorId) {
        self.record(FlowEvent::DismissedByPort(child.clone()));
    }
}

impl fmt::Debug for FlowObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlowObserver")
            .field("events", &self.events.borrow())
            .finish()
    }
}
