//! # Presentation Duality
//!
//! A navigation stack shown through an outer surface port (an overlay, a
//! window). Coordinators see one port; the adapter decides which layer a call
//! actually affects.
//!
//! ```text
//! present(v)   stack empty      → stack.push(v, false) + outer.present(container, animated)
//!              stack non-empty  → stack.push(v, animated)
//! dismiss()    entries > 1      → stack pop to parent
//!              single entry     → outer.dismiss(animated), then clear the stack
//! ```
//!
//! Whether the root is presented is read from the live stack on every call,
//! never cached, so dismiss/re-present cycles present the outer surface again.
//!
//! The outer port never sees the stack itself. Each root presentation hands it
//! a fresh container view that shares the stack:
//!
//! ```text
//!  outer port ──▶ container ──▶ NavigationStack ──▶ entries ──▶ coordinators
//!                                     ▲                             │
//!                                     └─── adapter ◀── router port ─┘
//! ```
//!
//! Entries keep their coordinators alive and the coordinators keep the adapter
//! alive, so the stack must be emptied when the outer surface lets go of the
//! container. Dropping the current container clears the stack, however the
//! outer port released it. When the outer port removes the container on its
//! own (swipe-down on the modal), every stacked handle is also notified.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use log::{debug, info};

use crate::core::router::{Completion, PresentationPort};
use crate::core::view::{ViewBinding, ViewHandle, ViewRef, same_view};
use crate::ports::overlay::OverlayPort;
use crate::ports::stack::{NavigationStack, PopAction};
use crate::ports::window::WindowPort;

/// Operations beyond plain present/dismiss.
#[derive(Debug, Clone)]
pub enum SurfaceAction {
    Pop(PopAction),
    DismissSurface,
}

/// The view an outer port shows for one root presentation of the stack.
struct StackContainer {
    stack: Rc<NavigationStack>,
    binding: ViewBinding,
    generation: u64,
    current: Rc<Cell<u64>>,
}

impl ViewHandle for StackContainer {
    fn binding(&self) -> &ViewBinding {
        &self.binding
    }

    fn name(&self) -> &str {
        self.stack.name()
    }

    fn nested(&self) -> Vec<ViewRef> {
        self.stack.entries()
    }
}

impl Drop for StackContainer {
    fn drop(&mut self) {
        // A container replaced by a newer presentation leaves the stack alone
        if self.current.get() != self.generation {
            return;
        }
        let cleared = self.stack.clear();
        if !cleared.is_empty() {
            debug!("{}: container released, {} entr(ies) dropped", self.stack.name(), cleared.len());
        }
        drop(cleared);
    }
}

pub struct PresentationDualityAdapter<Outer: ?Sized> {
    stack: Rc<NavigationStack>,
    outer: Rc<Outer>,
    presentations: Rc<Cell<u64>>,
    shown: RefCell<Weak<StackContainer>>,
}

/// A navigation stack inside a modal overlay.
pub type ModalNavigation = PresentationDualityAdapter<OverlayPort>;

/// A navigation stack as a window's root.
pub type WindowNavigation = PresentationDualityAdapter<WindowPort>;

impl<Outer: PresentationPort + ?Sized + 'static> PresentationDualityAdapter<Outer> {
    pub fn new(stack: Rc<NavigationStack>, outer: Rc<Outer>) -> Rc<Self> {
        Rc::new(Self {
            stack,
            outer,
            presentations: Rc::new(Cell::new(0)),
            shown: RefCell::new(Weak::new()),
        })
    }

    pub fn stack(&self) -> &Rc<NavigationStack> {
        &self.stack
    }

    pub fn outer(&self) -> &Rc<Outer> {
        &self.outer
    }

    pub fn has_presented_root(&self) -> bool {
        self.stack.has_presented_root()
    }

    pub fn perform(&self, action: SurfaceAction, animated: bool) {
        match action {
            SurfaceAction::Pop(pop) => {
                let popped = self.stack.pop(pop, animated);
                drop(popped);
            }
            SurfaceAction::DismissSurface => self.dismiss_entire_surface(animated, None),
        }
    }

    /// A container for a new root presentation. Older containers stop
    /// owning the stack.
    fn container(&self) -> ViewRef {
        let generation = self.presentations.get() + 1;
        self.presentations.set(generation);
        let container = Rc::new(StackContainer {
            stack: Rc::clone(&self.stack),
            binding: ViewBinding::new(),
            generation,
            current: Rc::clone(&self.presentations),
        });

        // Nested handles were collected by the notifier and get their own
        // notification after this.
        let stack = Rc::downgrade(&self.stack);
        container.binding.on_dismissed_by_port(move || {
            if let Some(stack) = stack.upgrade() {
                debug!("{}: container dismissed by port, clearing", stack.name());
                let cleared = stack.clear();
                drop(cleared);
            }
        });
        *self.shown.borrow_mut() = Rc::downgrade(&container);
        container
    }

    /// Dismiss the outer surface, then empty the stack.
    fn dismiss_outer(&self, animated: bool, on_complete: Option<Completion>) {
        let stack = Rc::downgrade(&self.stack);
        let done: Completion = Box::new(move || {
            if let Some(stack) = stack.upgrade() {
                let cleared = stack.clear();
                drop(cleared);
            }
            if let Some(done) = on_complete {
                done();
            }
        });
        let shown = self.shown.borrow().upgrade();
        match shown {
            Some(container) => {
                let container: ViewRef = container;
                self.outer.dismiss_view(&container, animated, Some(done));
            }
            None => self.outer.dismiss(animated, Some(done)),
        }
    }
}

impl<Outer: PresentationPort + ?Sized + 'static> PresentationPort for PresentationDualityAdapter<Outer> {
    fn present(&self, view: ViewRef, animated: bool) {
        if self.has_presented_root() {
            self.stack.push(view, animated);
            return;
        }

        info!("{}: presenting root {} on outer surface", self.stack.name(), view.name());
        self.stack.push(view, false);
        self.outer.present(self.container(), animated);
    }

    fn dismiss(&self, animated: bool, on_complete: Option<Completion>) {
        match self.stack.len() {
            0 => {
                debug!("{}: nothing presented, dismiss ignored", self.stack.name());
                if let Some(done) = on_complete {
                    done();
                }
            }
            1 => self.dismiss_outer(animated, on_complete),
            _ => self.stack.dismiss(animated, on_complete),
        }
    }

    /// The stack's root entry takes the outer surface with it; any other
    /// entry pops back to the one below it.
    fn dismiss_view(&self, view: &ViewRef, animated: bool, on_complete: Option<Completion>) {
        let index = self.stack.entries().iter().position(|entry| same_view(entry, view));
        match index {
            Some(0) => self.dismiss_outer(animated, on_complete),
            Some(_) => self.stack.dismiss_view(view, animated, on_complete),
            None => {
                debug!("{}: {} is not stacked, dismiss ignored", self.stack.name(), view.name());
                if let Some(done) = on_complete {
                    done();
                }
            }
        }
    }

    fn dismiss_entire_surface(&self, animated: bool, on_complete: Option<Completion>) {
        if !self.has_presented_root() {
            if let Some(done) = on_complete {
                done();
            }
            return;
        }
        info!("{}: dismissing entire surface", self.stack.name());
        self.dismiss_outer(animated, on_complete);
    }
}

impl<Outer: fmt::Debug + ?Sized> fmt::Debug for PresentationDualityAdapter<Outer> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresentationDualityAdapter")
            .field("stack", &self.stack)
            .field("outer", &self.outer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::stack::StackTransition;
    use crate::test_support::{PortCall, RecordingPort, TestView};

    fn adapter() -> (Rc<PresentationDualityAdapter<RecordingPort>>, Rc<RecordingPort>) {
        let outer = RecordingPort::new();
        let adapter = PresentationDualityAdapter::new(NavigationStack::new("nav"), outer.clone());
        (adapter, outer)
    }

    #[test]
    fn test_first_present_animates_outer_not_push() {
        let (adapter, outer) = adapter();
        adapter.present(TestView::named("root"), true);

        assert_eq!(outer.calls(), vec![PortCall::Present("nav".into(), true)]);
        assert_eq!(
            adapter.stack().journal(),
            vec![StackTransition::Push { view: "root".into(), animated: false }]
        );
    }

    #[test]
    fn test_present_then_dismiss_round_trip() {
        let (adapter, outer) = adapter();
        adapter.present(TestView::named("root"), true);
        adapter.dismiss(true, None);

        assert_eq!(outer.presented_count(), 1);
        assert_eq!(outer.dismiss_count(), 1);
        assert!(adapter.stack().is_empty());
    }

    #[test]
    fn test_second_present_only_pushes() {
        let (adapter, outer) = adapter();
        adapter.present(TestView::named("root"), true);
        adapter.present(TestView::named("detail"), true);

        assert_eq!(outer.presented_count(), 1);
        assert_eq!(
            adapter.stack().last_transition(),
            Some(StackTransition::Push { view: "detail".into(), animated: true })
        );
    }

    #[test]
    fn test_dismiss_pops_while_entries_remain() {
        let (adapter, outer) = adapter();
        adapter.present(TestView::named("root"), false);
        adapter.present(TestView::named("detail"), false);
        adapter.dismiss(true, None);

        assert_eq!(outer.dismiss_count(), 0);
        assert_eq!(adapter.stack().len(), 1);
    }

    #[test]
    fn test_represent_after_dismiss_presents_outer_again() {
        let (adapter, outer) = adapter();
        adapter.present(TestView::named("root"), true);
        adapter.dismiss(false, None);
        adapter.present(TestView::named("again"), true);

        assert_eq!(outer.presented_count(), 2);
        assert_eq!(adapter.stack().len(), 1);
    }

    #[test]
    fn test_dismiss_on_empty_is_ignored() {
        let (adapter, outer) = adapter();
        adapter.dismiss(true, None);
        assert!(outer.calls().is_empty());
    }

    #[test]
    fn test_perform_pop_to_root() {
        let (adapter, _outer) = adapter();
        for name in ["root", "a", "b"] {
            adapter.present(TestView::named(name), false);
        }
        adapter.perform(SurfaceAction::Pop(PopAction::ToRoot), true);
        assert_eq!(adapter.stack().len(), 1);
    }

    #[test]
    fn test_dismiss_entire_surface_clears_both_layers() {
        let (adapter, outer) = adapter();
        adapter.present(TestView::named("root"), false);
        adapter.present(TestView::named("a"), false);
        adapter.perform(SurfaceAction::DismissSurface, true);

        assert_eq!(outer.dismiss_count(), 1);
        assert!(adapter.stack().is_empty());
    }

    #[test]
    fn test_outer_user_dismiss_clears_stack_and_notifies_entries() {
        let overlay = OverlayPort::new();
        let adapter = ModalNavigation::new(NavigationStack::new("modal"), overlay.clone());
        let root = TestView::named("root");
        let detail = TestView::named("detail");
        let hits = Rc::new(Cell::new(0));
        for view in [&root, &detail] {
            let h = hits.clone();
            view.binding().on_dismissed_by_port(move || h.set(h.get() + 1));
        }
        adapter.present(root, true);
        adapter.present(detail, true);

        assert!(overlay.user_dismiss());
        assert!(adapter.stack().is_empty());
        assert_eq!(hits.get(), 2);

        adapter.present(TestView::named("fresh"), true);
        assert_eq!(overlay.len(), 1);
    }

    #[test]
    fn test_outer_release_without_notice_empties_stack() {
        let overlay = OverlayPort::new();
        let adapter = ModalNavigation::new(NavigationStack::new("modal"), overlay.clone());
        let root = TestView::named("root");
        let weak = Rc::downgrade(&root);
        adapter.present(root, true);
        adapter.present(TestView::named("detail"), true);

        overlay.dismiss_entire_surface(false, None);
        assert!(adapter.stack().is_empty());
        assert!(weak.upgrade().is_none());
        assert!(!adapter.has_presented_root());
    }

    #[test]
    fn test_replaced_container_keeps_new_entries() {
        let window = WindowPort::new();
        let adapter = WindowNavigation::new(NavigationStack::new("main"), window.clone());
        adapter.present(TestView::named("home"), false);

        // Emptied behind the adapter's back while the window still shows it
        let cleared = adapter.stack().clear();
        drop(cleared);
        adapter.present(TestView::named("fresh"), false);

        assert_eq!(adapter.stack().len(), 1);
        assert_eq!(window.root().unwrap().nested()[0].name(), "fresh");
    }

    #[test]
    fn test_dismiss_outer_targets_own_layer() {
        let overlay = OverlayPort::new();
        let adapter = ModalNavigation::new(NavigationStack::new("modal"), overlay.clone());
        adapter.present(TestView::named("root"), false);
        overlay.present(TestView::named("alert"), false);

        adapter.dismiss(false, None);
        assert!(overlay.is_empty());
        assert!(adapter.stack().is_empty());
    }

    #[test]
    fn test_dismiss_view_on_root_entry_closes_surface() {
        let overlay = OverlayPort::new();
        let adapter = ModalNavigation::new(NavigationStack::new("modal"), overlay.clone());
        let root = TestView::named("root");
        adapter.present(root.clone(), false);
        adapter.present(TestView::named("detail"), false);

        adapter.dismiss_view(&root, true, None);
        assert!(overlay.is_empty());
        assert!(adapter.stack().is_empty());
    }

    #[test]
    fn test_window_navigation() {
        let window = WindowPort::new();
        let adapter = WindowNavigation::new(NavigationStack::new("main"), window.clone());
        adapter.present(TestView::named("home"), false);

        let root = window.root().unwrap();
        assert_eq!(root.name(), "main");
        assert_eq!(root.nested().len(), 1);
    }
}
