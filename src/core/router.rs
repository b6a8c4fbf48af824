//! # Router Coordinators
//!
//! A router coordinator is a [`Coordinator`] paired with a [`PresentationPort`],
//! the capability that actually shows and hides views on some surface.
//!
//! ```text
//!             present(view)                      dismiss()
//!  RouterCoordinator ──▶ port.present      RouterCoordinator ──▶ parent.on_child_dismiss
//!        │                                                          │ (default)
//!        └─ anchor + owner + port observer                          ▼
//!                                                 port.dismiss_view(anchor)
//!
//!  port removes view on its own ──▶ view observers ──▶ dismissed_by_port()
//!                                                        └─▶ parent.on_child_dismissed_by_port
//! ```
//!
//! Code-initiated and port-initiated dismissals share one `dismissed` marker:
//! whichever arrives first wins and the other is ignored, so a port never gets
//! a second hide request for a view it already removed.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::{debug, info};

use crate::core::coordinator::{Coordinator, CoordinatorCore};
use crate::core::view::ViewRef;

/// Callback run by a port once a hide transition has finished.
pub type Completion = Box<dyn FnOnce()>;

/// Capability that physically shows and hides views.
///
/// Ports that remove a view without being asked (back gesture, swipe-down)
/// must call `notify_dismissed_by_port` on that view's binding.
pub trait PresentationPort {
    fn present(&self, view: ViewRef, animated: bool);

    /// Hide the most recent presentation.
    fn dismiss(&self, animated: bool, on_complete: Option<Completion>);

    /// Hide `view` together with everything presented above it.
    ///
    /// Ports that cannot locate a view by identity hide the most recent
    /// presentation instead.
    fn dismiss_view(&self, view: &ViewRef, animated: bool, on_complete: Option<Completion>) {
        let _ = view;
        self.dismiss(animated, on_complete);
    }

    /// Tear down the whole surface this port manages.
    fn dismiss_entire_surface(&self, animated: bool, on_complete: Option<Completion>);
}

// ============================================================================
// Transition negotiation
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Present,
    Dismiss,
}

/// A transition about to be handed to a port.
#[derive(Clone, Copy)]
pub struct Transition<'a> {
    pub kind: TransitionKind,
    /// The view being presented, or the root anchor being dismissed.
    pub view: Option<&'a ViewRef>,
}

impl fmt::Debug for Transition<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("kind", &self.kind)
            .field("view", &self.view.map(|view| view.name()))
            .finish()
    }
}

/// Hook deciding whether a specific transition animates.
pub trait TransitionDelegate {
    fn should_animate(&self, transition: &Transition<'_>, requested: bool) -> bool;
}

// ============================================================================
// RouterCore
// ============================================================================

/// State embedded by every router coordinator.
pub struct RouterCore {
    core: CoordinatorCore,
    port: Rc<dyn PresentationPort>,
    delegate: RefCell<Option<Rc<dyn TransitionDelegate>>>,
}

impl RouterCore {
    pub fn new(port: Rc<dyn PresentationPort>) -> Self {
        Self {
            core: CoordinatorCore::new(),
            port,
            delegate: RefCell::new(None),
        }
    }

    pub fn with_delegate(port: Rc<dyn PresentationPort>, delegate: Rc<dyn TransitionDelegate>) -> Self {
        let router = Self::new(port);
        router.set_transition_delegate(Some(delegate));
        router
    }

    pub fn core(&self) -> &CoordinatorCore {
        &self.core
    }

    pub fn port(&self) -> &Rc<dyn PresentationPort> {
        &self.port
    }

    pub fn set_transition_delegate(&self, delegate: Option<Rc<dyn TransitionDelegate>>) {
        *self.delegate.borrow_mut() = delegate;
    }

    pub fn transition_delegate(&self) -> Option<Rc<dyn TransitionDelegate>> {
        self.delegate.borrow().clone()
    }

    /// The caller's preference unless a delegate overrides it.
    pub fn resolve_animation(&self, kind: TransitionKind, view: Option<&ViewRef>, requested: bool) -> bool {
        let Some(delegate) = self.transition_delegate() else {
            return requested;
        };
        let animated = delegate.should_animate(&Transition { kind, view }, requested);
        if animated != requested {
            debug!("{} {:?} animation overridden: {} -> {}", self.core.id(), kind, requested, animated);
        }
        animated
    }

    /// Subscribe to the port's out-of-band removal of `view`.
    pub(crate) fn observe_port_dismissal(&self, view: &ViewRef) {
        let core = self.core.downgrade();
        view.binding().on_dismissed_by_port(move || {
            if let Some(core) = core.upgrade() {
                core.dismissed_by_port();
            }
        });
    }

    /// Code-initiated dismissal. Routed through the parent when there is one.
    pub fn dismiss(&self, animated: bool) {
        if !self.core.mark_dismissed() {
            debug!("{} already dismissed, ignoring dismiss", self.core.id());
            return;
        }
        match self.core.parent() {
            Some(parent) => parent.on_child_dismiss(self, animated),
            None => self.dismiss_via_port(animated),
        }
    }

    /// Hide this coordinator's presentation on its own port. Used as the
    /// default answer to a child's dismiss request.
    ///
    /// The root anchor is dismissed by identity, so views that children
    /// pushed above it go too.
    pub fn dismiss_via_port(&self, animated: bool) {
        let anchor = self.core.root_view_handle().ok();
        let animated = self.resolve_animation(TransitionKind::Dismiss, anchor.as_ref(), animated);
        info!("{} dismissing (animated: {})", self.core.id(), animated);
        match anchor {
            Some(anchor) => self.port.dismiss_view(&anchor, animated, None),
            None => self.port.dismiss(animated, None),
        }
    }

    /// Tear down the whole surface this coordinator's port manages.
    pub fn dismiss_entire_surface(&self, animated: bool) {
        self.core.mark_dismissed();
        let anchor = self.core.root_view_handle().ok();
        let animated = self.resolve_animation(TransitionKind::Dismiss, anchor.as_ref(), animated);
        info!("{} dismissing entire surface (animated: {})", self.core.id(), animated);
        self.port.dismiss_entire_surface(animated, None);
    }
}

impl fmt::Debug for RouterCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterCore")
            .field("core", &self.core)
            .field("delegate", &self.delegate.borrow().is_some())
            .finish()
    }
}

// ============================================================================
// RouterCoordinator
// ============================================================================

/// A coordinator that presents through a port.
///
/// Implementors return `self.router().core()` from [`Coordinator::core`].
pub trait RouterCoordinator: Coordinator {
    fn router(&self) -> &RouterCore;

    /// Anchor `view` to this coordinator, then show it.
    fn present(self: &Rc<Self>, view: ViewRef, animated: bool)
    where
        Self: Sized,
    {
        let router = self.router();
        self.associate(&view);
        router.observe_port_dismissal(&view);
        router.core().mark_presented();

        let animated = router.resolve_animation(TransitionKind::Present, Some(&view), animated);
        info!(
            "{} presents {} (animated: {})",
            self.child_key(),
            view.name(),
            animated
        );
        router.port().present(view, animated);
    }

    fn dismiss(&self, animated: bool) {
        self.router().dismiss(animated);
    }

    /// Called when the port removed this coordinator's view on its own.
    fn dismissed_by_port(&self) {
        self.router().core().dismissed_by_port();
    }

    fn dismiss_entire_surface(&self, animated: bool) {
        self.router().dismiss_entire_surface(animated);
    }

    fn set_transition_delegate(&self, delegate: Option<Rc<dyn TransitionDelegate>>) {
        self.router().set_transition_delegate(delegate);
    }
}
