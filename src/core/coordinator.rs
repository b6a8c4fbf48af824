//! # Coordinators
//!
//! A coordinator is one node in the navigation ownership graph. It presents a
//! piece of UI and hands sub-flows to child coordinators.
//!
//! ```text
//! CoordinatorCore
//! ├── id: CoordinatorId                          // log identity
//! ├── children: WeakRegistry<ChildKey, dyn Coordinator>
//! ├── anchors: Vec<Weak<dyn ViewHandle>>         // first live one = root anchor
//! ├── upward: Weak<dyn ParentNotifiable> + own ChildKey
//! └── started / dismissed flags
//! ```
//!
//! Every internal edge is weak. A coordinator is kept alive by the views it
//! presented (see [`crate::core::view`]); when the last of them goes away the
//! coordinator drops, and its parent hears about it on the next main-queue
//! turn through [`ParentNotifiable::on_child_finalized`].
//!
//! ## Lifecycle
//!
//! ```text
//! Uninitialized ──coordinate/launch──▶ Active ⇄ HasChildren ──dismiss──▶ Dismissed
//!                                          └──────── last view dropped ──▶ (finalized)
//! ```
//!
//! Finalization is never an API call; it is the drop of the coordinator.

use std::any::{Any, TypeId};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

use log::{debug, info};
use uuid::Uuid;

use crate::core::main_queue;
use crate::core::registry::WeakRegistry;
use crate::core::response::{ResponseChannel, ResponseCoordinator, response_channel};
use crate::core::router::RouterCore;
use crate::core::view::{ViewHandle, ViewRef};

// ============================================================================
// Keys and identity
// ============================================================================

/// Runtime kind of a coordinator: a type tag plus a readable name.
#[derive(Clone, Copy)]
pub struct CoordinatorKind {
    id: TypeId,
    name: &'static str,
}

impl CoordinatorKind {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Type name without its module path (`RootCoordinator`, not
    /// `flowpilot::tui::flows::root::RootCoordinator`).
    pub fn name(&self) -> &'static str {
        let base = self.name.split('<').next().unwrap_or(self.name);
        base.rsplit("::").next().unwrap_or(base)
    }
}

impl PartialEq for CoordinatorKind {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CoordinatorKind {}

impl Hash for CoordinatorKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for CoordinatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Slot of a child coordinator inside its parent: `(kind, identifier)`.
///
/// An identified key never matches an unidentified one of the same kind.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChildKey {
    pub kind: CoordinatorKind,
    pub identifier: Option<String>,
}

impl ChildKey {
    pub fn new(kind: CoordinatorKind, identifier: Option<&str>) -> Self {
        Self {
            kind,
            identifier: identifier.map(str::to_string),
        }
    }

    pub fn of<T: ?Sized + 'static>(identifier: Option<&str>) -> Self {
        Self::new(CoordinatorKind::of::<T>(), identifier)
    }
}

impl fmt::Display for ChildKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.identifier {
            Some(id) => write!(f, "{}#{}", self.kind.name(), id),
            None => f.write_str(self.kind.name()),
        }
    }
}

/// Unique identity of a coordinator instance, used in log lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CoordinatorId(Uuid);

impl CoordinatorId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for CoordinatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // First group is plenty to tell coordinators apart in a log.
        let text = self.0.to_string();
        f.write_str(&text[..8])
    }
}

/// Observable lifecycle state. `finalized` has no variant: a finalized
/// coordinator no longer exists to be asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorState {
    Uninitialized,
    Active,
    HasChildren,
    Dismissed,
}

// ============================================================================
// Errors
// ============================================================================

/// No live anchor was found. `examined` is the number of anchors looked at:
/// zero means nothing was ever presented, more means every anchor died.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoRootViewHandle {
    pub examined: usize,
}

impl NoRootViewHandle {
    pub fn never_presented(&self) -> bool {
        self.examined == 0
    }
}

impl fmt::Display for NoRootViewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.never_presented() {
            write!(f, "no root view handle: nothing presented yet")
        } else {
            write!(f, "no root view handle: all {} anchor(s) are gone", self.examined)
        }
    }
}

impl std::error::Error for NoRootViewHandle {}

// ============================================================================
// Upward channel
// ============================================================================

/// Receiver of events from child coordinators.
///
/// Every [`Coordinator`] implements this for its own children (through the
/// `child_*` hooks on [`Coordinator`]). Other types can implement it to sit
/// above a root coordinator, e.g. [`crate::core::observer::FlowObserver`].
pub trait ParentNotifiable {
    /// A child was registered with this parent, before it starts.
    fn on_child_registered(&self, _child: &Rc<dyn Coordinator>) {}

    /// A child coordinator was dropped. Delivered one main-queue turn later.
    fn on_child_finalized(&self, _child: &ChildKey) {}

    /// A child asked to be dismissed. The default hides it through the
    /// child's own port; override to run a compound transition instead.
    fn on_child_dismiss(&self, child: &RouterCore, animated: bool) {
        child.dismiss_via_port(animated);
    }

    /// A port removed a child's view on its own. Bookkeeping only.
    ///
    /// `id` names the instance that was dismissed: a newer child may already
    /// hold the same key.
    fn on_child_dismissed_by_port(&self, _child: &ChildKey, _id: CoordinatorId) {}
}

impl<C: Coordinator + ?Sized> ParentNotifiable for C {
    fn on_child_registered(&self, child: &Rc<dyn Coordinator>) {
        self.child_registered(child);
    }

    fn on_child_finalized(&self, child: &ChildKey) {
        self.child_finalized(child);
    }

    fn on_child_dismiss(&self, child: &RouterCore, animated: bool) {
        self.child_dismiss_requested(child, animated);
    }

    fn on_child_dismissed_by_port(&self, child: &ChildKey, id: CoordinatorId) {
        self.child_dismissed_by_port(child, id);
    }
}

// ============================================================================
// Coordinator trait
// ============================================================================

/// Upcast helper so coordinators and view handles behind `Rc<dyn ..>` can be
/// downcast to a concrete type or stored as an owner in a
/// [`crate::core::view::ViewBinding`].
pub trait AsAnyRc {
    fn as_any_rc(self: Rc<Self>) -> Rc<dyn Any>;
}

impl<T: Any> AsAnyRc for T {
    fn as_any_rc(self: Rc<Self>) -> Rc<dyn Any> {
        self
    }
}

/// A node of the navigation graph.
///
/// Implementors embed a [`CoordinatorCore`] (directly, or through a
/// [`RouterCore`]) and implement [`Coordinator::start`]; everything else has a
/// default.
pub trait Coordinator: AsAnyRc + 'static {
    fn core(&self) -> &CoordinatorCore;

    /// Show this coordinator's first view. Called once by `coordinate`/`launch`.
    fn start(self: Rc<Self>, animated: bool);

    /// Distinguishes siblings of the same kind. `None` by default.
    fn identifier(&self) -> Option<&str> {
        None
    }

    fn kind(&self) -> CoordinatorKind {
        CoordinatorKind::of::<Self>()
    }

    fn child_key(&self) -> ChildKey {
        ChildKey::new(self.kind(), self.identifier())
    }

    // -- hooks for events coming up from this coordinator's children --------

    fn child_registered(&self, child: &Rc<dyn Coordinator>) {
        self.core().register_child(child);
    }

    fn child_finalized(&self, child: &ChildKey) {
        self.core().forget_finalized_child(child);
    }

    fn child_dismiss_requested(&self, child: &RouterCore, animated: bool) {
        child.dismiss_via_port(animated);
    }

    fn child_dismissed_by_port(&self, child: &ChildKey, id: CoordinatorId) {
        self.core().forget_dismissed_child(child, id);
    }

    // -- graph operations ---------------------------------------------------

    /// Point this coordinator's upward channel at `parent`.
    fn set_parent(&self, parent: &Rc<dyn ParentNotifiable>) {
        self.core().bind_parent(Rc::downgrade(parent), self.child_key());
    }

    fn child_coordinator(
        &self,
        kind: CoordinatorKind,
        identifier: Option<&str>,
    ) -> Option<Rc<dyn Coordinator>> {
        self.core().child_coordinator(kind, identifier)
    }

    fn remove_child_coordinator(&self, kind: CoordinatorKind, identifier: Option<&str>) -> bool {
        self.core().remove_child(&ChildKey::new(kind, identifier))
    }

    fn root_view_handle(&self) -> Result<ViewRef, NoRootViewHandle> {
        self.core().root_view_handle()
    }

    /// Typed lookup of a child registered as `T`.
    fn child<T: Coordinator>(&self, identifier: Option<&str>) -> Option<Rc<T>>
    where
        Self: Sized,
    {
        self.core().child::<T>(identifier)
    }

    /// Start a root coordinator (one without a parent).
    fn launch(self: &Rc<Self>, animated: bool)
    where
        Self: Sized,
    {
        self.core().mark_started();
        info!("Launching {} ({})", self.child_key(), self.core().id());
        Rc::clone(self).start(animated);
    }

    /// Register `child`, make `self` its parent, then start it.
    ///
    /// Registration happens before `start` so a child that dismisses itself
    /// synchronously from `start` already has an entry to clean up.
    fn coordinate<C: Coordinator>(self: &Rc<Self>, child: Rc<C>, animated: bool)
    where
        Self: Sized,
    {
        let parent: Rc<dyn ParentNotifiable> = Rc::clone(self) as Rc<dyn ParentNotifiable>;
        let child_dyn: Rc<dyn Coordinator> = Rc::clone(&child) as Rc<dyn Coordinator>;

        parent.on_child_registered(&child_dyn);
        child.set_parent(&parent);
        child.core().mark_started();
        info!(
            "{} coordinates to {} ({})",
            self.child_key(),
            child.child_key(),
            child.core().id()
        );
        child.start(animated);
    }

    /// Coordinate to a response-producing child and hand back the channel its
    /// answer will arrive on. The caller awaits it and dismisses the child.
    fn coordinate_for_response<C: ResponseCoordinator>(
        self: &Rc<Self>,
        child: Rc<C>,
        animated: bool,
    ) -> ResponseChannel<C::Response>
    where
        Self: Sized,
    {
        let (sender, channel) = response_channel();
        child.responder().wire(sender);
        self.coordinate(child, animated);
        channel
    }

    /// Make `view` an anchor of this coordinator and let it keep the
    /// coordinator alive.
    fn associate(self: &Rc<Self>, view: &ViewRef)
    where
        Self: Sized,
    {
        let owner: Rc<dyn Any> = Rc::clone(self) as Rc<dyn Any>;
        self.core().add_anchor(view, owner);
    }
}

// ============================================================================
// Core state
// ============================================================================

struct Upward {
    parent: Weak<dyn ParentNotifiable>,
    key: ChildKey,
}

struct CoreInner {
    id: CoordinatorId,
    children: RefCell<WeakRegistry<ChildKey, dyn Coordinator>>,
    anchors: RefCell<Vec<Weak<dyn ViewHandle>>>,
    upward: RefCell<Option<Upward>>,
    started: Cell<bool>,
    dismissed: Cell<bool>,
}

impl Drop for CoreInner {
    fn drop(&mut self) {
        let Some(upward) = self.upward.get_mut().take() else {
            debug!("Coordinator {} finalized (no parent)", self.id);
            return;
        };
        debug!("Coordinator {} ({}) finalized, notifying parent next turn", self.id, upward.key);
        main_queue::post(move || {
            if let Some(parent) = upward.parent.upgrade() {
                parent.on_child_finalized(&upward.key);
            }
        });
    }
}

/// Bookkeeping shared by every coordinator. Never holds a strong reference to
/// a child coordinator or a view.
pub struct CoordinatorCore {
    inner: Rc<CoreInner>,
}

/// Weak handle used by dismissal observers; does not keep the core alive.
#[derive(Clone)]
pub(crate) struct WeakCore(Weak<CoreInner>);

impl WeakCore {
    pub(crate) fn upgrade(&self) -> Option<CoordinatorCore> {
        self.0.upgrade().map(|inner| CoordinatorCore { inner })
    }
}

impl CoordinatorCore {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(CoreInner {
                id: CoordinatorId::new(),
                children: RefCell::new(WeakRegistry::new()),
                anchors: RefCell::new(Vec::new()),
                upward: RefCell::new(None),
                started: Cell::new(false),
                dismissed: Cell::new(false),
            }),
        }
    }

    pub fn id(&self) -> CoordinatorId {
        self.inner.id
    }

    pub(crate) fn downgrade(&self) -> WeakCore {
        WeakCore(Rc::downgrade(&self.inner))
    }

    // -- children -----------------------------------------------------------

    pub fn register_child(&self, child: &Rc<dyn Coordinator>) {
        let key = child.child_key();
        debug!("{} registers child {}", self.id(), key);
        self.inner.children.borrow_mut().set(key, child);
    }

    pub fn child_coordinator(
        &self,
        kind: CoordinatorKind,
        identifier: Option<&str>,
    ) -> Option<Rc<dyn Coordinator>> {
        self.inner
            .children
            .borrow_mut()
            .get(&ChildKey::new(kind, identifier))
    }

    pub fn child<T: Coordinator>(&self, identifier: Option<&str>) -> Option<Rc<T>> {
        self.child_coordinator(CoordinatorKind::of::<T>(), identifier)
            .and_then(|child| child.as_any_rc().downcast::<T>().ok())
    }

    pub fn remove_child(&self, key: &ChildKey) -> bool {
        let removed = self.inner.children.borrow_mut().remove(key);
        if removed {
            debug!("{} removed child {}", self.id(), key);
        }
        removed
    }

    /// Evict `key` only if the coordinator registered there is gone, so a
    /// newer child that reused the key survives a late finalization.
    pub fn forget_finalized_child(&self, key: &ChildKey) -> bool {
        let removed = self.inner.children.borrow_mut().remove_if_dead(key);
        if removed {
            debug!("{} forgot finalized child {}", self.id(), key);
        }
        removed
    }

    /// Evict `key` if it still holds the dismissed instance `id` (or nothing
    /// live). A newer child registered under the same key is kept.
    pub fn forget_dismissed_child(&self, key: &ChildKey, id: CoordinatorId) -> bool {
        let current = self.inner.children.borrow_mut().get(key);
        match current {
            Some(live) if live.core().id() != id => {
                debug!("{} keeps child {} ({}), {} was dismissed", self.id(), key, live.core().id(), id);
                false
            }
            Some(_) => self.remove_child(key),
            None => false,
        }
    }

    /// Live children in registration order.
    pub fn child_coordinators(&self) -> Vec<Rc<dyn Coordinator>> {
        self.inner.children.borrow().values().collect()
    }

    pub fn child_count(&self) -> usize {
        self.inner.children.borrow().len()
    }

    pub fn has_children(&self) -> bool {
        self.child_count() > 0
    }

    // -- anchors ------------------------------------------------------------

    /// Record `view` as an anchor and make it keep `owner` alive.
    pub fn add_anchor(&self, view: &ViewRef, owner: Rc<dyn Any>) {
        view.binding().retain(owner);
        self.inner.anchors.borrow_mut().push(Rc::downgrade(view));
    }

    /// Anchors in presentation order; `None` where the view is gone.
    pub fn anchors(&self) -> Vec<Option<ViewRef>> {
        self.inner
            .anchors
            .borrow()
            .iter()
            .map(Weak::upgrade)
            .collect()
    }

    pub fn root_view_handle(&self) -> Result<ViewRef, NoRootViewHandle> {
        let anchors = self.inner.anchors.borrow();
        anchors
            .iter()
            .find_map(Weak::upgrade)
            .ok_or(NoRootViewHandle {
                examined: anchors.len(),
            })
    }

    fn compact_anchors(&self) {
        self.inner
            .anchors
            .borrow_mut()
            .retain(|anchor| anchor.strong_count() > 0);
    }

    // -- upward channel -----------------------------------------------------

    pub fn bind_parent(&self, parent: Weak<dyn ParentNotifiable>, key: ChildKey) {
        *self.inner.upward.borrow_mut() = Some(Upward { parent, key });
    }

    pub fn parent(&self) -> Option<Rc<dyn ParentNotifiable>> {
        self.inner
            .upward
            .borrow()
            .as_ref()
            .and_then(|upward| upward.parent.upgrade())
    }

    /// Key this coordinator was registered under, if it has a parent.
    pub fn registered_key(&self) -> Option<ChildKey> {
        self.inner
            .upward
            .borrow()
            .as_ref()
            .map(|upward| upward.key.clone())
    }

    fn upward(&self) -> Option<(Rc<dyn ParentNotifiable>, ChildKey)> {
        let upward = self.inner.upward.borrow();
        let upward = upward.as_ref()?;
        Some((upward.parent.upgrade()?, upward.key.clone()))
    }

    // -- lifecycle ----------------------------------------------------------

    pub fn state(&self) -> CoordinatorState {
        if !self.inner.started.get() {
            CoordinatorState::Uninitialized
        } else if self.inner.dismissed.get() {
            CoordinatorState::Dismissed
        } else if self.has_children() {
            CoordinatorState::HasChildren
        } else {
            CoordinatorState::Active
        }
    }

    pub fn is_dismissed(&self) -> bool {
        self.inner.dismissed.get()
    }

    pub(crate) fn mark_started(&self) {
        self.inner.started.set(true);
    }

    /// A new presentation makes a dismissed coordinator active again.
    pub(crate) fn mark_presented(&self) {
        self.inner.started.set(true);
        self.inner.dismissed.set(false);
    }

    /// Returns `false` if a dismissal was already processed.
    pub(crate) fn mark_dismissed(&self) -> bool {
        !self.inner.dismissed.replace(true)
    }

    /// Out-of-band dismissal: update bookkeeping and tell the parent, never
    /// touch the port. A second call (or one after `dismiss`) is a no-op.
    pub fn dismissed_by_port(&self) {
        if !self.mark_dismissed() {
            debug!("{} already dismissed, ignoring port dismissal", self.id());
            return;
        }
        self.compact_anchors();
        match self.upward() {
            Some((parent, key)) => {
                debug!("{} ({}) dismissed by port", self.id(), key);
                parent.on_child_dismissed_by_port(&key, self.id());
            }
            None => debug!("{} dismissed by port (no parent)", self.id()),
        }
    }
}

impl Default for CoordinatorCore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CoordinatorCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoordinatorCore")
            .field("id", &self.id())
            .field("state", &self.state())
            .field("children", &self.inner.children.borrow())
            .field("anchors", &self.inner.anchors.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::observer::FlowObserver;
    use crate::test_support::{Plain, TestView};

    #[test]
    fn test_kind_name_strips_module_path() {
        assert_eq!(CoordinatorKind::of::<Plain>().name(), "Plain");
        assert_eq!(ChildKey::of::<Plain>(Some("x")).to_string(), "Plain#x");
    }

    #[test]
    fn test_coordinate_registers_before_start() {
        let parent = Plain::new();
        parent.launch(false);
        assert_eq!(parent.core().state(), CoordinatorState::Active);
        let child = Plain::new();
        parent.coordinate(child.clone(), false);

        assert!(child.started_with_parent.get());
        assert_eq!(child.core().state(), CoordinatorState::Active);
        assert_eq!(parent.core().state(), CoordinatorState::HasChildren);
    }

    #[test]
    fn test_lookup_returns_same_instance() {
        let parent = Plain::new();
        let child = Plain::new();
        parent.coordinate(child.clone(), false);

        let found = parent.child::<Plain>(None).expect("child registered");
        assert!(Rc::ptr_eq(&found, &child));
        assert!(parent.child_coordinator(CoordinatorKind::of::<Plain>(), None).is_some());
    }

    #[test]
    fn test_identifier_lookups_do_not_cross_match() {
        let parent = Plain::new();
        let left = Plain::identified("left");
        let right = Plain::identified("right");
        parent.coordinate(left.clone(), false);
        parent.coordinate(right.clone(), false);

        assert!(Rc::ptr_eq(&parent.child::<Plain>(Some("left")).unwrap(), &left));
        assert!(Rc::ptr_eq(&parent.child::<Plain>(Some("right")).unwrap(), &right));
        assert!(parent.child::<Plain>(None).is_none());
        assert_eq!(parent.core().child_count(), 2);
    }

    #[test]
    fn test_remove_child_coordinator() {
        let parent = Plain::new();
        parent.launch(false);
        let child = Plain::new();
        parent.coordinate(child.clone(), false);

        assert!(parent.remove_child_coordinator(CoordinatorKind::of::<Plain>(), None));
        assert!(parent.child::<Plain>(None).is_none());
        assert_eq!(parent.core().state(), CoordinatorState::Active);
    }

    #[test]
    fn test_root_view_handle_distinguishes_never_presented() {
        let coordinator = Plain::new();
        let Err(err) = coordinator.root_view_handle() else {
            panic!("nothing was presented");
        };
        assert!(err.never_presented());
        assert_eq!(err.examined, 0);
    }

    #[test]
    fn test_root_view_handle_is_first_live_anchor() {
        let coordinator = Plain::new();
        let first = TestView::named("first");
        coordinator.associate(&first);
        {
            let second = TestView::named("second");
            coordinator.associate(&second);
            assert_eq!(coordinator.core().anchors().len(), 2);
        }

        let root = coordinator.root_view_handle().unwrap();
        assert_eq!(root.name(), "first");
        assert!(coordinator.core().anchors()[1].is_none());
    }

    #[test]
    fn test_root_view_handle_reports_dead_anchors() {
        let coordinator = Plain::new();
        {
            let view = TestView::named("short-lived");
            coordinator.core().add_anchor(&view, Rc::new(()));
        }
        let Err(err) = coordinator.root_view_handle() else {
            panic!("the only anchor is gone");
        };
        assert_eq!(err.examined, 1);
        assert!(!err.never_presented());
        assert!(err.to_string().contains("all 1 anchor(s) are gone"));
    }

    #[test]
    fn test_view_keeps_coordinator_alive() {
        let view = TestView::named("owner");
        let weak = {
            let coordinator = Plain::new();
            coordinator.associate(&view);
            Rc::downgrade(&coordinator)
        };

        assert!(weak.upgrade().is_some());
        drop(view);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_finalization_is_deferred_one_turn() {
        let recorder = FlowObserver::new();
        {
            let child = Plain::new();
            child.set_parent(&recorder.as_parent());
        }

        assert!(recorder.finalized().is_empty());
        main_queue::run_turn();
        assert_eq!(recorder.finalized(), vec![ChildKey::of::<Plain>(None)]);
    }

    #[test]
    fn test_late_finalization_keeps_newer_child() {
        let parent = Plain::new();
        let first = Plain::new();
        parent.coordinate(first.clone(), false);
        drop(first);

        let second = Plain::new();
        parent.coordinate(second.clone(), false);
        main_queue::run_turn();

        let found = parent.child::<Plain>(None).expect("newer child survives");
        assert!(Rc::ptr_eq(&found, &second));
    }

    #[test]
    fn test_unlaunched_parent_stays_uninitialized() {
        let parent = Plain::new();
        parent.coordinate(Plain::new(), false);
        assert_eq!(parent.core().state(), CoordinatorState::Uninitialized);
    }

    #[test]
    fn test_stale_port_dismissal_keeps_newer_child() {
        let parent = Plain::new();
        parent.launch(false);
        let old = Plain::new();
        parent.coordinate(old.clone(), false);
        let newer = Plain::new();
        parent.coordinate(newer.clone(), false);

        old.core().dismissed_by_port();
        let found = parent.child::<Plain>(None).expect("newer child kept");
        assert!(Rc::ptr_eq(&found, &newer));
        assert_eq!(parent.core().state(), CoordinatorState::HasChildren);

        newer.core().dismissed_by_port();
        assert!(parent.child::<Plain>(None).is_none());
    }

    #[test]
    fn test_parent_not_kept_alive_by_child() {
        let child = Plain::new();
        let weak_parent = {
            let parent = Plain::new();
            parent.coordinate(child.clone(), false);
            Rc::downgrade(&parent)
        };
        assert!(weak_parent.upgrade().is_none());
        assert!(child.core().parent().is_none());
    }

    #[test]
    fn test_dismissed_by_port_notifies_once() {
        let recorder = FlowObserver::new();
        let child = Plain::new();
        child.set_parent(&recorder.as_parent());
        child.core().mark_started();

        child.core().dismissed_by_port();
        child.core().dismissed_by_port();

        assert_eq!(recorder.dismissed_by_port().len(), 1);
        assert_eq!(child.core().state(), CoordinatorState::Dismissed);
    }
}
