//! # Demo Flows
//!
//! The coordinators behind the demo screens, and the [`Shell`] that owns the
//! surfaces they present on.
//!
//! ```text
//! WindowPort ── WindowNavigation "main" ── Root ─┬─ First ─┬─ First …   (push)
//!                                                │         └─ Second     (overlay)
//!                                                ├─ Second               (push)
//!                                                ├─ Confirm → bool       (overlay, response)
//!                                                └─ ThirdModal           (ModalNavigation "modal")
//!                                                     └─ First …         (push inside modal)
//! ```

mod confirm;
mod first;
mod root;
mod second;
mod third_modal;

pub use confirm::ConfirmCoordinator;
pub use first::FirstCoordinator;
pub use root::RootCoordinator;
pub use second::SecondCoordinator;
pub use third_modal::ThirdModalCoordinator;

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::rc::{Rc, Weak};

use log::debug;

use crate::core::config::MotionPreferences;
use crate::core::coordinator::Coordinator;
use crate::core::observer::FlowObserver;
use crate::core::router::{PresentationPort, RouterCore};
use crate::ports::{NavigationStack, OverlayPort, WindowNavigation, WindowPort};
use crate::tui::screen::{Screen, visible_screen};

type LocalTask = Pin<Box<dyn Future<Output = ()>>>;

/// Surfaces and shared state of the demo.
pub struct Shell {
    pub window: Rc<WindowPort>,
    pub main: Rc<WindowNavigation>,
    pub overlay: Rc<OverlayPort>,
    pub motion: MotionPreferences,
    pub observer: Rc<FlowObserver>,
    status: RefCell<String>,
    dirty: Cell<bool>,
    deferred: RefCell<Vec<LocalTask>>,
}

impl Shell {
    pub fn new(motion: MotionPreferences) -> Rc<Self> {
        let window = WindowPort::new();
        let main = WindowNavigation::new(NavigationStack::new("main"), Rc::clone(&window));
        let shell = Rc::new(Self {
            window,
            main,
            overlay: OverlayPort::new(),
            motion,
            observer: FlowObserver::new(),
            status: RefCell::new(String::new()),
            dirty: Cell::new(true),
            deferred: RefCell::new(Vec::new()),
        });

        let weak: Weak<Shell> = Rc::downgrade(&shell);
        shell.observer.on_event(move |_| {
            if let Some(shell) = weak.upgrade() {
                shell.mark_dirty();
            }
        });
        shell
    }

    /// A router on `port` that negotiates animation with the configured
    /// motion preferences.
    pub fn router(&self, port: Rc<dyn PresentationPort>) -> RouterCore {
        RouterCore::with_delegate(port, Rc::new(self.motion))
    }

    pub fn status(&self) -> String {
        self.status.borrow().clone()
    }

    pub fn set_status(&self, status: impl Into<String>) {
        *self.status.borrow_mut() = status.into();
        self.mark_dirty();
    }

    pub fn mark_dirty(&self) {
        self.dirty.set(true);
    }

    /// Returns whether anything changed since the last call.
    pub fn take_dirty(&self) -> bool {
        self.dirty.replace(false)
    }

    /// Queue a task for whoever drives the shell. Nothing runs until
    /// [`Shell::spawn_deferred`] is called.
    pub(crate) fn defer(&self, task: impl Future<Output = ()> + 'static) {
        self.deferred.borrow_mut().push(Box::pin(task));
    }

    pub fn deferred_count(&self) -> usize {
        self.deferred.borrow().len()
    }

    /// Spawn queued tasks on the current `LocalSet`. Returns how many were
    /// spawned.
    pub fn spawn_deferred(&self) -> usize {
        let tasks = std::mem::take(&mut *self.deferred.borrow_mut());
        let count = tasks.len();
        for task in tasks {
            tokio::task::spawn_local(task);
        }
        if count > 0 {
            debug!("Spawned {} deferred task(s)", count);
        }
        count
    }

    /// The screen that receives keys: the top overlay layer if any, else the
    /// top of the main stack.
    pub fn active_screen(&self) -> Option<Rc<Screen>> {
        match self.overlay.top() {
            Some(layer) => visible_screen(&layer),
            None => self.window.root().and_then(|root| visible_screen(&root)),
        }
    }

    /// Run the visible screen's action for `key`.
    pub fn activate(&self, key: char) -> bool {
        let Some(action) = self.active_screen().and_then(|s| s.action_for(key)) else {
            return false;
        };
        debug!("Activating {:?}", action);
        action.run();
        self.mark_dirty();
        true
    }

    /// User "back": swipe the top overlay away, or pop the main stack.
    pub fn back(&self) -> bool {
        let handled = self.overlay.user_dismiss() || self.main.stack().user_pop();
        if handled {
            self.mark_dirty();
        }
        handled
    }

    /// Release every surface. Views, and the coordinators riding on them, go
    /// with them.
    pub fn teardown(&self) {
        self.overlay.dismiss_entire_surface(false, None);
        self.main.dismiss_entire_surface(false, None);
    }
}

/// Start the demo: the root coordinator on the main surface.
pub fn launch(shell: &Rc<Shell>) -> Rc<RootCoordinator> {
    let root = RootCoordinator::new(Rc::clone(shell));
    shell.observer.observe(&root);
    root.launch(false);
    root
}

/// Wrap `f` as a screen action that holds `this` weakly.
pub(crate) fn on<C: 'static>(this: &Rc<C>, f: impl Fn(&Rc<C>) + 'static) -> impl Fn() + 'static {
    let weak = Rc::downgrade(this);
    move || {
        if let Some(this) = weak.upgrade() {
            f(&this);
        }
    }
}

/// Child hooks that also report to the shell's flow observer, so the title
/// bar can show what happened anywhere in the graph.
macro_rules! report_child_events {
    () => {
        fn child_registered(&self, child: &std::rc::Rc<dyn $crate::core::coordinator::Coordinator>) {
            self.core().register_child(child);
            $crate::core::coordinator::ParentNotifiable::on_child_registered(&*self.shell.observer, child);
        }

        fn child_finalized(&self, child: &$crate::core::coordinator::ChildKey) {
            self.core().forget_finalized_child(child);
            $crate::core::coordinator::ParentNotifiable::on_child_finalized(&*self.shell.observer, child);
        }

        fn child_dismiss_requested(&self, child: &$crate::core::router::RouterCore, animated: bool) {
            // Records, then hides through the child's port
            $crate::core::coordinator::ParentNotifiable::on_child_dismiss(&*self.shell.observer, child, animated);
        }

        fn child_dismissed_by_port(
            &self,
            child: &$crate::core::coordinator::ChildKey,
            id: $crate::core::coordinator::CoordinatorId,
        ) {
            self.core().forget_dismissed_child(child, id);
            $crate::core::coordinator::ParentNotifiable::on_child_dismissed_by_port(&*self.shell.observer, child, id);
        }
    };
}

pub(crate) use report_child_events;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::main_queue;
    use crate::core::observer::FlowEvent;
    use crate::tui::flows::first::FirstCoordinator;

    fn shell() -> Rc<Shell> {
        Shell::new(MotionPreferences::default())
    }

    #[test]
    fn test_launch_shows_root_on_window() {
        let shell = shell();
        let _root = launch(&shell);

        assert!(shell.window.has_root());
        assert_eq!(shell.active_screen().unwrap().title(), "Root");
        shell.teardown();
    }

    #[test]
    fn test_push_first_and_back() {
        let shell = shell();
        let root = launch(&shell);

        assert!(shell.activate('1'));
        assert_eq!(shell.active_screen().unwrap().title(), "First #1");
        assert!(root.child::<FirstCoordinator>(None).is_some());

        assert!(shell.back());
        main_queue::run_turn();
        assert_eq!(shell.active_screen().unwrap().title(), "Root");
        assert!(root.child::<FirstCoordinator>(None).is_none());
        assert!(shell
            .observer
            .events()
            .iter()
            .any(|e| matches!(e, FlowEvent::DismissedByPort(_))));
        shell.teardown();
    }

    #[test]
    fn test_first_dismiss_by_code() {
        let shell = shell();
        let root = launch(&shell);
        shell.activate('1');
        shell.activate('d');
        main_queue::run_turn();

        assert_eq!(shell.active_screen().unwrap().title(), "Root");
        assert!(root.child::<FirstCoordinator>(None).is_none());
        assert!(shell
            .observer
            .events()
            .iter()
            .any(|e| matches!(e, FlowEvent::Finalized(_))));
        shell.teardown();
    }

    #[test]
    fn test_unknown_key_is_ignored() {
        let shell = shell();
        let _root = launch(&shell);
        assert!(!shell.activate('z'));
        assert!(!shell.back());
        shell.teardown();
    }

    #[test]
    fn test_teardown_finalizes_root() {
        let shell = shell();
        let weak = Rc::downgrade(&launch(&shell));
        shell.teardown();
        assert!(weak.upgrade().is_none());
    }
}
