//! # Navigation Stack
//!
//! An in-memory stack port. The stack is itself a view handle (the
//! container), so an outer port can present it as a whole; its entries are
//! reported as nested handles.
//!
//! ```text
//! NavigationStack ("main")
//! ├── [0] Root        ← root entry, never popped by ToParent
//! ├── [1] First
//! └── [2] First       ← top
//! ```
//!
//! `present` pushes, `dismiss` pops to the parent, `dismiss_entire_surface`
//! clears. [`NavigationStack::user_pop`] models a back gesture: the popped
//! handle is told it was dismissed by the port.
//!
//! Transitions complete synchronously; completions run right after the state
//! change.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};

use crate::core::router::{Completion, PresentationPort};
use crate::core::view::{ViewBinding, ViewHandle, ViewRef, notify_tree_dismissed_by_port, same_view};

/// How far a pop goes.
#[derive(Clone)]
pub enum PopAction {
    ToRoot,
    ToParent,
    /// Pop until this handle is on top. No-op if it is not in the stack.
    ToView(ViewRef),
}

impl std::fmt::Debug for PopAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PopAction::ToRoot => f.write_str("ToRoot"),
            PopAction::ToParent => f.write_str("ToParent"),
            PopAction::ToView(view) => write!(f, "ToView({})", view.name()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackTransition {
    Push { view: String, animated: bool },
    Pop { count: usize, animated: bool },
    Clear { count: usize },
}

pub struct NavigationStack {
    name: String,
    binding: ViewBinding,
    entries: RefCell<Vec<ViewRef>>,
    journal: RefCell<Vec<StackTransition>>,
}

impl NavigationStack {
    pub fn new(name: impl Into<String>) -> Rc<Self> {
        Rc::new(Self {
            name: name.into(),
            binding: ViewBinding::new(),
            entries: RefCell::new(Vec::new()),
            journal: RefCell::new(Vec::new()),
        })
    }

    pub fn push(&self, view: ViewRef, animated: bool) {
        debug!("{}: push {} (animated: {})", self.name, view.name(), animated);
        self.journal.borrow_mut().push(StackTransition::Push {
            view: view.name().to_string(),
            animated,
        });
        self.entries.borrow_mut().push(view);
    }

    /// Pop according to `action`. Returns the popped handles, top first.
    pub fn pop(&self, action: PopAction, animated: bool) -> Vec<ViewRef> {
        let keep = {
            let entries = self.entries.borrow();
            match &action {
                PopAction::ToRoot => entries.len().min(1),
                PopAction::ToParent if entries.len() > 1 => entries.len() - 1,
                PopAction::ToParent => {
                    debug!("{}: nothing above the root to pop", self.name);
                    entries.len()
                }
                PopAction::ToView(target) => match entries.iter().position(|v| same_view(v, target)) {
                    Some(index) => index + 1,
                    None => {
                        warn!("{}: {} is not in the stack, pop ignored", self.name, target.name());
                        entries.len()
                    }
                },
            }
        };

        let mut popped = self.entries.borrow_mut().split_off(keep);
        popped.reverse();
        if !popped.is_empty() {
            debug!("{}: {:?} popped {} (animated: {})", self.name, action, popped.len(), animated);
            self.journal.borrow_mut().push(StackTransition::Pop {
                count: popped.len(),
                animated,
            });
        }
        popped
    }

    /// Remove every entry.
    pub fn clear(&self) -> Vec<ViewRef> {
        let cleared = std::mem::take(&mut *self.entries.borrow_mut());
        if !cleared.is_empty() {
            debug!("{}: cleared {} entr(ies)", self.name, cleared.len());
            self.journal.borrow_mut().push(StackTransition::Clear {
                count: cleared.len(),
            });
        }
        cleared
    }

    /// Back gesture: pop the top entry and tell it the port removed it.
    pub fn user_pop(&self) -> bool {
        let Some(popped) = self.pop(PopAction::ToParent, true).into_iter().next() else {
            return false;
        };
        debug!("{}: user popped {}", self.name, popped.name());
        notify_tree_dismissed_by_port(&popped);
        true
    }

    pub fn has_presented_root(&self) -> bool {
        !self.entries.borrow().is_empty()
    }

    pub fn has_pushed_entries(&self) -> bool {
        self.entries.borrow().len() > 1
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn top(&self) -> Option<ViewRef> {
        self.entries.borrow().last().cloned()
    }

    pub fn entries(&self) -> Vec<ViewRef> {
        self.entries.borrow().clone()
    }

    pub fn journal(&self) -> Vec<StackTransition> {
        self.journal.borrow().clone()
    }

    pub fn last_transition(&self) -> Option<StackTransition> {
        self.journal.borrow().last().cloned()
    }
}

impl ViewHandle for NavigationStack {
    fn binding(&self) -> &ViewBinding {
        &self.binding
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn nested(&self) -> Vec<ViewRef> {
        self.entries()
    }
}

impl PresentationPort for NavigationStack {
    fn present(&self, view: ViewRef, animated: bool) {
        self.push(view, animated);
    }

    fn dismiss(&self, animated: bool, on_complete: Option<Completion>) {
        let popped = self.pop(PopAction::ToParent, animated);
        drop(popped);
        if let Some(done) = on_complete {
            done();
        }
    }

    /// Pops `view` and everything above it. The root entry stays, as with
    /// `dismiss`.
    fn dismiss_view(&self, view: &ViewRef, animated: bool, on_complete: Option<Completion>) {
        let below = {
            let entries = self.entries.borrow();
            match entries.iter().position(|entry| same_view(entry, view)) {
                Some(0) => {
                    debug!("{}: {} is the root, dismiss ignored", self.name, view.name());
                    None
                }
                Some(index) => Some(Rc::clone(&entries[index - 1])),
                None => {
                    debug!("{}: {} is not in the stack, dismiss ignored", self.name, view.name());
                    None
                }
            }
        };
        if let Some(parent) = below {
            let popped = self.pop(PopAction::ToView(parent), animated);
            drop(popped);
        }
        if let Some(done) = on_complete {
            done();
        }
    }

    fn dismiss_entire_surface(&self, _animated: bool, on_complete: Option<Completion>) {
        let cleared = self.clear();
        drop(cleared);
        if let Some(done) = on_complete {
            done();
        }
    }
}

impl std::fmt::Debug for NavigationStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self
            .entries
            .borrow()
            .iter()
            .map(|v| v.name().to_string())
            .collect();
        f.debug_struct("NavigationStack")
            .field("name", &self.name)
            .field("entries", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestView;
    use std::cell::Cell;

    fn stack_of(names: &[&str]) -> (Rc<NavigationStack>, Vec<ViewRef>) {
        let stack = NavigationStack::new("test");
        let views: Vec<ViewRef> = names.iter().map(|n| TestView::named(n)).collect();
        for view in &views {
            stack.push(view.clone(), false);
        }
        (stack, views)
    }

    #[test]
    fn test_root_and_pushed_flags() {
        let stack = NavigationStack::new("flags");
        assert!(!stack.has_presented_root());
        stack.push(TestView::named("root"), false);
        assert!(stack.has_presented_root());
        assert!(!stack.has_pushed_entries());
        stack.push(TestView::named("next"), true);
        assert!(stack.has_pushed_entries());
    }

    #[test]
    fn test_dismiss_pops_to_parent_but_keeps_root() {
        let (stack, _) = stack_of(&["root", "a"]);
        stack.dismiss(true, None);
        assert_eq!(stack.len(), 1);
        stack.dismiss(true, None);
        assert_eq!(stack.len(), 1);
        assert_eq!(
            stack.last_transition(),
            Some(StackTransition::Pop { count: 1, animated: true })
        );
    }

    #[test]
    fn test_pop_to_root() {
        let (stack, _) = stack_of(&["root", "a", "b", "c"]);
        let popped = stack.pop(PopAction::ToRoot, false);
        let names: Vec<_> = popped.iter().map(|v| v.name().to_string()).collect();
        assert_eq!(names, vec!["c", "b", "a"]);
        assert_eq!(stack.top().unwrap().name(), "root");
    }

    #[test]
    fn test_pop_to_view() {
        let (stack, views) = stack_of(&["root", "a", "b", "c"]);
        stack.pop(PopAction::ToView(views[1].clone()), true);
        assert_eq!(stack.len(), 2);
        assert!(same_view(&stack.top().unwrap(), &views[1]));

        let stranger = TestView::named("stranger");
        assert!(stack.pop(PopAction::ToView(stranger), true).is_empty());
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_dismiss_entire_surface_clears_and_completes() {
        let (stack, _) = stack_of(&["root", "a"]);
        let done = Rc::new(Cell::new(false));
        let d = done.clone();
        stack.dismiss_entire_surface(false, Some(Box::new(move || d.set(true))));

        assert!(stack.is_empty());
        assert!(done.get());
        assert_eq!(stack.last_transition(), Some(StackTransition::Clear { count: 2 }));
    }

    #[test]
    fn test_user_pop_notifies_popped_view() {
        let (stack, views) = stack_of(&["root", "a"]);
        let notified = Rc::new(Cell::new(false));
        let n = notified.clone();
        views[1].binding().on_dismissed_by_port(move || n.set(true));

        assert!(stack.user_pop());
        assert!(notified.get());
        assert!(!stack.user_pop());
    }

    #[test]
    fn test_dismiss_view_pops_everything_above_it() {
        let (stack, views) = stack_of(&["root", "a", "b", "c"]);
        stack.dismiss_view(&views[1], true, None);
        assert_eq!(stack.len(), 1);
        assert_eq!(
            stack.last_transition(),
            Some(StackTransition::Pop { count: 3, animated: true })
        );

        stack.dismiss_view(&views[0], true, None);
        stack.dismiss_view(&views[2], true, None);
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_nested_reports_entries() {
        let (stack, _) = stack_of(&["root", "a"]);
        let container: ViewRef = stack.clone();
        assert_eq!(container.nested().len(), 2);
        assert_eq!(container.name(), "test");
    }
}
