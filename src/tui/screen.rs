//! # Screens
//!
//! The demo's view handle: a title, some text, and keyed actions. Coordinators
//! build screens and present them; the renderer only reads them.
//!
//! Action callbacks hold weak references to their coordinator. The screen
//! already owns the coordinator through its binding.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::core::view::{ViewBinding, ViewHandle, ViewRef, downcast_view};

type ActionFn = Rc<dyn Fn()>;

#[derive(Clone)]
pub struct ScreenAction {
    pub key: char,
    pub label: String,
    run: ActionFn,
}

impl ScreenAction {
    pub fn run(&self) {
        (self.run)();
    }
}

impl fmt::Debug for ScreenAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.key, self.label)
    }
}

pub struct Screen {
    title: String,
    lines: RefCell<Vec<String>>,
    actions: Vec<ScreenAction>,
    binding: ViewBinding,
}

impl Screen {
    pub fn builder(title: impl Into<String>) -> ScreenBuilder {
        ScreenBuilder {
            title: title.into(),
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    pub fn set_lines(&self, lines: Vec<String>) {
        *self.lines.borrow_mut() = lines;
    }

    pub fn actions(&self) -> &[ScreenAction] {
        &self.actions
    }

    pub fn action_for(&self, key: char) -> Option<ScreenAction> {
        self.actions.iter().find(|a| a.key == key).cloned()
    }
}

impl ViewHandle for Screen {
    fn binding(&self) -> &ViewBinding {
        &self.binding
    }

    fn name(&self) -> &str {
        &self.title
    }
}

impl fmt::Debug for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Screen")
            .field("title", &self.title)
            .field("actions", &self.actions)
            .finish()
    }
}

pub struct ScreenBuilder {
    title: String,
    lines: Vec<String>,
    actions: Vec<ScreenAction>,
}

impl ScreenBuilder {
    pub fn line(mut self, text: impl Into<String>) -> Self {
        self.lines.push(text.into());
        self
    }

    pub fn action(mut self, key: char, label: impl Into<String>, run: impl Fn() + 'static) -> Self {
        self.actions.push(ScreenAction {
            key,
            label: label.into(),
            run: Rc::new(run),
        });
        self
    }

    pub fn build(self) -> Rc<Screen> {
        Rc::new(Screen {
            title: self.title,
            lines: RefCell::new(self.lines),
            actions: self.actions,
            binding: ViewBinding::new(),
        })
    }
}

/// The screen a user actually sees in `view`: containers resolve to their
/// top entry, recursively.
pub fn visible_screen(view: &ViewRef) -> Option<Rc<Screen>> {
    match view.nested().last() {
        Some(top) => visible_screen(top),
        None => downcast_view::<Screen>(view),
    }
}

/// Names along the path to the visible screen, outermost first.
pub fn trail(view: &ViewRef) -> Vec<String> {
    let nested = view.nested();
    if nested.is_empty() {
        return vec![view.name().to_string()];
    }
    nested.iter().map(|v| v.name().to_string()).collect()
}
