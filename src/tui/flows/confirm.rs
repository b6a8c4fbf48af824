use std::cell::Cell;
use std::rc::Rc;

use crate::core::coordinator::{Coordinator, CoordinatorCore};
use crate::core::response::{ResponseCoordinator, Responder};
use crate::core::router::{RouterCoordinator, RouterCore};
use crate::core::view::downcast_view;
use crate::tui::flows::{Shell, on};
use crate::tui::screen::Screen;

/// Yes/no question on the overlay. Answers through a response channel and
/// leaves dismissal to whoever asked.
pub struct ConfirmCoordinator {
    router: RouterCore,
    question: String,
    value: Cell<bool>,
    responder: Responder<bool>,
}

impl ConfirmCoordinator {
    pub fn new(shell: Rc<Shell>, question: impl Into<String>) -> Rc<Self> {
        let overlay = Rc::clone(&shell.overlay);
        Rc::new(Self {
            router: shell.router(overlay),
            question: question.into(),
            value: Cell::new(false),
            responder: Responder::new(),
        })
    }

    pub fn value(&self) -> bool {
        self.value.get()
    }

    fn lines(&self) -> Vec<String> {
        let answer = if self.value.get() { "yes" } else { "no" };
        vec![self.question.clone(), format!("Current answer: {}", answer)]
    }

    fn toggle(&self) {
        self.value.set(!self.value.get());
        if let Some(screen) = self.root_view_handle().ok().and_then(|view| downcast_view::<Screen>(&view)) {
            screen.set_lines(self.lines());
        }
    }

    fn confirm(&self) {
        self.respond(self.value.get());
    }
}

impl Coordinator for ConfirmCoordinator {
    fn core(&self) -> &CoordinatorCore {
        self.router.core()
    }

    fn identifier(&self) -> Option<&str> {
        Some(self.question.as_str())
    }

    fn start(self: Rc<Self>, animated: bool) {
        let mut builder = Screen::builder("Confirm");
        for line in self.lines() {
            builder = builder.line(line);
        }
        let screen = builder
            .action('t', "Toggle answer", on(&self, |confirm| confirm.toggle()))
            .action('c', "Confirm", on(&self, |confirm| confirm.confirm()))
            .build();
        self.present(screen, animated);
    }
}

impl RouterCoordinator for ConfirmCoordinator {
    fn router(&self) -> &RouterCore {
        &self.router
    }
}

impl ResponseCoordinator for ConfirmCoordinator {
    type Response = bool;

    fn responder(&self) -> &Responder<bool> {
        &self.responder
    }
}
