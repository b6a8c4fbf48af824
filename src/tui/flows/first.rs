use std::rc::Rc;

use crate::core::coordinator::{Coordinator, CoordinatorCore};
use crate::core::router::{PresentationPort, RouterCoordinator, RouterCore};
use crate::tui::flows::{SecondCoordinator, Shell, on, report_child_events};
use crate::tui::screen::Screen;

/// Counter screen that can push another of itself.
pub struct FirstCoordinator {
    router: RouterCore,
    shell: Rc<Shell>,
    counter: u32,
}

impl FirstCoordinator {
    pub fn new(shell: Rc<Shell>, port: Rc<dyn PresentationPort>, counter: u32) -> Rc<Self> {
        Rc::new(Self {
            router: shell.router(port),
            shell,
            counter,
        })
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Next First goes on the same surface as this one.
    fn push_next(self: &Rc<Self>) {
        let port = Rc::clone(self.router.port());
        let next = FirstCoordinator::new(Rc::clone(&self.shell), port, self.counter + 1);
        self.coordinate(next, true);
    }

    fn show_second_modally(self: &Rc<Self>) {
        let overlay = Rc::clone(&self.shell.overlay);
        self.coordinate(SecondCoordinator::new(Rc::clone(&self.shell), overlay), true);
    }
}

impl Coordinator for FirstCoordinator {
    fn core(&self) -> &CoordinatorCore {
        self.router.core()
    }

    fn start(self: Rc<Self>, animated: bool) {
        let screen = Screen::builder(format!("First #{}", self.counter))
            .line(format!("Counter: {}", self.counter))
            .action('n', "Push next First", on(&self, |first| first.push_next()))
            .action('s', "Show Second modally", on(&self, |first| first.show_second_modally()))
            .action('d', "Dismiss", on(&self, |first| first.dismiss(true)))
            .build();
        self.present(screen, animated);
    }

    report_child_events!();
}

impl RouterCoordinator for FirstCoordinator {
    fn router(&self) -> &RouterCore {
        &self.router
    }
}
