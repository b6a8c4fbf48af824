use std::rc::Rc;

use crate::core::coordinator::{Coordinator, CoordinatorCore};
use crate::core::router::{PresentationPort, RouterCoordinator, RouterCore};
use crate::tui::flows::{Shell, on};
use crate::tui::screen::Screen;

/// A leaf screen that can only go away.
pub struct SecondCoordinator {
    router: RouterCore,
}

impl SecondCoordinator {
    pub fn new(shell: Rc<Shell>, port: Rc<dyn PresentationPort>) -> Rc<Self> {
        Rc::new(Self {
            router: shell.router(port),
        })
    }
}

impl Coordinator for SecondCoordinator {
    fn core(&self) -> &CoordinatorCore {
        self.router.core()
    }

    fn start(self: Rc<Self>, animated: bool) {
        let screen = Screen::builder("Second")
            .line("Nothing to do here but leave.")
            .action('d', "Dismiss", on(&self, |second| second.dismiss(true)))
            .build();
        self.present(screen, animated);
    }
}

impl RouterCoordinator for SecondCoordinator {
    fn router(&self) -> &RouterCore {
        &self.router
    }
}
