use std::rc::Rc;

use crate::core::coordinator::{Coordinator, CoordinatorCore};
use crate::core::router::{RouterCoordinator, RouterCore};
use crate::ports::{ModalNavigation, PopAction, SurfaceAction};
use crate::tui::flows::{FirstCoordinator, Shell, on, report_child_events};
use crate::tui::screen::Screen;

/// Root of a modal that carries its own navigation stack.
pub struct ThirdModalCoordinator {
    router: RouterCore,
    shell: Rc<Shell>,
    nav: Rc<ModalNavigation>,
}

impl ThirdModalCoordinator {
    pub fn new(shell: Rc<Shell>, nav: Rc<ModalNavigation>) -> Rc<Self> {
        let port = Rc::clone(&nav);
        Rc::new(Self {
            router: shell.router(port),
            shell,
            nav,
        })
    }

    fn push_first(self: &Rc<Self>) {
        let port = Rc::clone(&self.nav);
        self.coordinate(FirstCoordinator::new(Rc::clone(&self.shell), port, 1), true);
    }

    fn pop_to_root(&self) {
        self.nav.perform(SurfaceAction::Pop(PopAction::ToRoot), true);
    }
}

impl Coordinator for ThirdModalCoordinator {
    fn core(&self) -> &CoordinatorCore {
        self.router.core()
    }

    fn start(self: Rc<Self>, animated: bool) {
        let screen = Screen::builder("Third (modal)")
            .line("A modal with a stack of its own.")
            .line("Esc swipes the whole modal away.")
            .action('n', "Push First inside the modal", on(&self, |third| third.push_first()))
            .action('r', "Pop modal to its root", on(&self, |third| third.pop_to_root()))
            .action('x', "Dismiss entire surface", on(&self, |third| third.dismiss_entire_surface(true)))
            .action('d', "Dismiss", on(&self, |third| third.dismiss(true)))
            .build();
        self.present(screen, animated);
    }

    report_child_events!();
}

impl RouterCoordinator for ThirdModalCoordinator {
    fn router(&self) -> &RouterCore {
        &self.router
    }
}
