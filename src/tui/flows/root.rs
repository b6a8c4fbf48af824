use std::rc::{Rc, Weak};

use log::info;

use crate::core::coordinator::{Coordinator, CoordinatorCore};
use crate::core::response::ResponseError;
use crate::core::router::{RouterCoordinator, RouterCore};
use crate::ports::{ModalNavigation, NavigationStack};
use crate::tui::flows::{
    ConfirmCoordinator, FirstCoordinator, SecondCoordinator, Shell, ThirdModalCoordinator, on,
    report_child_events,
};
use crate::tui::screen::Screen;

/// Home screen on the main window stack.
pub struct RootCoordinator {
    router: RouterCore,
    shell: Rc<Shell>,
}

impl RootCoordinator {
    pub fn new(shell: Rc<Shell>) -> Rc<Self> {
        let port = Rc::clone(&shell.main);
        Rc::new(Self {
            router: shell.router(port),
            shell,
        })
    }

    fn show_first(self: &Rc<Self>) {
        let port = Rc::clone(&self.shell.main);
        self.coordinate(FirstCoordinator::new(Rc::clone(&self.shell), port, 1), true);
    }

    fn show_second(self: &Rc<Self>) {
        let port = Rc::clone(&self.shell.main);
        self.coordinate(SecondCoordinator::new(Rc::clone(&self.shell), port), true);
    }

    fn open_modal(self: &Rc<Self>) {
        let nav = ModalNavigation::new(NavigationStack::new("modal"), Rc::clone(&self.shell.overlay));
        self.coordinate(ThirdModalCoordinator::new(Rc::clone(&self.shell), nav), true);
    }

    /// Ask a yes/no question and show the answer once it arrives. The answer
    /// is awaited on a task the shell's driver spawns.
    fn ask(self: &Rc<Self>) {
        let confirm = ConfirmCoordinator::new(Rc::clone(&self.shell), "Enable notifications?");
        let asked: Weak<ConfirmCoordinator> = Rc::downgrade(&confirm);
        let channel = self.coordinate_for_response(confirm, true);
        let shell = Rc::downgrade(&self.shell);

        self.shell.defer(async move {
            let status = match channel.response().await {
                Ok(true) => "Answer: yes".to_string(),
                Ok(false) => "Answer: no".to_string(),
                Err(ResponseError::Cancelled) => "Answer: cancelled".to_string(),
            };
            info!("{}", status);
            if let Some(shell) = shell.upgrade() {
                shell.set_status(status);
            }
            // Responding does not dismiss; the asker does
            if let Some(confirm) = asked.upgrade() {
                confirm.dismiss(true);
            }
        });
    }
}

impl Coordinator for RootCoordinator {
    fn core(&self) -> &CoordinatorCore {
        self.router.core()
    }

    fn start(self: Rc<Self>, animated: bool) {
        let screen = Screen::builder("Root")
            .line("Each entry below is run by its own coordinator.")
            .action('1', "Show First", on(&self, |root| root.show_first()))
            .action('2', "Show Second", on(&self, |root| root.show_second()))
            .action('3', "Ask a question", on(&self, |root| root.ask()))
            .action('4', "Open modal flow", on(&self, |root| root.open_modal()))
            .build();
        self.present(screen, animated);
    }

    report_child_events!();
}

impl RouterCoordinator for RootCoordinator {
    fn router(&self) -> &RouterCore {
        &self.router
    }
}
