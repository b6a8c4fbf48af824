//! # Responses
//!
//! Single-shot value exchange between a modal flow and the flow that opened it.
//!
//! ```text
//! parent.coordinate_for_response(child) ──▶ ResponseChannel<T>   (caller awaits)
//!                                     └──▶ child.responder()     (wired sender)
//!
//! child.respond(v)           ──▶ Ok(v)
//! child dropped unresolved   ──▶ Err(ResponseError::Cancelled)
//! ```
//!
//! Built on `tokio::sync::oneshot`: a resolved sender is consumed, so a second
//! resolution has nothing to send on, and a sender dropped with its
//! coordinator closes the channel, which the receiving side reports as
//! cancellation. Nothing is ever left awaiting forever.

use std::cell::RefCell;
use std::fmt;

use log::{debug, warn};
use tokio::sync::oneshot;

use crate::core::router::RouterCoordinator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseError {
    /// The flow was abandoned before producing a value.
    Cancelled,
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseError::Cancelled => write!(f, "response cancelled: flow ended without a value"),
        }
    }
}

impl std::error::Error for ResponseError {}

/// Non-suspending view of a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseState<T> {
    Pending,
    Resolved(T),
    Cancelled,
}

/// Producer half handed to a [`Responder`] when the channel is wired.
pub struct ResponseSender<T>(oneshot::Sender<T>);

/// Consumer half returned to the caller of `coordinate_for_response`.
pub struct ResponseChannel<T> {
    receiver: oneshot::Receiver<T>,
}

pub fn response_channel<T>() -> (ResponseSender<T>, ResponseChannel<T>) {
    let (tx, rx) = oneshot::channel();
    (ResponseSender(tx), ResponseChannel { receiver: rx })
}

impl<T> ResponseChannel<T> {
    /// Wait for the flow's answer.
    pub async fn response(self) -> Result<T, ResponseError> {
        self.receiver.await.map_err(|_| ResponseError::Cancelled)
    }

    /// Check without suspending. A resolved value is handed out once; later
    /// calls report `Cancelled`.
    pub fn try_response(&mut self) -> ResponseState<T> {
        match self.receiver.try_recv() {
            Ok(value) => ResponseState::Resolved(value),
            Err(oneshot::error::TryRecvError::Empty) => ResponseState::Pending,
            Err(oneshot::error::TryRecvError::Closed) => ResponseState::Cancelled,
        }
    }
}

impl<T> fmt::Debug for ResponseChannel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseChannel").finish_non_exhaustive()
    }
}

// ============================================================================
// Responder
// ============================================================================

enum Slot<T> {
    Unwired,
    Wired(oneshot::Sender<T>),
    Finished,
}

/// Producer side embedded in a response coordinator.
///
/// Dropping it while still wired cancels the channel.
pub struct Responder<T> {
    slot: RefCell<Slot<T>>,
}

impl<T> Responder<T> {
    pub fn new() -> Self {
        Self {
            slot: RefCell::new(Slot::Unwired),
        }
    }

    pub(crate) fn wire(&self, sender: ResponseSender<T>) {
        let previous = self.slot.replace(Slot::Wired(sender.0));
        if matches!(previous, Slot::Wired(_)) {
            warn!("Responder rewired, previous channel cancelled");
        }
    }

    /// Deliver `value`. Returns `false` if it went nowhere.
    pub(crate) fn resolve(&self, value: T) -> bool {
        match self.slot.replace(Slot::Finished) {
            Slot::Wired(sender) => {
                let delivered = sender.send(value).is_ok();
                if !delivered {
                    debug!("Response dropped, caller stopped listening");
                }
                delivered
            }
            Slot::Unwired => {
                warn!("Response on a coordinator that was not coordinated for a response");
                self.slot.replace(Slot::Unwired);
                false
            }
            Slot::Finished => {
                debug!("Response already delivered, ignoring");
                false
            }
        }
    }

    /// Fail the channel with `Cancelled`. No-op once finished.
    pub fn cancel(&self) -> bool {
        match self.slot.replace(Slot::Finished) {
            Slot::Wired(_) => true,
            Slot::Unwired => {
                self.slot.replace(Slot::Unwired);
                false
            }
            Slot::Finished => false,
        }
    }

    /// Wired, unanswered and somebody is still listening.
    pub fn is_pending(&self) -> bool {
        matches!(&*self.slot.borrow(), Slot::Wired(sender) if !sender.is_closed())
    }
}

impl<T> Default for Responder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Responder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &*self.slot.borrow() {
            Slot::Unwired => "unwired",
            Slot::Wired(_) => "pending",
            Slot::Finished => "finished",
        };
        f.debug_tuple("Responder").field(&state).finish()
    }
}

/// A router coordinator that produces exactly one value for its caller.
pub trait ResponseCoordinator: RouterCoordinator {
    type Response: 'static;

    fn responder(&self) -> &Responder<Self::Response>;

    /// Hand the answer back. Only the first call counts; the caller is
    /// responsible for dismissing this coordinator afterwards.
    fn respond(&self, value: Self::Response) {
        if self.responder().resolve(value) {
            debug!("{} responded", self.child_key());
        }
    }
}
