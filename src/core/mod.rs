//! # Coordinator Core
//!
//! The navigation ownership graph. It knows nothing about any specific UI
//! technology: views are opaque handles and surfaces are ports.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │          CORE           │
//!                    │     (this module)       │
//!                    │                         │
//!                    │  • Coordinator graph    │
//!                    │  • Router + ports       │
//!                    │  • Responses            │
//!                    │                         │
//!                    │  One thread. No I/O.    │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │   ports    │      │    TUI     │      │   tests    │
//!     │ (in-memory │      │   demo     │      │ (recording │
//!     │  surfaces) │      │ (ratatui)  │      │   ports)   │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`registry`]: `WeakRegistry`, keyed weak storage for children
//! - [`main_queue`]: the deferred-notification turn loop
//! - [`view`]: the view handle contract
//! - [`coordinator`]: `Coordinator`, `ParentNotifiable`, child lookup
//! - [`router`]: `RouterCoordinator`, `PresentationPort`, transition delegate
//! - [`response`]: `ResponseChannel`, `ResponseCoordinator`
//! - [`observer`]: `FlowObserver`, a recording parent for root flows
//! - [`config`]: settings and motion preferences

pub mod config;
pub mod coordinator;
pub mod main_queue;
pub mod observer;
pub mod registry;
pub mod response;
pub mod router;
pub mod view;

// Re-export commonly used types for convenience
pub use coordinator::{
    ChildKey, Coordinator, CoordinatorCore, CoordinatorId, CoordinatorKind, NoRootViewHandle, ParentNotifiable,
};
pub use response::{ResponseChannel, ResponseCoordinator, ResponseError, Responder};
pub use router::{PresentationPort, RouterCoordinator, RouterCore, TransitionDelegate};
pub use view::{ViewBinding, ViewHandle, ViewRef};
