//! Client-state services built on the ports.

mod auth;
mod guard;
mod session_store;
mod tasks;

pub use auth::AuthService;
pub use guard::{GuardDecision, Route, RouteGuard, UnknownRoute, evaluate};
pub use session_store::SessionStore;
pub use tasks::{
    CollectionSnapshot, DELETE_PROMPT, DeleteOutcome, FetchOutcome, TaskCollectionManager,
};
