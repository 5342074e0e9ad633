//! # TaskFlow Core
//!
//! Client-side state for the TaskFlow task tracker.
//! This crate owns the session lifecycle, route protection and the task
//! collection, and reaches the outside world only through the traits in
//! [`ports`].

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{ClientError, RequestError, StorageError, ValidationError};
pub use services::{
    AuthService, DeleteOutcome, FetchOutcome, GuardDecision, Route, RouteGuard, SessionStore,
    TaskCollectionManager,
};
