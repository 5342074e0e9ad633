//! # TaskFlow Shared
//!
//! Wire types exchanged with the TaskFlow backend.
//! Kept free of client state so a server crate could reuse them unchanged.

pub mod dto;
pub mod response;

pub use response::{ErrorBody, ErrorDetail, ValidationIssue};
