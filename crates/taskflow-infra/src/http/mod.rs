//! HTTP transport for the backend API.

mod client;

pub use client::{HttpApiClient, HttpConfig, REQUEST_ID_HEADER};
