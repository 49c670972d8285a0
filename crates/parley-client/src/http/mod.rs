//! reqwest implementation of `ChatBackend`.
//!
//! Talks JSON to the service: POST for sign-up, sign-in and search, GET
//! for the current-user profile. Any non-2xx answer becomes
//! `ApiError::Status`, transport trouble becomes `NetworkError` or
//! `Timeout`, and a body that does not decode becomes `ParseError`.

mod api;
mod client;
mod config;


pub use client::HttpBackend;
pub use config::{HttpConfig, LoginFormat};
