//! HTTP adapter for the site API.

mod client;

pub use client::{ApiClient, classify_response};
