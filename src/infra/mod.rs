//! Infrastructure adapters and runtime bootstrap.

pub mod error;
pub mod headless;
pub mod http;
pub mod telemetry;
