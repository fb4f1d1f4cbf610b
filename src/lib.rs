//! Client for the tree stand site: pre-orders and the community posts board.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
pub mod util;
