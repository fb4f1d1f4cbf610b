//! Application services: the features running on the site page.

pub mod api;
pub mod board;
pub mod error;
pub mod pagination;
pub mod preorder;
pub mod site;
pub mod surface;
