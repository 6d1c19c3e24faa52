//! Saved search service: storage and HTTP routes shared by the standalone server and
//! the fullstack frontend.

pub mod api;
pub mod config;
pub mod logging;
pub mod store;
