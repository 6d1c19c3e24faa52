//! Common library exports shared between frontend, engine and backend.

extern crate serde;


pub mod suggest_option;
pub mod field;
pub mod filter_map;
pub mod saved_query;
pub mod fuzzy_match;
