pub mod advanced_search;
pub mod error_boundary;
