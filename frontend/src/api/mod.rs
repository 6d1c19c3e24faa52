pub mod customer_api;
pub mod saved_search_api;
