//! Customer lookup used by the customer field's suggestions.

use common::suggest_option::SuggestOption;
use dioxus::prelude::*;

#[server]
pub async fn search_customers(keyword: String) -> Result<Vec<SuggestOption>, ServerFnError> {
    // simulated directory latency
    tokio::time::sleep(std::time::Duration::from_millis(120)).await;
    Ok(crate::data_definitions::demo_orders::customers_matching(&keyword))
}
