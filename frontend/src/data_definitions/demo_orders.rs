//! Fixed order list backing the demo page.

use common::{
    filter_map::{FilterMap, FilterValue},
    suggest_option::SuggestOption,
};

pub const PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub order_no: &'static str,
    pub customer_id: &'static str,
    pub customer_name: &'static str,
    pub city: &'static str,
    pub status: &'static str,
    pub created_at: &'static str,
    pub delivery_date: &'static str,
}

const fn order(
    order_no: &'static str,
    customer_id: &'static str,
    customer_name: &'static str,
    city: &'static str,
    status: &'static str,
    created_at: &'static str,
    delivery_date: &'static str,
) -> Order {
    Order { order_no, customer_id, customer_name, city, status, created_at, delivery_date }
}

pub const ORDERS: &[Order] = &[
    order("SO-1001", "C-01", "Acme Trading", "BJ", "active", "2024-01-03", "2024-01-10"),
    order("SO-1002", "C-02", "Borealis Foods", "SH", "closed", "2024-01-05", "2024-01-09"),
    order("SO-1003", "C-01", "Acme Trading", "GZ", "active", "2024-01-11", "2024-01-20"),
    order("SO-1004", "C-03", "Cobalt Works", "BJ", "pending", "2024-01-17", "2024-01-25"),
    order("SO-1005", "C-04", "Delta Logistics", "SZ", "active", "2024-02-01", "2024-02-08"),
    order("SO-1006", "C-02", "Borealis Foods", "BJ", "active", "2024-02-04", "2024-02-12"),
    order("SO-1007", "C-05", "Acorn Supplies", "SH", "closed", "2024-02-10", "2024-02-15"),
    order("SO-1008", "C-03", "Cobalt Works", "GZ", "active", "2024-02-19", "2024-02-28"),
    order("SO-1009", "C-04", "Delta Logistics", "BJ", "pending", "2024-03-02", "2024-03-11"),
    order("SO-1010", "C-05", "Acorn Supplies", "SZ", "active", "2024-03-06", "2024-03-14"),
    order("SO-1011", "C-01", "Acme Trading", "SH", "closed", "2024-03-15", "2024-03-21"),
    order("SO-1012", "C-06", "Everbright Retail", "BJ", "active", "2024-03-22", "2024-03-30"),
];

pub fn status_choices() -> Vec<SuggestOption> {
    vec![
        SuggestOption::new("Active", "active"),
        SuggestOption::new("Pending", "pending"),
        SuggestOption::new("Closed", "closed"),
    ]
}

pub fn city_options() -> Vec<SuggestOption> {
    vec![
        SuggestOption::new("北京", "BJ"),
        SuggestOption::new("上海", "SH"),
        SuggestOption::new("广州", "GZ"),
        SuggestOption::new("深圳", "SZ"),
    ]
}

/// Customers whose id or name contains `keyword`, one option per customer.
pub fn customers_matching(keyword: &str) -> Vec<SuggestOption> {
    let keyword = keyword.to_lowercase();
    let mut options: Vec<SuggestOption> = Vec::new();
    for order in ORDERS {
        let hit = order.customer_id.to_lowercase().contains(&keyword)
            || order.customer_name.to_lowercase().contains(&keyword);
        if hit && !options.iter().any(|o| o.value == order.customer_id) {
            options.push(SuggestOption::new(format!("{} ({})", order.customer_name, order.customer_id), order.customer_id));
        }
    }
    options
}

fn text_matches(field: &str, value: &FilterValue) -> bool {
    match value.as_text() {
        Some(text) => field.to_lowercase().contains(&text.to_lowercase()),
        None => true,
    }
}

/// Unknown keys do not constrain anything.
pub fn order_matches(order: &Order, filters: &FilterMap) -> bool {
    filters.iter().all(|(key, value)| match key.as_str() {
        "orderNo" => text_matches(order.order_no, value),
        "customerId" => text_matches(order.customer_id, value),
        "city" => value.as_text().is_none_or(|city| city == order.city),
        "status" => value.as_text().is_none_or(|status| status == order.status),
        "deliveryDate" => value.as_text().is_none_or(|date| date == order.delivery_date),
        "createdAt" => value.as_date_range().is_none_or(|(start, end)| {
            (start.is_empty() || order.created_at >= start) && (end.is_empty() || order.created_at <= end)
        }),
        _ => true,
    })
}

pub fn filter_orders(filters: &FilterMap) -> Vec<Order> {
    ORDERS.iter().filter(|order| order_matches(order, filters)).cloned().collect()
}
