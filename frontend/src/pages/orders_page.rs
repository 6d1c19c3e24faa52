use std::rc::Rc;

use common::{field::FieldKind, filter_map::FilterMap};
use dioxus::prelude::*;
use query_engine::{FieldDescriptor, OptionSource, OverlayContext};

use crate::{
    api::{
        customer_api::search_customers,
        saved_search_api::{DEMO_USER, saved_query_store},
    },
    components::{
        advanced_search::{AdvancedSearchButton, SearchOverlay},
        error_boundary::ComponentErrorBoundary,
    },
    data_definitions::{
        demo_orders::{Order, PAGE_SIZE, city_options, filter_orders, status_choices},
        orders_table::OrdersTable,
        overlay_handle::OverlayHandle,
    },
};

pub const ORDERS_PAGE_PATH: &str = "/orders";

fn orders_schema() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::text("orderNo", "Order No"),
        FieldDescriptor::text("customerId", "Customer").with_suggestions(OptionSource::remote(|keyword: String| async move {
            search_customers(keyword).await.map_err(|e| anyhow::anyhow!("customer lookup failed: {e}"))
        })),
        FieldDescriptor::text("city", "City").with_suggestions(OptionSource::matched(city_options())),
        FieldDescriptor::select("status", "Status", status_choices()),
        FieldDescriptor::new("createdAt", "Created", FieldKind::DateRange),
        FieldDescriptor::new("deliveryDate", "Delivery date", FieldKind::Date),
        FieldDescriptor::text("internalNote", "Internal note").hidden(),
        FieldDescriptor::new("actions", "Actions", FieldKind::Action),
    ]
}

/// Demo list page with the advanced search overlay attached to its table.
#[component]
pub fn OrdersPage() -> Element {
    let filters = use_signal(FilterMap::new);
    let mut page_index = use_signal(|| 0_usize);
    let refreshes = use_signal(|| 0_u64);
    let revision = use_signal(|| 0_u64);
    let table = OrdersTable { filters, page_index, refreshes };

    use_context_provider(move || {
        OverlayHandle::new(
            OverlayContext {
                page_path: ORDERS_PAGE_PATH.to_string(),
                current_user: DEMO_USER.to_string(),
                schema: orders_schema(),
                table: Rc::new(table),
                store: saved_query_store(),
            },
            revision,
        )
    });

    // rows follow refreshes only, not every filter write
    let rows = use_memo(move || {
        let _ = refreshes.read();
        filter_orders(&filters.peek())
    });
    let active_filters = use_memo(move || filters.read().len());
    let page_count = use_memo(move || rows.read().len().div_ceil(PAGE_SIZE).max(1));
    let visible_rows = use_memo(move || {
        let start = page_index() * PAGE_SIZE;
        rows.read().iter().skip(start).take(PAGE_SIZE).cloned().collect::<Vec<Order>>()
    });

    rsx! {
        Title { "Orders" }
        div {
            class: "orders-page",
            div {
                class: "orders-toolbar",
                h1 { "Orders" }
                AdvancedSearchButton { active_filters }
            }
            table {
                class: "orders-table",
                thead {
                    tr {
                        th { "Order No" }
                        th { "Customer" }
                        th { "City" }
                        th { "Status" }
                        th { "Created" }
                        th { "Delivery" }
                    }
                }
                tbody {
                    for order in visible_rows() {
                        tr {
                            key: "{order.order_no}",
                            td { "{order.order_no}" }
                            td { "{order.customer_name} ({order.customer_id})" }
                            td { "{order.city}" }
                            td { "{order.status}" }
                            td { "{order.created_at}" }
                            td { "{order.delivery_date}" }
                        }
                    }
                }
            }
            div {
                class: "orders-pager",
                button {
                    disabled: page_index() == 0,
                    onclick: move |_| page_index -= 1,
                    "Previous"
                }
                span { "Page {page_index() + 1} of {page_count}" }
                button {
                    disabled: page_index() + 1 >= page_count(),
                    onclick: move |_| page_index += 1,
                    "Next"
                }
            }
            ComponentErrorBoundary {
                SearchOverlay {}
            }
        }
    }
}
