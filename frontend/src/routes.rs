use dioxus::prelude::*;

use crate::pages::orders_page::OrdersPage;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/")]
    OrdersPage {},
}
