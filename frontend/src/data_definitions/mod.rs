pub mod demo_orders;
pub mod orders_table;
pub mod overlay_handle;
