pub mod orders_page;
