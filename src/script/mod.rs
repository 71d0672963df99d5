pub mod caption;
