pub mod builder;
pub mod config;
pub mod range;
pub mod state;
