pub mod focus;
pub mod phase;
