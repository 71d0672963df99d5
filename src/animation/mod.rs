pub mod curve;
pub mod ease;
pub mod spring;
