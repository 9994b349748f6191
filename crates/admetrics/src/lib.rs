pub mod api;
pub mod display;
