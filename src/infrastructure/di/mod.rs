//! Application context wiring

pub mod app_context;

pub use app_context::AppContext;
