//! HTTP surface for EarlyAccess email verification
//!
//! Library exports for testing and for the `ea_api` binary.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use app::create_app;
pub use state::AppState;
