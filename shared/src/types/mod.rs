//! Type definitions module
//!
//! - `response` - API response wrappers

pub mod response;

pub use response::{ApiResponse, DetailedResponse, ErrorDetail, ResponseMeta, ResponseStatus};
