//! Email verification route handlers
//!
//! - `POST /verification/request` issues a token and emails the link
//! - `GET /verify/{token}` redeems from the emailed link
//! - `POST /verification/redeem` redeems from a JSON body

pub mod redeem;
pub mod request;

pub use redeem::{redeem, verify_link};
pub use request::request_verification;
