//! Request and response bodies

pub mod verification;

pub use verification::{
    RedeemRequest, RedeemResponse, RequestVerificationRequest, RequestVerificationResponse,
};
