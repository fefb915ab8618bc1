//! Route handlers

pub mod verification;
