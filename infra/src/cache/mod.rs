//! Cache module for Redis-backed storage
//!
//! This module provides the Redis client with connection retry logic and the
//! Redis implementations of the pending and confirmed email stores.

pub mod redis_client;
pub mod redis_confirmed_email;
pub mod redis_pending_verification;

#[cfg(test)]
mod tests;

pub use redis_client::RedisClient;
pub use redis_confirmed_email::RedisConfirmedEmailRepository;
pub use redis_pending_verification::RedisPendingVerificationRepository;

// Re-export commonly used types
pub use ea_shared::config::cache::CacheConfig;
