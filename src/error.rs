//! Cache error types
//!
//! This module defines error types for facade and pool operations.

use redis::RedisError;

/// Cache error types
#[derive(Debug, Clone)]
pub enum CacheError {
    /// A required argument was empty (empty key, empty value set, ...)
    /// Raised by the facade before any network call is made.
    InvalidArgument(String),
    /// The pool could not produce a handle, or the network call failed
    StoreUnavailable(String),
    /// A command was applied to a key holding an incompatible value type
    WrongType(String),
    /// Any other error reported by the store
    Store(String),
    /// Configuration error
    Configuration(String),
}

impl std::fmt::Display for CacheError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            CacheError::StoreUnavailable(msg) => write!(f, "Store unavailable: {}", msg),
            CacheError::WrongType(msg) => write!(f, "Wrong type operation: {}", msg),
            CacheError::Store(msg) => write!(f, "Store error: {}", msg),
            CacheError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for CacheError {}

impl From<RedisError> for CacheError {
    fn from(err: RedisError) -> Self {
        // WRONGTYPE is a server error code, not a distinct client error kind
        if err.code() == Some("WRONGTYPE") {
            return CacheError::WrongType(err.to_string());
        }
        if err.is_io_error()
            || err.is_timeout()
            || err.is_connection_refusal()
            || err.is_connection_dropped()
        {
            return CacheError::StoreUnavailable(err.to_string());
        }
        CacheError::Store(err.to_string())
    }
}
