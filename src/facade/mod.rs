// Cache facade module
//
// Single-purpose-per-method API over the store's string, hash, list, and
// sorted-set primitives. Every operation validates its arguments before
// touching the network and surfaces store failures unchanged; the only
// normalization is the documented absent -> None / empty handling.

mod hashes;
mod lists;
mod strings;
mod zsets;

use crate::error::CacheError;
use crate::pool::{ShardedConn, StoreHandle, StorePool};

/// Validated facade over the store
///
/// Holds exactly one leased connection handle, acquired at construction
/// and released exactly once when the facade is dropped or `exit` is
/// called. Operations take `&mut self`: one instance is never shared
/// across tasks, which is also what the underlying handle requires.
pub struct CacheFacade {
    handle: StoreHandle,
}

impl CacheFacade {
    /// Lease a handle from `pool` and wrap it
    pub async fn acquire(pool: &StorePool) -> Result<Self, CacheError> {
        let handle = pool.acquire().await?;
        Ok(Self { handle })
    }

    /// Release the handle back to its pool
    ///
    /// Consumes the facade, so the lease cannot be returned twice. Plain
    /// drop releases the lease as well; `exit` is the explicit form for
    /// call sites that want the release visible.
    pub fn exit(self) {}

    /// The raw underlying connection
    ///
    /// Advanced use only: commands issued through this bypass the
    /// facade's argument validation and absence normalization.
    pub fn raw_connection(&mut self) -> &mut ShardedConn {
        self.handle.connection()
    }

    pub(crate) fn conn(&mut self) -> &mut ShardedConn {
        self.handle.connection()
    }
}

/// Reject empty keys before any network call
pub(crate) fn check_key(key: &str) -> Result<(), CacheError> {
    if key.is_empty() {
        return Err(CacheError::InvalidArgument(
            "key must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Reject empty argument collections (nothing to push, set, or remove)
pub(crate) fn check_non_empty(what: &str, count: usize) -> Result<(), CacheError> {
    if count == 0 {
        return Err(CacheError::InvalidArgument(format!(
            "{} must not be empty",
            what
        )));
    }
    Ok(())
}
