// String, expiration, and deletion operations

use redis::AsyncCommands;

use super::{check_key, CacheFacade};
use crate::error::CacheError;

impl CacheFacade {
    /// Set `key` to `value` with no expiration
    pub async fn set_string(&mut self, key: &str, value: &str) -> Result<(), CacheError> {
        check_key(key)?;
        let _: () = self.conn().set(key, value).await?;
        Ok(())
    }

    /// Set `key` to `value`, expiring `seconds` from now
    ///
    /// Uses the store's native SETEX, so the value and its TTL are applied
    /// atomically.
    pub async fn set_string_expire_in(
        &mut self,
        key: &str,
        value: &str,
        seconds: u64,
    ) -> Result<(), CacheError> {
        check_key(key)?;
        let _: () = self.conn().set_ex(key, value, seconds).await?;
        Ok(())
    }

    /// The value of `key`, or None if the key does not exist
    pub async fn get_string(&mut self, key: &str) -> Result<Option<String>, CacheError> {
        check_key(key)?;
        let value: Option<String> = self.conn().get(key).await?;
        Ok(value)
    }

    /// Expire `key` in `seconds` from now, replacing any prior TTL
    ///
    /// The returned flag reports whether the store applied the TTL; treat
    /// it as informational, not as proof of key existence.
    pub async fn set_expire_in(&mut self, key: &str, seconds: u64) -> Result<bool, CacheError> {
        check_key(key)?;
        let applied: bool = self.conn().expire(key, seconds as i64).await?;
        Ok(applied)
    }

    /// Expire `key` at an absolute deadline in epoch milliseconds
    ///
    /// The store's deadline granularity is seconds; the millisecond
    /// deadline is rounded up so a key never expires early.
    pub async fn set_expire_at(&mut self, key: &str, epoch_millis: u64) -> Result<bool, CacheError> {
        check_key(key)?;
        let deadline_secs = (epoch_millis + 999) / 1000;
        let applied: bool = self.conn().expire_at(key, deadline_secs as i64).await?;
        Ok(applied)
    }

    /// Delete `key` regardless of its collection type
    ///
    /// Returns 1 if the key was removed, 0 if it did not exist.
    pub async fn del_key(&mut self, key: &str) -> Result<u64, CacheError> {
        check_key(key)?;
        let removed: u64 = self.conn().del(key).await?;
        Ok(removed)
    }
}
