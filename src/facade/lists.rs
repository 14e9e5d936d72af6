// List operations

use redis::AsyncCommands;

use super::{check_key, check_non_empty, CacheFacade};
use crate::error::CacheError;

impl CacheFacade {
    /// Push values onto the head of the list, one by one in argument order
    ///
    /// Returns the list length after the push.
    pub async fn left_push_list(&mut self, key: &str, values: &[&str]) -> Result<u64, CacheError> {
        check_key(key)?;
        check_non_empty("values", values.len())?;
        let len: u64 = self.conn().lpush(key, values).await?;
        Ok(len)
    }

    /// Push values onto the tail of the list
    ///
    /// Returns the list length after the push.
    pub async fn right_push_list(&mut self, key: &str, values: &[&str]) -> Result<u64, CacheError> {
        check_key(key)?;
        check_non_empty("values", values.len())?;
        let len: u64 = self.conn().rpush(key, values).await?;
        Ok(len)
    }

    /// Head push, then expire the key `seconds` from now
    ///
    /// Two round trips, not a transaction; a crash between them leaves the
    /// list without the TTL.
    pub async fn left_push_list_expire_in(
        &mut self,
        key: &str,
        seconds: u64,
        values: &[&str],
    ) -> Result<u64, CacheError> {
        let len = self.left_push_list(key, values).await?;
        self.set_expire_in(key, seconds).await?;
        Ok(len)
    }

    /// Tail push, then expire the key `seconds` from now
    pub async fn right_push_list_expire_in(
        &mut self,
        key: &str,
        seconds: u64,
        values: &[&str],
    ) -> Result<u64, CacheError> {
        let len = self.right_push_list(key, values).await?;
        self.set_expire_in(key, seconds).await?;
        Ok(len)
    }

    /// Remove and return the head element
    ///
    /// None when the list is empty or absent. Absence comes from the
    /// client's nil reply, never from comparing against a sentinel string.
    pub async fn left_pop_list(&mut self, key: &str) -> Result<Option<String>, CacheError> {
        check_key(key)?;
        let value: Option<String> = self.conn().lpop(key, None).await?;
        Ok(value)
    }

    /// Remove and return the tail element, or None when empty or absent
    pub async fn right_pop_list(&mut self, key: &str) -> Result<Option<String>, CacheError> {
        check_key(key)?;
        let value: Option<String> = self.conn().rpop(key, None).await?;
        Ok(value)
    }

    /// Keep only the inclusive index range [start, stop]
    ///
    /// Indices are 0-based; negative indices count from the tail (-1 is
    /// the last element). Out-of-range bounds never error: a start past
    /// the list, or start > stop, leaves an empty list.
    pub async fn trim_list(
        &mut self,
        key: &str,
        start: isize,
        stop: isize,
    ) -> Result<(), CacheError> {
        check_key(key)?;
        let _: () = self.conn().ltrim(key, start, stop).await?;
        Ok(())
    }

    /// The inclusive index range [start, stop]
    ///
    /// Same negative-index convention as `trim_list`. A stop past the list
    /// end is clamped to the last element; an out-of-range start yields an
    /// empty sequence.
    pub async fn get_range_list(
        &mut self,
        key: &str,
        start: isize,
        stop: isize,
    ) -> Result<Vec<String>, CacheError> {
        check_key(key)?;
        let range: Vec<String> = self.conn().lrange(key, start, stop).await?;
        Ok(range)
    }

    /// Remove every element equal to `value`; returns the count removed
    pub async fn remove_all_in_list(&mut self, key: &str, value: &str) -> Result<u64, CacheError> {
        check_key(key)?;
        let removed: u64 = self.conn().lrem(key, 0, value).await?;
        Ok(removed)
    }

    /// Remove up to `count` elements equal to `value`, scanning head to tail
    ///
    /// `count` is taken by magnitude; the scan direction is encoded by
    /// sign in the store's convention (positive = head to tail). Returns
    /// the count actually removed.
    pub async fn remove_head_to_tail_in_list(
        &mut self,
        key: &str,
        value: &str,
        count: i64,
    ) -> Result<u64, CacheError> {
        check_key(key)?;
        let magnitude = count.unsigned_abs() as isize;
        let removed: u64 = self.conn().lrem(key, magnitude, value).await?;
        Ok(removed)
    }

    /// Remove up to `count` elements equal to `value`, scanning tail to head
    pub async fn remove_tail_to_head_in_list(
        &mut self,
        key: &str,
        value: &str,
        count: i64,
    ) -> Result<u64, CacheError> {
        check_key(key)?;
        let magnitude = count.unsigned_abs() as isize;
        let removed: u64 = self.conn().lrem(key, -magnitude, value).await?;
        Ok(removed)
    }

    /// The list length; 0 when the key is absent
    ///
    /// A key holding a non-list value is a `WrongType` error from the store.
    pub async fn get_list_length(&mut self, key: &str) -> Result<u64, CacheError> {
        check_key(key)?;
        let len: u64 = self.conn().llen(key).await?;
        Ok(len)
    }
}
