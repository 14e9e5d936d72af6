// Sorted-set operations
//
// Members are unique; ordering is by score ascending, ties broken
// lexicographically by member. Ranks are 0-based in that ordering, and
// negative ranks count from the highest score.

use redis::AsyncCommands;

use super::{check_key, check_non_empty, CacheFacade};
use crate::error::CacheError;

impl CacheFacade {
    /// Insert `member` with `score`, or update its score if present
    ///
    /// Returns true when the member was newly inserted, false when an
    /// existing member's score was updated (re-sorting is implicit).
    pub async fn append_zset(
        &mut self,
        key: &str,
        score: f64,
        member: &str,
    ) -> Result<bool, CacheError> {
        check_key(key)?;
        let inserted: bool = self.conn().zadd(key, member, score).await?;
        Ok(inserted)
    }

    /// Insert or update several (score, member) pairs in one command
    ///
    /// Returns the count of newly inserted members; score-only updates on
    /// existing members are not counted.
    pub async fn append_zset_multi(
        &mut self,
        key: &str,
        entries: &[(f64, &str)],
    ) -> Result<u64, CacheError> {
        check_key(key)?;
        check_non_empty("entries", entries.len())?;
        let inserted: u64 = self.conn().zadd_multiple(key, entries).await?;
        Ok(inserted)
    }

    /// Append one member, then expire the key `seconds` from now
    ///
    /// Two round trips, not a transaction; a crash between them leaves the
    /// set without the TTL.
    pub async fn append_zset_expire_in(
        &mut self,
        key: &str,
        score: f64,
        member: &str,
        seconds: u64,
    ) -> Result<bool, CacheError> {
        let inserted = self.append_zset(key, score, member).await?;
        self.set_expire_in(key, seconds).await?;
        Ok(inserted)
    }

    /// Append several members, then expire the key `seconds` from now
    pub async fn append_zset_multi_expire_in(
        &mut self,
        key: &str,
        entries: &[(f64, &str)],
        seconds: u64,
    ) -> Result<u64, CacheError> {
        let inserted = self.append_zset_multi(key, entries).await?;
        self.set_expire_in(key, seconds).await?;
        Ok(inserted)
    }

    /// Remove the named members
    ///
    /// Non-existent members are silently ignored; returns the count
    /// actually removed.
    pub async fn remove_zset_members(
        &mut self,
        key: &str,
        members: &[&str],
    ) -> Result<u64, CacheError> {
        check_key(key)?;
        check_non_empty("members", members.len())?;
        let removed: u64 = self.conn().zrem(key, members).await?;
        Ok(removed)
    }

    /// Remove all members with score in [min, max] inclusive
    pub async fn remove_zset_by_score(
        &mut self,
        key: &str,
        min: f64,
        max: f64,
    ) -> Result<u64, CacheError> {
        check_key(key)?;
        let removed: u64 = self.conn().zrembyscore(key, min, max).await?;
        Ok(removed)
    }

    /// Remove members in the rank range [start, stop]
    pub async fn remove_zset_by_rank(
        &mut self,
        key: &str,
        start: isize,
        stop: isize,
    ) -> Result<u64, CacheError> {
        check_key(key)?;
        let removed: u64 = self.conn().zremrangebyrank(key, start, stop).await?;
        Ok(removed)
    }

    /// Members in the rank range [start, stop], ascending score order
    ///
    /// Same negative-index convention as lists: -1 is the highest score.
    pub async fn get_range_zset(
        &mut self,
        key: &str,
        start: isize,
        stop: isize,
    ) -> Result<Vec<String>, CacheError> {
        check_key(key)?;
        let members: Vec<String> = self.conn().zrange(key, start, stop).await?;
        Ok(members)
    }

    /// Members in the rank range [start, stop], each paired with its score
    pub async fn get_range_zset_with_scores(
        &mut self,
        key: &str,
        start: isize,
        stop: isize,
    ) -> Result<Vec<(String, f64)>, CacheError> {
        check_key(key)?;
        let members: Vec<(String, f64)> = self.conn().zrange_withscores(key, start, stop).await?;
        Ok(members)
    }

    /// Members with score in [min, max] inclusive, ascending order
    pub async fn get_range_zset_by_score(
        &mut self,
        key: &str,
        min: f64,
        max: f64,
    ) -> Result<Vec<String>, CacheError> {
        check_key(key)?;
        let members: Vec<String> = self.conn().zrangebyscore(key, min, max).await?;
        Ok(members)
    }

    /// Members with score in [min, max] inclusive, paired with their scores
    pub async fn get_range_zset_by_score_with_scores(
        &mut self,
        key: &str,
        min: f64,
        max: f64,
    ) -> Result<Vec<(String, f64)>, CacheError> {
        check_key(key)?;
        let members: Vec<(String, f64)> =
            self.conn().zrangebyscore_withscores(key, min, max).await?;
        Ok(members)
    }

    /// The member's 0-based ascending rank, or None if member or key is absent
    pub async fn get_zset_rank(
        &mut self,
        key: &str,
        member: &str,
    ) -> Result<Option<u64>, CacheError> {
        check_key(key)?;
        let rank: Option<u64> = self.conn().zrank(key, member).await?;
        Ok(rank)
    }

    /// The set's cardinality; 0 when the key is absent
    pub async fn get_zset_length(&mut self, key: &str) -> Result<u64, CacheError> {
        check_key(key)?;
        let len: u64 = self.conn().zcard(key).await?;
        Ok(len)
    }

    /// Count of members with score in [min, max] inclusive
    pub async fn count_zset_by_score(
        &mut self,
        key: &str,
        min: f64,
        max: f64,
    ) -> Result<u64, CacheError> {
        check_key(key)?;
        let count: u64 = self.conn().zcount(key, min, max).await?;
        Ok(count)
    }

    /// The member's score, or None if member or key is absent
    pub async fn get_zset_score(
        &mut self,
        key: &str,
        member: &str,
    ) -> Result<Option<f64>, CacheError> {
        check_key(key)?;
        let score: Option<f64> = self.conn().zscore(key, member).await?;
        Ok(score)
    }
}
