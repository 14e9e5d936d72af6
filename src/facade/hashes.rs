// Hash (bean) operations
//
// A bean is a flattened object stored as a hash: field -> value.

use std::collections::HashMap;

use redis::AsyncCommands;

use super::{check_key, check_non_empty, CacheFacade};
use crate::error::CacheError;

impl CacheFacade {
    /// Set one field of a bean
    ///
    /// Returns true if the field was newly created, false if an existing
    /// field was updated.
    pub async fn set_bean_field(
        &mut self,
        key: &str,
        field: &str,
        value: &str,
    ) -> Result<bool, CacheError> {
        check_key(key)?;
        check_non_empty("field", field.len())?;
        let created: bool = self.conn().hset(key, field, value).await?;
        Ok(created)
    }

    /// Set several fields of a bean in one command
    ///
    /// Returns the store's status string ("OK" on success).
    pub async fn set_bean(
        &mut self,
        key: &str,
        fields: &HashMap<String, String>,
    ) -> Result<String, CacheError> {
        check_key(key)?;
        check_non_empty("fields", fields.len())?;
        let status: String = redis::cmd("HMSET")
            .arg(key)
            .arg(fields)
            .query_async(self.conn())
            .await?;
        Ok(status)
    }

    /// Set one field, then expire the whole key `seconds` from now
    ///
    /// Two round trips, not a transaction: a crash between them leaves the
    /// field set without the TTL. A later TTL on the same key replaces
    /// this one.
    pub async fn set_bean_field_expire_in(
        &mut self,
        key: &str,
        field: &str,
        value: &str,
        seconds: u64,
    ) -> Result<bool, CacheError> {
        let created = self.set_bean_field(key, field, value).await?;
        self.set_expire_in(key, seconds).await?;
        Ok(created)
    }

    /// Set several fields, then expire the whole key `seconds` from now
    ///
    /// Same non-atomicity caveat as `set_bean_field_expire_in`.
    pub async fn set_bean_expire_in(
        &mut self,
        key: &str,
        fields: &HashMap<String, String>,
        seconds: u64,
    ) -> Result<String, CacheError> {
        let status = self.set_bean(key, fields).await?;
        self.set_expire_in(key, seconds).await?;
        Ok(status)
    }

    /// One field of a bean, or None if the field or key is absent
    pub async fn get_bean_field(
        &mut self,
        key: &str,
        field: &str,
    ) -> Result<Option<String>, CacheError> {
        check_key(key)?;
        check_non_empty("field", field.len())?;
        let value: Option<String> = self.conn().hget(key, field).await?;
        Ok(value)
    }

    /// The requested fields, in request order
    ///
    /// Each position holds the field's value, or None when that field (or
    /// the whole key) does not exist. The output length always equals the
    /// number of requested fields.
    pub async fn get_bean_fields(
        &mut self,
        key: &str,
        fields: &[&str],
    ) -> Result<Vec<Option<String>>, CacheError> {
        check_key(key)?;
        check_non_empty("fields", fields.len())?;
        let values: Vec<Option<String>> = redis::cmd("HMGET")
            .arg(key)
            .arg(fields)
            .query_async(self.conn())
            .await?;
        Ok(values)
    }

    /// The whole bean as a field -> value map
    ///
    /// An absent key yields an empty map, never an error.
    pub async fn get_bean(&mut self, key: &str) -> Result<HashMap<String, String>, CacheError> {
        check_key(key)?;
        let bean: HashMap<String, String> = self.conn().hgetall(key).await?;
        Ok(bean)
    }
}
