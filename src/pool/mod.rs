// Store pool module
//
// Bootstraps the connection to the store and hands out leased handles.
// The transport itself (multiplexing, reconnection, cluster routing) is
// the redis crate's job; this module only bounds how many handles are
// out at once and gives the process one documented place to initialize
// and drain the pool.

use std::sync::Arc;
use std::sync::OnceLock;
use std::time::Duration;

use redis::aio::{ConnectionLike, ConnectionManager, ConnectionManagerConfig};
use redis::cluster::ClusterClient;
use redis::cluster_async::ClusterConnection;
use redis::{Client, Cmd, Pipeline, RedisFuture, Value};
use tokio::sync::{OwnedSemaphorePermit, Semaphore, TryAcquireError};

use crate::config::{ExhaustedAction, StoreConfig};
use crate::error::CacheError;

/// A connection to the store, standalone or cluster
///
/// Both variants are multiplexed and cheap to clone. The enum exists so
/// the facade can run every command through one `ConnectionLike` type
/// without caring how the deployment is sharded.
#[derive(Clone)]
pub enum ShardedConn {
    Standalone(ConnectionManager),
    Cluster(ClusterConnection),
}

impl std::fmt::Debug for ShardedConn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShardedConn::Standalone(_) => f.write_str("ShardedConn::Standalone"),
            ShardedConn::Cluster(_) => f.write_str("ShardedConn::Cluster"),
        }
    }
}

impl ConnectionLike for ShardedConn {
    fn req_packed_command<'a>(&'a mut self, cmd: &'a Cmd) -> RedisFuture<'a, Value> {
        match self {
            ShardedConn::Standalone(conn) => conn.req_packed_command(cmd),
            ShardedConn::Cluster(conn) => conn.req_packed_command(cmd),
        }
    }

    fn req_packed_commands<'a>(
        &'a mut self,
        pipeline: &'a Pipeline,
        offset: usize,
        count: usize,
    ) -> RedisFuture<'a, Vec<Value>> {
        match self {
            ShardedConn::Standalone(conn) => conn.req_packed_commands(pipeline, offset, count),
            ShardedConn::Cluster(conn) => conn.req_packed_commands(pipeline, offset, count),
        }
    }

    fn get_db(&self) -> i64 {
        match self {
            ShardedConn::Standalone(conn) => conn.get_db(),
            // Cluster deployments have a single logical database
            ShardedConn::Cluster(_) => 0,
        }
    }
}

/// One leased connection handle
///
/// Exclusively owned by its holder. The lease is returned to the pool
/// exactly once, when the handle is dropped.
#[derive(Debug)]
pub struct StoreHandle {
    conn: ShardedConn,
    _lease: OwnedSemaphorePermit,
}

impl StoreHandle {
    /// The underlying connection, for issuing commands
    pub fn connection(&mut self) -> &mut ShardedConn {
        &mut self.conn
    }
}

/// Bounded pool of store handles
#[derive(Debug)]
pub struct StorePool {
    template: ShardedConn,
    leases: Arc<Semaphore>,
    config: StoreConfig,
}

impl StorePool {
    /// Connect to the store described by `config`
    ///
    /// A single shard endpoint uses a multiplexed connection manager;
    /// several endpoints use the client's cluster support, which owns all
    /// key-to-shard routing.
    pub async fn connect(config: StoreConfig) -> Result<Self, CacheError> {
        config.validate()?;
        let shards = config.shard_list();
        let connection_timeout = Duration::from_millis(config.connection_timeout_ms);
        let response_timeout = Duration::from_millis(config.response_timeout_ms);

        let template = if shards.len() == 1 {
            let client = Client::open(shards[0].as_str()).map_err(|e| {
                CacheError::Configuration(format!("invalid store URL '{}': {}", shards[0], e))
            })?;
            let manager_config = ConnectionManagerConfig::new()
                .set_connection_timeout(Some(connection_timeout))
                .set_response_timeout(Some(response_timeout));
            let conn = ConnectionManager::new_with_config(client, manager_config)
                .await
                .map_err(|e| {
                    CacheError::StoreUnavailable(format!(
                        "failed to connect to {}: {}",
                        shards[0], e
                    ))
                })?;
            ShardedConn::Standalone(conn)
        } else {
            let client = ClusterClient::builder(shards.clone())
                .connection_timeout(connection_timeout)
                .response_timeout(response_timeout)
                .build()
                .map_err(|e| {
                    CacheError::Configuration(format!("invalid cluster configuration: {}", e))
                })?;
            let conn = client.get_async_connection().await.map_err(|e| {
                CacheError::StoreUnavailable(format!("failed to connect to cluster: {}", e))
            })?;
            ShardedConn::Cluster(conn)
        };

        tracing::info!(
            shards = shards.len(),
            max_active = config.max_active,
            "connected to store"
        );

        Ok(Self {
            template,
            leases: Arc::new(Semaphore::new(config.max_active)),
            config,
        })
    }

    /// Lease one handle from the pool
    ///
    /// At most `max_active` handles are out at any time. When exhausted,
    /// `block` waits up to `max_wait_ms` and `fail` errors immediately.
    pub async fn acquire(&self) -> Result<StoreHandle, CacheError> {
        let lease = match self.config.when_exhausted {
            ExhaustedAction::Fail => {
                self.leases
                    .clone()
                    .try_acquire_owned()
                    .map_err(|e| match e {
                        TryAcquireError::NoPermits => CacheError::StoreUnavailable(
                            "connection pool exhausted".to_string(),
                        ),
                        TryAcquireError::Closed => CacheError::StoreUnavailable(
                            "connection pool is shut down".to_string(),
                        ),
                    })?
            }
            ExhaustedAction::Block => {
                let wait = Duration::from_millis(self.config.max_wait_ms);
                match tokio::time::timeout(wait, self.leases.clone().acquire_owned()).await {
                    Ok(Ok(lease)) => lease,
                    Ok(Err(_)) => {
                        return Err(CacheError::StoreUnavailable(
                            "connection pool is shut down".to_string(),
                        ))
                    }
                    Err(_) => {
                        return Err(CacheError::StoreUnavailable(format!(
                            "timed out after {}ms waiting for a pool lease",
                            self.config.max_wait_ms
                        )))
                    }
                }
            }
        };

        let mut conn = self.template.clone();
        if self.config.test_on_acquire {
            let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        }

        Ok(StoreHandle {
            conn,
            _lease: lease,
        })
    }

    /// Drain the pool and refuse further leases
    ///
    /// Waits up to `timeout` for every outstanding lease to come back.
    /// Returns true if the pool drained fully; false if the timeout hit,
    /// in which case the pool is still closed to new leases.
    pub async fn shutdown(&self, timeout: Duration) -> bool {
        let all = self.config.max_active as u32;
        let drained = tokio::time::timeout(timeout, self.leases.acquire_many(all)).await;
        match drained {
            Ok(Ok(lease)) => {
                lease.forget();
                self.leases.close();
                tracing::info!("store pool drained and closed");
                true
            }
            _ => {
                self.leases.close();
                tracing::warn!(
                    timeout_ms = timeout.as_millis() as u64,
                    "store pool closed with leases still outstanding"
                );
                false
            }
        }
    }

    /// Number of leases currently available
    pub fn available_leases(&self) -> usize {
        self.leases.available_permits()
    }
}

// Process-wide pool. Initialize once at startup, before any facade is
// constructed; prefer passing &StorePool explicitly where practical.
static GLOBAL_POOL: OnceLock<StorePool> = OnceLock::new();

/// Initialize the process-wide pool. Callable once.
pub async fn init_global(config: StoreConfig) -> Result<(), CacheError> {
    if GLOBAL_POOL.get().is_some() {
        return Err(CacheError::Configuration(
            "global store pool already initialized".to_string(),
        ));
    }
    let pool = StorePool::connect(config).await?;
    GLOBAL_POOL.set(pool).map_err(|_| {
        CacheError::Configuration("global store pool already initialized".to_string())
    })
}

/// The process-wide pool, if `init_global` has run
pub fn global() -> Result<&'static StorePool, CacheError> {
    GLOBAL_POOL.get().ok_or_else(|| {
        CacheError::Configuration(
            "global store pool is not initialized; call pool::init_global first".to_string(),
        )
    })
}

/// Drain the process-wide pool, if it was initialized
pub async fn shutdown_global(timeout: Duration) -> bool {
    match GLOBAL_POOL.get() {
        Some(pool) => pool.shutdown(timeout).await,
        None => true,
    }
}
