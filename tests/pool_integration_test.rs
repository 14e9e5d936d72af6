// Integration tests for the store pool
//
// These tests require a real Redis instance via testcontainers

use std::time::Duration;

use testcontainers::{clients::Cli, RunnableImage};
use testcontainers_modules::redis::Redis;

use cachewrap::config::{ExhaustedAction, StoreConfig};
use cachewrap::error::CacheError;
use cachewrap::pool::StorePool;

fn config_on(port: u16) -> StoreConfig {
    StoreConfig {
        shard_urls: format!("redis://127.0.0.1:{}", port),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_acquire_and_release_tracks_leases() {
    let docker = Cli::default();
    let container = docker.run(RunnableImage::from(Redis::default()));
    let pool = StorePool::connect(config_on(container.get_host_port_ipv4(6379)))
        .await
        .unwrap();

    assert_eq!(pool.available_leases(), 10);
    let handle = pool.acquire().await.unwrap();
    assert_eq!(pool.available_leases(), 9);
    drop(handle);
    assert_eq!(pool.available_leases(), 10);
}

#[tokio::test]
async fn test_fail_policy_errors_when_exhausted() {
    let docker = Cli::default();
    let container = docker.run(RunnableImage::from(Redis::default()));
    let config = StoreConfig {
        max_active: 1,
        when_exhausted: ExhaustedAction::Fail,
        ..config_on(container.get_host_port_ipv4(6379))
    };
    let pool = StorePool::connect(config).await.unwrap();

    let held = pool.acquire().await.unwrap();
    let err = pool.acquire().await.unwrap_err();
    assert!(matches!(err, CacheError::StoreUnavailable(_)));

    drop(held);
    assert!(pool.acquire().await.is_ok());
}

#[tokio::test]
async fn test_block_policy_times_out_when_exhausted() {
    let docker = Cli::default();
    let container = docker.run(RunnableImage::from(Redis::default()));
    let config = StoreConfig {
        max_active: 1,
        max_wait_ms: 200,
        when_exhausted: ExhaustedAction::Block,
        ..config_on(container.get_host_port_ipv4(6379))
    };
    let pool = StorePool::connect(config).await.unwrap();

    let _held = pool.acquire().await.unwrap();
    let err = pool.acquire().await.unwrap_err();
    match err {
        CacheError::StoreUnavailable(msg) => assert!(msg.contains("timed out")),
        other => panic!("expected StoreUnavailable, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_block_policy_waits_for_released_lease() {
    let docker = Cli::default();
    let container = docker.run(RunnableImage::from(Redis::default()));
    let config = StoreConfig {
        max_active: 1,
        max_wait_ms: 2000,
        ..config_on(container.get_host_port_ipv4(6379))
    };
    let pool = std::sync::Arc::new(StorePool::connect(config).await.unwrap());

    let held = pool.acquire().await.unwrap();
    let waiter = {
        let pool = pool.clone();
        tokio::spawn(async move { pool.acquire().await.is_ok() })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;
    drop(held);
    assert!(waiter.await.unwrap());
}

#[tokio::test]
async fn test_test_on_acquire_pings_the_store() {
    let docker = Cli::default();
    let container = docker.run(RunnableImage::from(Redis::default()));
    let config = StoreConfig {
        test_on_acquire: true,
        ..config_on(container.get_host_port_ipv4(6379))
    };
    let pool = StorePool::connect(config).await.unwrap();

    assert!(pool.acquire().await.is_ok());
}

#[tokio::test]
async fn test_shutdown_drains_and_refuses_new_leases() {
    let docker = Cli::default();
    let container = docker.run(RunnableImage::from(Redis::default()));
    let pool = StorePool::connect(config_on(container.get_host_port_ipv4(6379)))
        .await
        .unwrap();

    let handle = pool.acquire().await.unwrap();
    drop(handle);

    assert!(pool.shutdown(Duration::from_secs(1)).await);
    let err = pool.acquire().await.unwrap_err();
    assert!(matches!(err, CacheError::StoreUnavailable(_)));
}

#[tokio::test]
async fn test_shutdown_reports_outstanding_leases() {
    let docker = Cli::default();
    let container = docker.run(RunnableImage::from(Redis::default()));
    let pool = StorePool::connect(config_on(container.get_host_port_ipv4(6379)))
        .await
        .unwrap();

    let _held = pool.acquire().await.unwrap();
    assert!(!pool.shutdown(Duration::from_millis(100)).await);
}
