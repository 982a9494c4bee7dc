//! Tests for lazy, exactly-once backend construction

use std::sync::Arc;
use std::time::Duration;

use capreg_application::{BackendConfig, BackendRegistry};
use capreg_domain::error::LookupError;

use crate::test_utils::{Counters, EchoBackend};

fn registry_with(counters: &Arc<Counters>, delay: Duration, failures: usize) -> BackendRegistry {
    BackendRegistry::empty(BackendConfig::new()).with_backend(
        "echo",
        EchoBackend::factory_with("echo", Arc::clone(counters), delay, failures),
    )
}

#[tokio::test]
async fn test_backend_not_constructed_until_first_use() {
    let counters = Arc::new(Counters::default());
    let registry = registry_with(&counters, Duration::ZERO, 0);

    assert!(registry.has_namespace("echo"));
    assert!(!registry.is_constructed("echo"));
    assert_eq!(counters.constructed(), 0);

    registry.get_or_create("echo").await.expect("echo backend");

    assert!(registry.is_constructed("echo"));
    assert_eq!(counters.constructed(), 1);
    assert_eq!(counters.initialized(), 1);
}

#[tokio::test]
async fn test_subsequent_requests_reuse_instance() {
    let counters = Arc::new(Counters::default());
    let registry = registry_with(&counters, Duration::ZERO, 0);

    let first = registry.get_or_create("echo").await.unwrap();
    let second = registry.get_or_create("echo").await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(counters.constructed(), 1);
    assert_eq!(counters.initialized(), 1);
}

#[tokio::test]
async fn test_unknown_namespace_constructs_nothing() {
    let counters = Arc::new(Counters::default());
    let registry = registry_with(&counters, Duration::ZERO, 0);

    let err = registry.get_or_create("unknown_ns").await.err().expect("lookup should fail");

    assert!(matches!(err, LookupError::UnknownNamespace { ref namespace } if namespace == "unknown_ns"));
    assert!(!registry.is_constructed("unknown_ns"));
    assert_eq!(counters.constructed(), 0);
}

#[tokio::test]
async fn test_failed_initialization_is_not_cached() {
    let counters = Arc::new(Counters::default());
    let registry = registry_with(&counters, Duration::ZERO, 1);

    let err = registry.get_or_create("echo").await.err().expect("lookup should fail");
    assert!(matches!(err, LookupError::BackendFailure { segment: None, .. }));
    assert!(!registry.is_constructed("echo"));

    registry
        .get_or_create("echo")
        .await
        .expect("second attempt constructs from scratch");

    assert_eq!(counters.constructed(), 2);
    assert_eq!(counters.initialized(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_first_touch_constructs_once() {
    let counters = Arc::new(Counters::default());
    let registry = Arc::new(registry_with(&counters, Duration::from_millis(50), 0));

    let handles: Vec<_> = (0..32)
        .map(|_| {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move { registry.get_or_create("echo").await.map(|_| ()) })
        })
        .collect();

    for result in futures::future::join_all(handles).await {
        result.expect("task panicked").expect("every caller gets a backend");
    }

    assert_eq!(counters.constructed(), 1);
    assert_eq!(counters.initialized(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_unrelated_namespaces_do_not_serialize() {
    let slow = Arc::new(Counters::default());
    let fast = Arc::new(Counters::default());
    let registry = Arc::new(
        BackendRegistry::empty(BackendConfig::new())
            .with_backend(
                "slow",
                EchoBackend::factory_with("slow", Arc::clone(&slow), Duration::from_secs(5), 0),
            )
            .with_backend("fast", EchoBackend::factory("fast", Arc::clone(&fast))),
    );

    let slow_registry = Arc::clone(&registry);
    let slow_task = tokio::spawn(async move { slow_registry.get_or_create("slow").await.is_ok() });
    tokio::time::sleep(Duration::from_millis(20)).await;

    tokio::time::timeout(Duration::from_secs(1), registry.get_or_create("fast"))
        .await
        .expect("fast namespace must not wait on the slow one")
        .expect("fast backend");

    assert_eq!(fast.initialized(), 1);
    slow_task.abort();
}

#[tokio::test]
async fn test_invalidate_forces_reconstruction() {
    let counters = Arc::new(Counters::default());
    let registry = registry_with(&counters, Duration::ZERO, 0);

    assert!(!registry.invalidate("echo"));

    let first = registry.get_or_create("echo").await.unwrap();
    assert!(registry.invalidate("echo"));
    assert!(!registry.is_constructed("echo"));

    let second = registry.get_or_create("echo").await.unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(counters.initialized(), 2);
}

#[tokio::test]
async fn test_invalidate_during_construction_keeps_slot() {
    let counters = Arc::new(Counters::default());
    let registry = registry_with(&counters, Duration::from_millis(200), 0);

    let (first, second) = tokio::join!(registry.get_or_create("echo"), async {
        while counters.constructed() == 0 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert!(!registry.invalidate("echo"));
        registry.get_or_create("echo").await
    });

    assert!(Arc::ptr_eq(&first.unwrap(), &second.unwrap()));
    assert_eq!(counters.constructed(), 1);
    assert_eq!(counters.initialized(), 1);
}

#[test]
fn test_namespaces_sorted() {
    let counters = Arc::new(Counters::default());
    let registry = BackendRegistry::empty(BackendConfig::new())
        .with_backend("zeta", EchoBackend::factory("zeta", Arc::clone(&counters)))
        .with_backend("alpha", EchoBackend::factory("alpha", Arc::clone(&counters)));

    assert_eq!(registry.namespaces(), vec!["alpha", "zeta"]);
}
