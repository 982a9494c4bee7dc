//! Tests for path routing and the lookup error taxonomy

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use capreg_application::{BackendConfig, BackendRegistry, PathRouter};
use capreg_domain::error::LookupError;
use capreg_domain::ports::CapabilityBackend;
use capreg_domain::value_objects::Value;

use crate::test_utils::{Counters, EchoBackend, SinkBackend, echo_router};

#[tokio::test]
async fn test_resolve_delegates_remaining_segments() {
    let counters = Arc::new(Counters::default());
    let router = echo_router(Arc::clone(&counters));

    let value = router.resolve("echo.a.b.c").await.unwrap();

    assert_eq!(value, Value::from("a/b/c"));
}

#[tokio::test]
async fn test_same_instance_serves_different_segments() {
    let counters = Arc::new(Counters::default());
    let router = echo_router(Arc::clone(&counters));

    router.resolve("echo.x").await.unwrap();
    router.resolve("echo.y.z").await.unwrap();
    let instance = router.resolve("echo.instance").await.unwrap();

    assert_eq!(instance, Value::from(1));
    assert_eq!(counters.constructed(), 1);
    assert_eq!(counters.initialized(), 1);
}

#[tokio::test]
async fn test_repeated_resolution_is_idempotent() {
    let counters = Arc::new(Counters::default());
    let router = echo_router(counters);

    let first = router.resolve("echo.k").await.unwrap();
    let second = router.resolve("echo.k").await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_reserved_namespace_never_reaches_registry() {
    let counters = Arc::new(Counters::default());
    let router = echo_router(Arc::clone(&counters));

    assert!(matches!(
        router.resolve("_echo.a").await,
        Err(LookupError::Reserved { .. })
    ));
    assert!(matches!(
        router.resolve("").await,
        Err(LookupError::Reserved { .. })
    ));
    assert_eq!(counters.constructed(), 0);
}

#[tokio::test]
async fn test_unknown_namespace() {
    let counters = Arc::new(Counters::default());
    let router = echo_router(Arc::clone(&counters));

    let err = router.resolve("unknown_ns.x").await.unwrap_err();

    assert!(matches!(err, LookupError::UnknownNamespace { ref namespace } if namespace == "unknown_ns"));
    assert!(!router.registry().is_constructed("unknown_ns"));
    assert_eq!(counters.constructed(), 0);
}

#[tokio::test]
async fn test_backend_failure_names_namespace_and_segment() {
    let counters = Arc::new(Counters::default());
    let router = echo_router(counters);

    let err = router.resolve("echo.missing").await.unwrap_err();

    assert_eq!(err.namespace(), Some("echo"));
    assert_eq!(err.segment(), Some("missing"));
    assert!(matches!(err, LookupError::BackendFailure { .. }));
}

#[tokio::test]
async fn test_init_failure_reports_first_segment() {
    let counters = Arc::new(Counters::default());
    let registry = BackendRegistry::empty(BackendConfig::new()).with_backend(
        "echo",
        EchoBackend::factory_with("echo", counters, std::time::Duration::ZERO, 1),
    );
    let router = PathRouter::new(registry);

    let err = router.resolve("echo.first.second").await.unwrap_err();
    assert_eq!(err.segment(), Some("first"));

    assert_eq!(router.resolve("echo.first").await.unwrap(), Value::from("first"));
}

#[tokio::test]
async fn test_assign_rejected_for_read_only_backend() {
    let counters = Arc::new(Counters::default());
    let router = echo_router(counters);

    let err = router.assign("echo.key", Value::from(1)).await.unwrap_err();

    assert!(matches!(err, LookupError::ReadOnlyNamespace { ref namespace } if namespace == "echo"));
}

#[tokio::test]
async fn test_assign_reaches_writable_backend_and_checks_arity() {
    let writes = Arc::new(AtomicUsize::new(0));
    let sink_writes = Arc::clone(&writes);
    let registry = BackendRegistry::empty(BackendConfig::new()).with_backend(
        "sink",
        move |_config: &BackendConfig| {
            Ok(Box::new(SinkBackend {
                writes: Arc::clone(&sink_writes),
            }) as Box<dyn CapabilityBackend>)
        },
    );
    let router = PathRouter::new(registry);

    router.assign("sink.token", Value::from("abc")).await.unwrap();
    assert_eq!(writes.load(Ordering::SeqCst), 1);

    let err = router
        .assign("sink.a.b", Value::from("abc"))
        .await
        .unwrap_err();
    assert_eq!(err.segment(), Some("b"));

    let err = router.assign("sink", Value::from("abc")).await.unwrap_err();
    assert!(matches!(err, LookupError::BackendFailure { .. }));
    assert_eq!(writes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_resolve_or_passes_default() {
    let writes = Arc::new(AtomicUsize::new(0));
    let registry = BackendRegistry::empty(BackendConfig::new()).with_backend(
        "sink",
        move |_config: &BackendConfig| {
            Ok(Box::new(SinkBackend {
                writes: Arc::clone(&writes),
            }) as Box<dyn CapabilityBackend>)
        },
    );
    let router = PathRouter::new(registry);

    assert_eq!(router.resolve("sink.k").await.unwrap(), Value::Null);
    assert_eq!(
        router.resolve_or("sink.k", Value::from(7)).await.unwrap(),
        Value::from(7)
    );
}

#[tokio::test]
async fn test_custom_reserved_prefix() {
    let counters = Arc::new(Counters::default());
    let registry = BackendRegistry::empty(BackendConfig::new().with("reserved_prefix", "sys"))
        .with_backend("echo", EchoBackend::factory("echo", Arc::clone(&counters)))
        .with_backend("_echo", EchoBackend::factory("_echo", Arc::clone(&counters)));
    let router = PathRouter::new(registry);

    assert!(matches!(
        router.resolve("system.x").await,
        Err(LookupError::Reserved { .. })
    ));
    assert_eq!(router.resolve("_echo.x").await.unwrap(), Value::from("x"));
}

#[tokio::test]
async fn test_empty_segment_is_invalid_path() {
    let counters = Arc::new(Counters::default());
    let router = echo_router(Arc::clone(&counters));

    assert!(matches!(
        router.resolve("echo..x").await,
        Err(LookupError::InvalidPath { .. })
    ));
    assert_eq!(counters.constructed(), 0);
}
