//! End-to-end resolution through the router with discovered backends

use std::path::Path;
use std::sync::Arc;

use capreg_application::{BackendConfig, BackendRegistry, PathRouter};
use capreg_domain::error::LookupError;
use capreg_domain::value_objects::{RequestContext, Value};
use capreg_providers::request;
use serde_json::json;

fn router_in(dir: &Path) -> PathRouter {
    let config = BackendConfig::new()
        .with_config_file(dir.join("config.json").display().to_string())
        .with_storage_file(dir.join("data_storage.db").display().to_string());
    PathRouter::new(BackendRegistry::discover(config))
}

#[tokio::test]
async fn test_config_key_and_missing_segment() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        r#"{"database": {"host": "db1"}}"#,
    )
    .unwrap();
    let router = router_in(dir.path());

    assert_eq!(
        router.resolve("config.database.host").await.unwrap(),
        json!("db1")
    );

    let err = router.resolve("config.database.port").await.unwrap_err();
    assert!(matches!(err, LookupError::BackendFailure { .. }));
    assert_eq!(err.namespace(), Some("config"));
    assert_eq!(err.segment(), Some("port"));
}

#[tokio::test]
async fn test_missing_config_file_is_empty_tree() {
    let dir = tempfile::tempdir().unwrap();
    let router = router_in(dir.path());

    let value = router
        .resolve_or("config.feature.enabled", json!(false))
        .await
        .unwrap();

    assert_eq!(value, json!(false));
}

#[tokio::test]
async fn test_absent_env_var_is_not_a_failure() {
    let dir = tempfile::tempdir().unwrap();
    let router = router_in(dir.path());

    let value = router
        .resolve("env.CAPREG_SCENARIO_ABSENT_API_KEY")
        .await
        .unwrap();
    assert_eq!(value, Value::Null);

    let value = router
        .resolve_or("env.CAPREG_SCENARIO_ABSENT_API_KEY", json!("dev-key"))
        .await
        .unwrap();
    assert_eq!(value, json!("dev-key"));
}

#[tokio::test]
async fn test_request_outside_scope_has_no_context() {
    let dir = tempfile::tempdir().unwrap();
    let router = router_in(dir.path());

    let err = router.resolve("request.form.username").await.unwrap_err();

    assert!(matches!(err, LookupError::NoActiveContext { .. }));
}

#[tokio::test]
async fn test_request_inside_scope() {
    let dir = tempfile::tempdir().unwrap();
    let router = Arc::new(router_in(dir.path()));
    let context = RequestContext::new().with_form("username", "ada");

    let value = request::scope(context, {
        let router = Arc::clone(&router);
        async move { router.resolve("request.form.username").await }
    })
    .await
    .unwrap();

    assert_eq!(value, json!("ada"));
}

#[tokio::test]
async fn test_unknown_namespace_constructs_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let router = router_in(dir.path());

    let err = router.resolve("unknown_ns.x").await.unwrap_err();

    assert!(matches!(err, LookupError::UnknownNamespace { .. }));
    assert!(!router.registry().is_constructed("unknown_ns"));
    assert!(!router.registry().has_namespace("unknown_ns"));
}

#[tokio::test]
async fn test_bitwise_through_router() {
    let dir = tempfile::tempdir().unwrap();
    let router = router_in(dir.path());

    let first = router.resolve("bitwise.set_bit.4.0").await.unwrap();
    let second = router.resolve("bitwise.set_bit.4.0").await.unwrap();

    assert_eq!(first, json!(5));
    assert_eq!(first, second);
    assert_eq!(
        router.resolve("bitwise.is_bit_set.5.2").await.unwrap(),
        json!(true)
    );
}

#[tokio::test]
async fn test_utils_runtime_module() {
    let dir = tempfile::tempdir().unwrap();
    let router = router_in(dir.path());

    let version = router.resolve("utils.runtime.version").await.unwrap();
    assert_eq!(version, json!(env!("CARGO_PKG_VERSION")));

    let same = router.resolve("modules.utils.runtime.version").await.unwrap();
    assert_eq!(version, same);

    let err = router.resolve("utils.runtime.nothing").await.unwrap_err();
    assert_eq!(err.segment(), Some("nothing"));

    let err = router.resolve("services.missing.attr").await.unwrap_err();
    assert!(matches!(err, LookupError::BackendFailure { .. }));
}

#[tokio::test]
async fn test_read_only_namespaces_reject_assign() {
    let dir = tempfile::tempdir().unwrap();
    let router = router_in(dir.path());

    for path in ["config.a", "env.A", "bitwise.set_bit.1.1", "utils.runtime.os"] {
        let err = router.assign(path, json!(1)).await.unwrap_err();
        assert!(
            matches!(err, LookupError::ReadOnlyNamespace { .. }),
            "{path}: {err}"
        );
    }
}

#[tokio::test]
async fn test_api_without_base_url_fails_initialization() {
    let dir = tempfile::tempdir().unwrap();
    let router = router_in(dir.path());

    let err = router.resolve("api.users.42").await.unwrap_err();

    assert_eq!(err.namespace(), Some("api"));
    assert_eq!(err.segment(), Some("users"));
    assert!(!router.registry().is_constructed("api"));
}

#[tokio::test]
async fn test_invalidate_reloads_configuration() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("config.json");
    std::fs::write(&file, r#"{"mode": "blue"}"#).unwrap();
    let router = router_in(dir.path());

    assert_eq!(router.resolve("config.mode").await.unwrap(), json!("blue"));

    std::fs::write(&file, r#"{"mode": "green"}"#).unwrap();
    assert_eq!(router.resolve("config.mode").await.unwrap(), json!("blue"));

    assert!(router.invalidate("config"));
    assert_eq!(router.resolve("config.mode").await.unwrap(), json!("green"));
}
