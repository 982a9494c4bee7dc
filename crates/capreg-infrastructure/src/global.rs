//! Process-wide router
//!
//! One [`PathRouter`] per process, created on first access from
//! [`ConfigLoader`] output and kept until exit. Readers go through an
//! [`ArcSwapOption`] and never block; creation is serialized by a mutex so
//! concurrent first callers end up with the same instance.

use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwapOption;
use capreg_application::{BackendRegistry, PathRouter};
use capreg_domain::error::Result;
use tracing::{info, warn};

use crate::config::{ConfigLoader, RegistryConfig};
use crate::logging::init_logging;

static ROUTER: ArcSwapOption<PathRouter> = ArcSwapOption::const_empty();
static INIT: Mutex<()> = Mutex::new(());

/// Build a router over every discovered backend
pub fn build_router(config: &RegistryConfig) -> PathRouter {
    PathRouter::new(BackendRegistry::discover(config.to_backend_config()))
}

/// The process-wide router, created on first call
///
/// The first call loads configuration, installs logging (an already
/// installed subscriber is kept) and builds the router. A configuration
/// error is returned and the next call tries again.
pub fn global() -> Result<Arc<PathRouter>> {
    if let Some(router) = ROUTER.load_full() {
        return Ok(router);
    }

    let _guard = INIT.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(router) = ROUTER.load_full() {
        return Ok(router);
    }

    let config = ConfigLoader::new().load()?;
    if let Err(err) = init_logging(&config.logging) {
        warn!(error = %err, "Logging setup failed, continuing with the current subscriber");
    }

    let router = Arc::new(build_router(&config));
    ROUTER.store(Some(Arc::clone(&router)));
    info!(
        namespaces = router.registry().namespaces().len(),
        "Process-wide router created"
    );
    Ok(router)
}

/// Make `router` the process-wide instance, returning the one it replaces
pub fn install(router: PathRouter) -> Option<Arc<PathRouter>> {
    let _guard = INIT.lock().unwrap_or_else(PoisonError::into_inner);
    ROUTER.swap(Some(Arc::new(router)))
}

/// Drop the process-wide instance so the next [`global`] call rebuilds it
///
/// Intended for tests. Holders of the previous instance keep using it.
pub fn reset() -> Option<Arc<PathRouter>> {
    let _guard = INIT.lock().unwrap_or_else(PoisonError::into_inner);
    ROUTER.swap(None)
}
