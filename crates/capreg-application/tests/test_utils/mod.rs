//! Test backends with observable side effects

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use capreg_application::{BackendConfig, BackendRegistry, PathRouter};
use capreg_domain::error::{Error, Result};
use capreg_domain::ports::{CapabilityBackend, Lookup};
use capreg_domain::value_objects::Value;

/// Counts constructions and initializations across every instance
#[derive(Debug, Default)]
pub struct Counters {
    pub constructed: AtomicUsize,
    pub initialized: AtomicUsize,
}

impl Counters {
    pub fn constructed(&self) -> usize {
        self.constructed.load(Ordering::SeqCst)
    }

    pub fn initialized(&self) -> usize {
        self.initialized.load(Ordering::SeqCst)
    }
}

/// Echoes its segments joined by '/', tagged with its instance number
pub struct EchoBackend {
    namespace: String,
    counters: Arc<Counters>,
    instance: usize,
    init_delay: Duration,
    fail_first_inits: usize,
}

impl EchoBackend {
    pub fn factory(
        namespace: &'static str,
        counters: Arc<Counters>,
    ) -> impl Fn(&BackendConfig) -> Result<Box<dyn CapabilityBackend>> + Send + Sync + 'static {
        Self::factory_with(namespace, counters, Duration::ZERO, 0)
    }

    pub fn factory_with(
        namespace: &'static str,
        counters: Arc<Counters>,
        init_delay: Duration,
        fail_first_inits: usize,
    ) -> impl Fn(&BackendConfig) -> Result<Box<dyn CapabilityBackend>> + Send + Sync + 'static {
        move |_config: &BackendConfig| {
            let instance = counters.constructed.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(Box::new(EchoBackend {
                namespace: namespace.to_string(),
                counters: Arc::clone(&counters),
                instance,
                init_delay,
                fail_first_inits,
            }) as Box<dyn CapabilityBackend>)
        }
    }
}

#[async_trait]
impl CapabilityBackend for EchoBackend {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    async fn initialize(&mut self) -> Result<()> {
        if !self.init_delay.is_zero() {
            tokio::time::sleep(self.init_delay).await;
        }
        if self.instance <= self.fail_first_inits {
            return Err(Error::configuration("simulated init failure"));
        }
        self.counters.initialized.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn resolve(&self, lookup: Lookup<'_>) -> Result<Value> {
        match lookup.first() {
            Some("missing") => Err(Error::not_found("missing", "no such key")),
            Some("instance") => Ok(Value::from(self.instance)),
            _ => Ok(Value::from(lookup.segments.join("/"))),
        }
    }
}

/// Writable map-less backend accepting only single-segment keys
pub struct SinkBackend {
    pub writes: Arc<AtomicUsize>,
}

#[async_trait]
impl CapabilityBackend for SinkBackend {
    fn namespace(&self) -> &str {
        "sink"
    }

    async fn resolve(&self, lookup: Lookup<'_>) -> Result<Value> {
        Ok(lookup.default_value())
    }

    fn writable(&self) -> bool {
        true
    }

    async fn assign(&self, segments: &[String], _value: Value) -> Result<()> {
        Lookup::new(segments).single("a key")?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Router over an empty registry plus an `echo` backend
pub fn echo_router(counters: Arc<Counters>) -> PathRouter {
    let registry = BackendRegistry::empty(BackendConfig::new())
        .with_backend("echo", EchoBackend::factory("echo", counters));
    PathRouter::new(registry)
}
