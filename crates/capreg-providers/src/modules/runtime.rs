//! Built-in `utils.runtime` module: facts about the running process

use std::sync::Arc;

use capreg_application::ports::registry::{MODULES, ModuleEntry};
use capreg_domain::error::Result;
use capreg_domain::ports::LoadedModule;

use super::loader::StaticModule;

/// Name of the built-in runtime module
pub const RUNTIME_MODULE: &str = "utils.runtime";

fn load() -> Result<Arc<dyn LoadedModule>> {
    Ok(Arc::new(
        StaticModule::new(RUNTIME_MODULE)
            .with_attribute("version", env!("CARGO_PKG_VERSION"))
            .with_attribute("os", std::env::consts::OS)
            .with_attribute("arch", std::env::consts::ARCH)
            .with_attribute("family", std::env::consts::FAMILY)
            .with_attribute("pid", std::process::id()),
    ))
}

#[linkme::distributed_slice(MODULES)]
static RUNTIME: ModuleEntry = ModuleEntry {
    name: RUNTIME_MODULE,
    description: "Crate version, target platform and process id",
    loader: load,
};
