//! Registry of loaded protocol dialects.
//!
//! Dialect modules are registered in dependency order. A module declaring a
//! base dialect is built from the base's descriptor, so the base must already
//! be present; otherwise registration fails and nothing is stored.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::descriptor::ProtocolDescriptor;
use crate::error::DialectError;

/// Module name prefix shared by every dialect.
pub const MODULE_PREFIX: &str = "protocol/";

/// Whether a dialect module may be unloaded once registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnloadCapability {
    #[default]
    Ok,
    /// Loaded for the lifetime of the process.
    Never,
}

/// A loadable dialect.
pub trait DialectModule: Send + Sync {
    /// Module name, e.g. `protocol/juno`.
    fn name(&self) -> &'static str;

    /// Base dialect this one overlays, if any.
    fn dependency(&self) -> Option<&'static str> {
        None
    }

    fn unload(&self) -> UnloadCapability {
        UnloadCapability::Ok
    }

    /// Build the descriptor. `base` is the dependency's descriptor.
    fn build(&self, base: Option<&ProtocolDescriptor>) -> Result<ProtocolDescriptor, DialectError>;
}

#[derive(Debug)]
struct Loaded {
    descriptor: Arc<ProtocolDescriptor>,
    dependency: Option<String>,
    unload: UnloadCapability,
}

/// Loaded dialects, by module name.
#[derive(Debug, Default)]
pub struct ProtocolRegistry {
    loaded: HashMap<String, Loaded>,
}

/// Expand a short dialect name (`juno`) to its module name.
pub fn module_name(name: &str) -> String {
    if name.starts_with(MODULE_PREFIX) {
        name.to_string()
    } else {
        format!("{}{}", MODULE_PREFIX, name)
    }
}

impl ProtocolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and store a dialect module's descriptor.
    pub fn register(&mut self, module: &dyn DialectModule) -> Result<Arc<ProtocolDescriptor>, DialectError> {
        let name = module.name();
        if self.loaded.contains_key(name) {
            return Err(DialectError::AlreadyRegistered(name.to_string()));
        }

        let base = match module.dependency() {
            Some(dep) => match self.loaded.get(dep) {
                Some(loaded) => Some(Arc::clone(&loaded.descriptor)),
                None => {
                    warn!(dialect = name, dependency = dep, "dependency not registered");
                    return Err(DialectError::MissingDependency {
                        dialect: name.to_string(),
                        dependency: dep.to_string(),
                    });
                }
            },
            None => None,
        };

        let descriptor = match module.build(base.as_deref()) {
            Ok(descriptor) => Arc::new(descriptor),
            Err(e) => {
                warn!(dialect = name, error = %e, code = e.error_code(), "dialect failed to build");
                return Err(e);
            }
        };

        info!(
            dialect = name,
            chanmodes = %descriptor.chanmodes_token(),
            prefix = %descriptor.prefix_token(),
            "dialect registered"
        );

        self.loaded.insert(
            name.to_string(),
            Loaded {
                descriptor: Arc::clone(&descriptor),
                dependency: module.dependency().map(str::to_string),
                unload: module.unload(),
            },
        );
        Ok(descriptor)
    }

    /// Descriptor for a dialect, by module name or short name.
    pub fn get(&self, name: &str) -> Option<Arc<ProtocolDescriptor>> {
        self.loaded
            .get(&module_name(name))
            .map(|loaded| Arc::clone(&loaded.descriptor))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.loaded.contains_key(&module_name(name))
    }

    /// Loaded module names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.loaded.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.loaded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty()
    }

    /// Remove a dialect.
    ///
    /// Fails for modules declared never-unloadable and for bases another
    /// loaded dialect still overlays.
    pub fn unload(&mut self, name: &str) -> Result<Arc<ProtocolDescriptor>, DialectError> {
        let key = module_name(name);
        let loaded = self
            .loaded
            .get(&key)
            .ok_or_else(|| DialectError::UnknownDialect(key.clone()))?;

        if loaded.unload == UnloadCapability::Never {
            return Err(DialectError::Unloadable(key));
        }
        if let Some((dependent, _)) = self
            .loaded
            .iter()
            .find(|(_, l)| l.dependency.as_deref() == Some(key.as_str()))
        {
            return Err(DialectError::InUse {
                dialect: key.clone(),
                dependent: dependent.clone(),
            });
        }

        let removed = self
            .loaded
            .remove(&key)
            .ok_or_else(|| DialectError::UnknownDialect(key.clone()))?;
        debug!(dialect = %key, "dialect unloaded");
        Ok(removed.descriptor)
    }
}
