//! The ambient context handed to probes.

use crate::error::{HasprobeError, Result};
use crate::host::{HostEnvironment, HostObject, ScratchElement};
use crate::style::VendorResolver;

use super::registry::ProbeStore;
use super::value::CapValue;

/// Everything a probe may look at while it runs: the host's global object,
/// its document (if any), the shared scratch element, the style resolver,
/// and the store itself for querying other capabilities.
pub struct ProbeContext<'a> {
    store: &'a ProbeStore,
}

impl<'a> ProbeContext<'a> {
    pub(crate) fn new(store: &'a ProbeStore) -> Self {
        Self { store }
    }

    pub fn environment(&self) -> &'a HostEnvironment {
        self.store.environment()
    }

    /// The host's global object.
    pub fn global(&self) -> &'a HostObject {
        &self.environment().global
    }

    /// The host's document; `None` outside presentational hosts.
    pub fn document(&self) -> Option<&'a HostObject> {
        self.environment().document.as_ref()
    }

    /// Query another capability. Unknown names yield `None`.
    pub fn query(&self, name: &str) -> Result<Option<CapValue>> {
        self.store.query(name)
    }

    /// Whether another capability is present and truthy.
    pub fn has(&self, name: &str) -> Result<bool> {
        self.store.has(name)
    }

    pub fn scratch_available(&self) -> bool {
        self.store.scratch.is_some()
    }

    /// Run `f` with exclusive access to the scratch element.
    ///
    /// Callers must leave the element empty and attribute-clean.
    pub fn with_scratch<R>(&self, f: impl FnOnce(&mut ScratchElement) -> R) -> Result<R> {
        let cell = self
            .store
            .scratch
            .as_ref()
            .ok_or(HasprobeError::ScratchUnavailable)?;
        let mut element = cell
            .try_borrow_mut()
            .map_err(|_| HasprobeError::ScratchBusy)?;
        Ok(f(&mut *element))
    }

    pub fn resolver(&self) -> VendorResolver {
        self.store.resolver()
    }

    /// Whether the scratch element's style supports `property` under any
    /// vendor spelling.
    pub fn style_supported(&self, property: &str) -> Result<bool> {
        let resolver = self.resolver();
        self.with_scratch(|el| resolver.is_supported(property, &*el))
    }
}
