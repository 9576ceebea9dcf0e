//! Adapter seam and the adapter map consumed by the resolver

use crate::ports::registry::Operation;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Options attached to an adapter binding
pub type AdapterOptions = HashMap<String, Value>;

/// Trait for pluggable backend implementations
///
/// The core never invokes an adapter's operations; it only checks conformance
/// against the port registry. Conformance requires the adapter to *declare*
/// the capability explicitly (same-named operations alone are not enough) and
/// to export every operation the interface lists, matched by name and arity.
pub trait Adapter: Send + Sync {
    /// Stable identity used in validation errors (e.g. a type or module name)
    fn identity(&self) -> &str;

    /// Capability names this implementation formally declares
    fn declared_capabilities(&self) -> &[&str];

    /// Exported operation set (name plus arity)
    fn operations(&self) -> &[Operation];
}

/// Resolved capability binding: an implementation plus its options
#[derive(Clone)]
pub struct AdapterBinding {
    pub implementation: Arc<dyn Adapter>,
    pub options: AdapterOptions,
}

impl fmt::Debug for AdapterBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterBinding")
            .field("implementation", &self.implementation.identity())
            .field("options", &self.options)
            .finish()
    }
}

/// One entry in an adapter map: a bare implementation or an
/// (implementation, options) pair
#[derive(Clone)]
pub enum AdapterEntry {
    /// Implementation with no options (resolves with empty options)
    Bare(Arc<dyn Adapter>),

    /// Implementation with explicit options
    Configured(Arc<dyn Adapter>, AdapterOptions),
}

impl AdapterEntry {
    /// Build an entry from a dynamic options value
    ///
    /// `null` means no options; a mapping means explicit options. Anything
    /// else is a programming error, not a run-time condition, and aborts
    /// construction.
    ///
    /// # Panics
    ///
    /// Panics when `options` is neither `null` nor a mapping.
    pub fn from_options_value(implementation: Arc<dyn Adapter>, options: Value) -> Self {
        match options {
            Value::Null => AdapterEntry::Bare(implementation),
            Value::Object(map) => {
                AdapterEntry::Configured(implementation, map.into_iter().collect())
            }
            other => panic!(
                "malformed adapter entry for '{}': options must be a mapping or null, got {}",
                implementation.identity(),
                other
            ),
        }
    }

    /// The entry's implementation, regardless of shape
    pub fn implementation(&self) -> &Arc<dyn Adapter> {
        match self {
            AdapterEntry::Bare(implementation) => implementation,
            AdapterEntry::Configured(implementation, _) => implementation,
        }
    }
}

impl fmt::Debug for AdapterEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdapterEntry::Bare(imp) => write!(f, "Bare({})", imp.identity()),
            AdapterEntry::Configured(imp, options) => {
                write!(f, "Configured({}, {:?})", imp.identity(), options)
            }
        }
    }
}

/// User-supplied mapping from capability name to adapter entry
///
/// The sole external data format the resolver parses.
#[derive(Clone, Debug, Default)]
pub struct AdapterMap {
    entries: HashMap<String, AdapterEntry>,
}

impl AdapterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a capability to a bare implementation
    pub fn bind(mut self, capability: impl Into<String>, implementation: Arc<dyn Adapter>) -> Self {
        self.entries
            .insert(capability.into(), AdapterEntry::Bare(implementation));
        self
    }

    /// Bind a capability to an implementation with options
    pub fn bind_with(
        mut self,
        capability: impl Into<String>,
        implementation: Arc<dyn Adapter>,
        options: AdapterOptions,
    ) -> Self {
        self.entries.insert(
            capability.into(),
            AdapterEntry::Configured(implementation, options),
        );
        self
    }

    /// Bind a capability to a pre-built entry
    pub fn bind_entry(mut self, capability: impl Into<String>, entry: AdapterEntry) -> Self {
        self.entries.insert(capability.into(), entry);
        self
    }

    /// Get the entry for a capability, if bound
    pub fn get(&self, capability: &str) -> Option<&AdapterEntry> {
        self.entries.get(capability)
    }

    /// Capability names currently bound
    pub fn capabilities(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
