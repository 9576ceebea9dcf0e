//! Adapter resolver - pure resolution and exhaustive contract validation

use crate::ports::adapter::{Adapter, AdapterBinding, AdapterEntry, AdapterMap, AdapterOptions};
use crate::ports::registry::{lookup_interface, PortInterface};
use thiserror::Error;

/// Validation errors reported before a run is allowed to start
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required capability has no binding
    #[error("missing adapter for required capability '{capability}'")]
    Missing { capability: String },

    /// A bound implementation does not satisfy the capability's interface
    #[error("adapter '{implementation}' bound to '{capability}' is incomplete (missing: {})", .missing_operations.join(", "))]
    Incomplete {
        capability: String,
        implementation: String,
        missing_operations: Vec<String>,
    },
}

/// Resolve a capability to its (implementation, options) binding
///
/// A bare entry resolves with empty options; a configured entry keeps its
/// options. Resolution is pure: no validation, no side effects.
pub fn resolve(adapters: &AdapterMap, capability: &str) -> Option<AdapterBinding> {
    adapters.get(capability).map(|entry| match entry {
        AdapterEntry::Bare(implementation) => AdapterBinding {
            implementation: implementation.clone(),
            options: AdapterOptions::new(),
        },
        AdapterEntry::Configured(implementation, options) => AdapterBinding {
            implementation: implementation.clone(),
            options: options.clone(),
        },
    })
}

/// Resolve a capability or fail with a `Missing` error naming it
pub fn resolve_or_fail(
    adapters: &AdapterMap,
    capability: &str,
) -> Result<AdapterBinding, ValidationError> {
    resolve(adapters, capability).ok_or_else(|| ValidationError::Missing {
        capability: capability.to_string(),
    })
}

/// Validate an adapter map against a recipe's required capabilities
///
/// Exhaustive by design: every missing binding and every incomplete
/// implementation across all required capabilities is collected in one pass,
/// so the caller sees the complete remediation list before committing any
/// resources to a run.
pub fn validate(adapters: &AdapterMap, required: &[String]) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for capability in required {
        let entry = match adapters.get(capability) {
            Some(entry) => entry,
            None => {
                errors.push(ValidationError::Missing {
                    capability: capability.clone(),
                });
                continue;
            }
        };

        // Unknown capabilities have no registered interface and are unchecked
        if let Some(interface) = lookup_interface(capability) {
            let implementation = entry.implementation();
            if !implements(implementation.as_ref(), interface) {
                errors.push(ValidationError::Incomplete {
                    capability: capability.clone(),
                    implementation: implementation.identity().to_string(),
                    missing_operations: missing_operations(implementation.as_ref(), interface),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Conformance check: explicit declaration plus full operation coverage
///
/// Declaring the capability is required; same-named operations alone never
/// count, to avoid false positives from coincidental name matches.
fn implements(adapter: &dyn Adapter, interface: &PortInterface) -> bool {
    adapter
        .declared_capabilities()
        .contains(&interface.name)
        && missing_operations(adapter, interface).is_empty()
}

/// Operations the interface requires but the implementation does not export
fn missing_operations(adapter: &dyn Adapter, interface: &PortInterface) -> Vec<String> {
    interface
        .operations
        .iter()
        .filter(|required| {
            !adapter
                .operations()
                .iter()
                .any(|op| op.name == required.name && op.arity == required.arity)
        })
        .map(|op| op.to_string())
        .collect()
}
