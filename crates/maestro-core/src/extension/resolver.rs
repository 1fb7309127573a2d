use std::collections::BTreeMap;

use crate::extension::dependency::{DependencyRef, UnresolvedDependency};
use crate::extension::error::ExtensionSystemError;
use crate::extension::manifest::ConfigMap;
use crate::extension::registry::{ActiveSet, ExtensionRegistry};
use crate::extension::traits::ModuleHost;
use crate::extension::version::{ConstraintOp, VersionConstraint};

/// How strictly the resolver treats dependencies that are not started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveMode {
    /// Pre-activation dry run: an inactive dependency always blocks,
    /// regardless of whether it could theoretically be activated. This is a
    /// deliberate conservative policy.
    Activatable,
    /// General resolution for diagnostics: a not-started dependency is
    /// additionally checked for registry presence and version fit.
    Diagnostic,
}

/// Computes unresolved requirements for activation and blocking dependents
/// for deactivation.
///
/// Borrows its context per call: the registry of available descriptors, the
/// lifecycle manager's in-process started table, and the module host for
/// presence-only (`bundle`) requirements. Resolution results are plain
/// values; an empty list means fully resolved.
pub struct DependencyResolver<'a> {
    registry: &'a ExtensionRegistry,
    started: &'a BTreeMap<String, ConfigMap>,
    host: &'a dyn ModuleHost,
}

impl<'a> DependencyResolver<'a> {
    pub fn new(
        registry: &'a ExtensionRegistry,
        started: &'a BTreeMap<String, ConfigMap>,
        host: &'a dyn ModuleHost,
    ) -> Self {
        Self {
            registry,
            started,
            host,
        }
    }

    /// Shorthand for the pre-activation check
    pub fn not_activatable(&self, identifier: &str) -> Vec<UnresolvedDependency> {
        self.unresolved(identifier, ResolveMode::Activatable)
    }

    /// Walk the extension's declared requirements and collect the ones that
    /// cannot be satisfied. The returned list preserves declaration order;
    /// any non-empty result blocks the caller-level operation.
    pub fn unresolved(&self, identifier: &str, mode: ResolveMode) -> Vec<UnresolvedDependency> {
        let requires = match self.registry.get(identifier) {
            Some(descriptor) => &descriptor.require,
            None => return Vec::new(),
        };

        let mut unresolved = Vec::new();

        for (reference, requirement) in requires {
            let constraint = match VersionConstraint::parse(requirement) {
                Ok(constraint) => constraint,
                Err(error) => {
                    // Malformed requirement strings are a validation
                    // failure, not a crash: the entry stays unresolved.
                    log::warn!(
                        "invalid requirement '{}' on '{}' declared by '{}': {}",
                        requirement,
                        reference,
                        identifier,
                        error
                    );
                    unresolved.push(UnresolvedDependency::constrained(
                        reference.clone(),
                        requirement.clone(),
                    ));
                    continue;
                }
            };

            // A presence-only requirement is satisfied by the module having
            // been started; no version comparison.
            if constraint.is_presence_only() && self.host.is_started(reference) {
                continue;
            }

            // Normalize declared-name references to identifiers once, here
            // at the boundary.
            let resolved = DependencyRef::resolve(self.registry, reference);
            let canonical = resolved.identifier();

            if self.started.contains_key(canonical) && !constraint.is_presence_only() {
                let satisfied = self
                    .registry
                    .get(canonical)
                    .map(|descriptor| constraint.satisfied_by_recorded(&descriptor.version))
                    .unwrap_or(false);
                if !satisfied {
                    unresolved.push(UnresolvedDependency::constrained(
                        canonical,
                        format!("{}{}", constraint.op(), constraint.version()),
                    ));
                }
                continue;
            }

            if mode == ResolveMode::Activatable {
                // Not started always blocks activation, even if the
                // dependency could itself be activated first.
                unresolved.push(UnresolvedDependency::constrained(
                    canonical,
                    format!("{}{}", constraint.op(), constraint.version()),
                ));
                continue;
            }

            // Diagnostic mode: the dependency must at least exist in the
            // registry and meet the version constraint.
            let satisfied = self
                .registry
                .get(canonical)
                .map(|descriptor| constraint.satisfied_by_recorded(&descriptor.version))
                .unwrap_or(false);
            if !satisfied {
                // Plain equality renders as the exact-version-required
                // marker in diagnostics.
                let op = match constraint.op() {
                    ConstraintOp::Eq => "v".to_string(),
                    other => other.to_string(),
                };
                unresolved.push(UnresolvedDependency::constrained(
                    canonical,
                    format!("{}{}", op, constraint.version()),
                ));
            }
        }

        unresolved
    }

    /// Symmetric reverse check for deactivation: scan the other active
    /// extensions' requirements for references to the target's declared
    /// name. A reference naming only the raw module identifier does not
    /// count; dependents are extensions, not modules.
    pub fn blocking_dependents(
        &self,
        identifier: &str,
        active: &ActiveSet,
    ) -> Result<Vec<String>, ExtensionSystemError> {
        let target = self
            .registry
            .get(identifier)
            .ok_or_else(|| ExtensionSystemError::InconsistentState(identifier.to_string()))?;

        let mut dependents = Vec::new();

        for (other, _) in active.iter() {
            if other == identifier {
                continue;
            }
            let descriptor = self
                .registry
                .get(other)
                .ok_or_else(|| ExtensionSystemError::InconsistentState(other.clone()))?;
            if descriptor.require.contains_key(&target.name) {
                dependents.push(descriptor.name.clone());
            }
        }

        Ok(dependents)
    }
}
