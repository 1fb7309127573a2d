use std::fmt;

use serde::Serialize;

use crate::extension::registry::ExtensionRegistry;

/// A requirement that could not be satisfied.
///
/// `name` is the reference as declared in the dependent's manifest;
/// `version` is the rendered constraint (`">=1.2"`), or the dependent's own
/// name when produced by the reverse-dependent scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedDependency {
    /// The declared reference
    pub name: String,

    /// Rendered version constraint, absent for reverse-dependent entries
    pub version: Option<String>,
}

impl UnresolvedDependency {
    /// Entry for a requirement blocked by a version constraint
    pub fn constrained(name: impl Into<String>, constraint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: Some(constraint.into()),
        }
    }

    /// Entry naming an active dependent blocking a deactivation
    pub fn dependent(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
        }
    }
}

impl fmt::Display for UnresolvedDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{} ({})", self.name, version),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A dependency reference, resolved once at the resolver boundary.
///
/// A manifest `require` key may address its target either by registry
/// identifier or by declared human name. Resolving eagerly keeps the
/// ambiguity out of the comparison logic: downstream code only ever sees a
/// canonical identifier (or knows the reference matched nothing).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyRef {
    /// The reference is a registry identifier
    Identifier(String),
    /// The reference matched a descriptor's declared name
    Named { name: String, identifier: String },
    /// The reference matched neither an identifier nor a declared name
    Unknown(String),
}

impl DependencyRef {
    /// Classify a raw reference against the registry. Identifier matches
    /// win over name matches.
    pub fn resolve(registry: &ExtensionRegistry, reference: &str) -> Self {
        if registry.contains(reference) {
            return DependencyRef::Identifier(reference.to_string());
        }
        match registry.identifier_for(reference) {
            Some(identifier) => DependencyRef::Named {
                name: reference.to_string(),
                identifier: identifier.to_string(),
            },
            None => DependencyRef::Unknown(reference.to_string()),
        }
    }

    /// The canonical identifier for registry lookups. Unknown references
    /// fall back to the raw string so lookups simply miss.
    pub fn identifier(&self) -> &str {
        match self {
            DependencyRef::Identifier(id) => id,
            DependencyRef::Named { identifier, .. } => identifier,
            DependencyRef::Unknown(raw) => raw,
        }
    }

    /// The reference as originally declared, used in diagnostics
    pub fn declared(&self) -> &str {
        match self {
            DependencyRef::Identifier(id) => id,
            DependencyRef::Named { name, .. } => name,
            DependencyRef::Unknown(raw) => raw,
        }
    }
}
