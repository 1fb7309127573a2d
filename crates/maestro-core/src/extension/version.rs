use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Sentinel word marking a presence-only requirement on a raw module
pub const BUNDLE_SENTINEL: &str = "bundle";

/// Error type for version and constraint parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("empty version string")]
    Empty,
    #[error("invalid version component '{0}': not numeric")]
    InvalidComponent(String),
    #[error("unknown constraint operator '{0}'")]
    UnknownOperator(String),
}

/// A dot-separated numeric version (`1.2`, `1.10.3`).
///
/// Ordering is numeric component-wise with zero padding, so `1.2 < 1.10`
/// and `1.2 == 1.2.0`. This deliberately is not semver: manifest versions
/// routinely carry fewer than three components.
#[derive(Debug, Clone, Eq)]
pub struct Version {
    components: Vec<u64>,
}

impl Version {
    /// Parses a version string like "1.2" or "1.10.3"
    pub fn parse(version: &str) -> Result<Self, VersionError> {
        if version.is_empty() {
            return Err(VersionError::Empty);
        }

        let components = version
            .split('.')
            .map(|part| {
                part.parse::<u64>()
                    .map_err(|_| VersionError::InvalidComponent(part.to_string()))
            })
            .collect::<Result<Vec<u64>, VersionError>>()?;

        Ok(Self { components })
    }

    /// Parses a recorded descriptor version, tolerating a leading operator
    /// marker. Manifests that omit a version are cached with the `">0"`
    /// default, so the stored string may not be a bare version.
    pub fn parse_recorded(version: &str) -> Result<Self, VersionError> {
        let trimmed = version.trim_start_matches(|c: char| !c.is_ascii_digit());
        Self::parse(trimmed)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        for i in 0..len {
            let a = self.components.get(i).copied().unwrap_or(0);
            let b = other.components.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.components.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", rendered.join("."))
    }
}

/// Comparison operator of a version constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConstraintOp {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

impl ConstraintOp {
    fn parse(op: &str) -> Result<Self, VersionError> {
        match op {
            "=" | "==" => Ok(ConstraintOp::Eq),
            "!=" | "<>" => Ok(ConstraintOp::Ne),
            ">" => Ok(ConstraintOp::Gt),
            // An absent operator defaults to `>=`
            ">=" | "" => Ok(ConstraintOp::Ge),
            "<" => Ok(ConstraintOp::Lt),
            "<=" => Ok(ConstraintOp::Le),
            other => Err(VersionError::UnknownOperator(other.to_string())),
        }
    }

    fn matches(&self, ordering: Ordering) -> bool {
        match self {
            ConstraintOp::Eq => ordering == Ordering::Equal,
            ConstraintOp::Ne => ordering != Ordering::Equal,
            ConstraintOp::Gt => ordering == Ordering::Greater,
            ConstraintOp::Ge => ordering != Ordering::Less,
            ConstraintOp::Lt => ordering == Ordering::Less,
            ConstraintOp::Le => ordering != Ordering::Greater,
        }
    }
}

impl fmt::Display for ConstraintOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            ConstraintOp::Eq => "=",
            ConstraintOp::Ne => "!=",
            ConstraintOp::Gt => ">",
            ConstraintOp::Ge => ">=",
            ConstraintOp::Lt => "<",
            ConstraintOp::Le => "<=",
        };
        write!(f, "{}", symbol)
    }
}

/// A parsed requirement string such as `">=1.2"`, `"bundle"`, or `"1.0"`.
///
/// The `bundle` sentinel marks a presence-only requirement: the reference
/// names a raw module rather than a managed extension, and the dependency is
/// satisfied purely by that module having been started. When a presence-only
/// constraint still has to be compared as an extension requirement (the
/// module is not started), it behaves as `>= 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionConstraint {
    presence_only: bool,
    op: ConstraintOp,
    version: Version,
}

impl VersionConstraint {
    /// Parse a requirement string into a constraint.
    ///
    /// Leading non-digit characters form the operator (absent → `>=`); the
    /// remainder is the version (absent → `0`).
    pub fn parse(requirement: &str) -> Result<Self, VersionError> {
        let requirement = requirement.trim();

        if requirement == BUNDLE_SENTINEL {
            return Ok(Self {
                presence_only: true,
                op: ConstraintOp::Ge,
                version: Version::parse("0")?,
            });
        }

        let split = requirement
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(requirement.len());
        let (op_str, version_str) = requirement.split_at(split);

        let op = ConstraintOp::parse(op_str.trim())?;
        let version = if version_str.is_empty() {
            Version::parse("0")?
        } else {
            Version::parse(version_str)?
        };

        Ok(Self {
            presence_only: false,
            op,
            version,
        })
    }

    /// Whether this constraint is satisfied by module presence alone
    pub fn is_presence_only(&self) -> bool {
        self.presence_only
    }

    /// The comparison operator
    pub fn op(&self) -> ConstraintOp {
        self.op
    }

    /// The version to compare against
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Check whether a recorded version satisfies this constraint
    pub fn satisfied_by(&self, recorded: &Version) -> bool {
        self.op.matches(recorded.cmp(&self.version))
    }

    /// Check a recorded descriptor version string against this constraint.
    /// A string that cannot be parsed never satisfies the constraint.
    pub fn satisfied_by_recorded(&self, recorded: &str) -> bool {
        match Version::parse_recorded(recorded) {
            Ok(version) => self.satisfied_by(&version),
            Err(_) => false,
        }
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.presence_only {
            write!(f, "{}", BUNDLE_SENTINEL)
        } else {
            write!(f, "{}{}", self.op, self.version)
        }
    }
}

impl FromStr for VersionConstraint {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VersionConstraint::parse(s)
    }
}
