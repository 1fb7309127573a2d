#![cfg(test)]

use std::str::FromStr;

use crate::extension::version::{ConstraintOp, Version, VersionConstraint, VersionError};

#[test]
fn test_version_numeric_component_ordering() {
    // Numeric, not lexicographic: 1.2 < 1.10
    let v1_2 = Version::parse("1.2").unwrap();
    let v1_10 = Version::parse("1.10").unwrap();
    assert!(v1_2 < v1_10);
    assert!(v1_10 > v1_2);
}

#[test]
fn test_version_zero_padding_equality() {
    let short = Version::parse("1.2").unwrap();
    let long = Version::parse("1.2.0").unwrap();
    assert_eq!(short, long);
}

#[test]
fn test_version_rejects_non_numeric() {
    assert!(matches!(
        Version::parse("1.x"),
        Err(VersionError::InvalidComponent(_))
    ));
    assert!(matches!(Version::parse(""), Err(VersionError::Empty)));
}

#[test]
fn test_parse_recorded_strips_operator_marker() {
    // Manifests without a version are cached as ">0"
    let version = Version::parse_recorded(">0").unwrap();
    assert_eq!(version, Version::parse("0").unwrap());
    assert_eq!(
        Version::parse_recorded("1.4.2").unwrap(),
        Version::parse("1.4.2").unwrap()
    );
}

#[test]
fn test_constraint_parse_operator_and_version() {
    let c = VersionConstraint::parse(">=1.2").unwrap();
    assert_eq!(c.op(), ConstraintOp::Ge);
    assert_eq!(c.version(), &Version::parse("1.2").unwrap());
    assert!(!c.is_presence_only());
}

#[test]
fn test_constraint_defaults() {
    // Absent operator defaults to >=
    let bare = VersionConstraint::parse("1.0").unwrap();
    assert_eq!(bare.op(), ConstraintOp::Ge);

    // Absent version defaults to 0
    let op_only = VersionConstraint::parse(">=").unwrap();
    assert_eq!(op_only.version(), &Version::parse("0").unwrap());
}

#[test]
fn test_constraint_bundle_sentinel() {
    let c = VersionConstraint::parse("bundle").unwrap();
    assert!(c.is_presence_only());
    // When compared as an extension requirement it behaves as >= 0
    assert!(c.satisfied_by(&Version::parse("0").unwrap()));
    assert!(c.satisfied_by(&Version::parse("3.1").unwrap()));
}

#[test]
fn test_constraint_unknown_operator() {
    assert!(matches!(
        VersionConstraint::parse("~1.2"),
        Err(VersionError::UnknownOperator(_))
    ));
}

#[test]
fn test_constraint_satisfaction_matrix() {
    let ge_1_10 = VersionConstraint::parse(">=1.10").unwrap();
    assert!(!ge_1_10.satisfied_by(&Version::parse("1.2").unwrap()));
    assert!(ge_1_10.satisfied_by(&Version::parse("1.10").unwrap()));

    let ge_1_2 = VersionConstraint::parse(">=1.2").unwrap();
    assert!(ge_1_2.satisfied_by(&Version::parse("1.10").unwrap()));

    let eq = VersionConstraint::parse("=2.0").unwrap();
    assert!(eq.satisfied_by(&Version::parse("2.0").unwrap()));
    assert!(!eq.satisfied_by(&Version::parse("2.0.1").unwrap()));

    let ne = VersionConstraint::parse("!=2.0").unwrap();
    assert!(!ne.satisfied_by(&Version::parse("2.0").unwrap()));
    assert!(ne.satisfied_by(&Version::parse("2.1").unwrap()));

    let lt = VersionConstraint::parse("<2").unwrap();
    assert!(lt.satisfied_by(&Version::parse("1.9.9").unwrap()));
    assert!(!lt.satisfied_by(&Version::parse("2.0").unwrap()));

    let le = VersionConstraint::parse("<=2").unwrap();
    assert!(le.satisfied_by(&Version::parse("2.0").unwrap()));
    assert!(!le.satisfied_by(&Version::parse("2.0.1").unwrap()));

    let gt = VersionConstraint::parse(">1").unwrap();
    assert!(!gt.satisfied_by(&Version::parse("1.0").unwrap()));
    assert!(gt.satisfied_by(&Version::parse("1.0.1").unwrap()));
}

#[test]
fn test_constraint_satisfied_by_recorded_handles_bad_strings() {
    let c = VersionConstraint::parse(">=1.0").unwrap();
    assert!(c.satisfied_by_recorded("1.0"));
    assert!(c.satisfied_by_recorded(">2.0")); // recorded default marker form
    assert!(!c.satisfied_by_recorded("not-a-version"));
}

#[test]
fn test_constraint_display() {
    assert_eq!(VersionConstraint::parse(">=1.2").unwrap().to_string(), ">=1.2");
    assert_eq!(VersionConstraint::parse("1.2").unwrap().to_string(), ">=1.2");
    assert_eq!(VersionConstraint::parse("bundle").unwrap().to_string(), "bundle");
}

#[test]
fn test_from_str_impls() {
    assert!(Version::from_str("1.2.3").is_ok());
    assert!(VersionConstraint::from_str("<=3").is_ok());
}
