// src/version/spec.rs

//! Version range predicates
//!
//! A [`VersionSpec`] bounds a version from below and/or above, each bound
//! inclusive or exclusive. Ranges are written in interval notation:
//!
//! | Text          | Meaning               |
//! |---------------|-----------------------|
//! | `1.0`         | 1.0 ≤ x               |
//! | `[1.0]`       | x == 1.0              |
//! | `(1.0,)`      | 1.0 < x               |
//! | `[,1.0]`      | x ≤ 1.0               |
//! | `[,1.0)`      | x < 1.0               |
//! | `(1.0,5.0]`   | 1.0 < x ≤ 5.0         |

use super::SemanticVersion;
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A version range with optional inclusive/exclusive bounds
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionSpec {
    min_version: Option<SemanticVersion>,
    is_min_inclusive: bool,
    max_version: Option<SemanticVersion>,
    is_max_inclusive: bool,
}

impl VersionSpec {
    /// Create a range from its bounds
    ///
    /// Fails when both bounds are set and the minimum exceeds the maximum.
    pub fn new(
        min_version: Option<SemanticVersion>,
        is_min_inclusive: bool,
        max_version: Option<SemanticVersion>,
        is_max_inclusive: bool,
    ) -> Result<Self> {
        if let (Some(min), Some(max)) = (&min_version, &max_version)
            && min > max
        {
            return Err(Error::InvalidVersionRange {
                min: min.to_string(),
                max: max.to_string(),
            });
        }

        Ok(Self {
            min_version,
            is_min_inclusive,
            max_version,
            is_max_inclusive,
        })
    }

    /// Exactly one version: `[v]`
    pub fn exact(version: SemanticVersion) -> Self {
        Self {
            min_version: Some(version.clone()),
            is_min_inclusive: true,
            max_version: Some(version),
            is_max_inclusive: true,
        }
    }

    /// The version or anything newer: `v`
    pub fn at_least(version: SemanticVersion) -> Self {
        Self {
            min_version: Some(version),
            is_min_inclusive: true,
            max_version: None,
            is_max_inclusive: false,
        }
    }

    pub fn min_version(&self) -> Option<&SemanticVersion> {
        self.min_version.as_ref()
    }

    pub fn is_min_inclusive(&self) -> bool {
        self.is_min_inclusive
    }

    pub fn max_version(&self) -> Option<&SemanticVersion> {
        self.max_version.as_ref()
    }

    pub fn is_max_inclusive(&self) -> bool {
        self.is_max_inclusive
    }

    /// Whether this range pins a single version (`[v]`)
    pub fn is_exact(&self) -> bool {
        match (&self.min_version, &self.max_version) {
            (Some(min), Some(max)) => self.is_min_inclusive && self.is_max_inclusive && min == max,
            _ => false,
        }
    }

    /// Parse a range string
    ///
    /// A bare version is a minimum-inclusive range with no upper bound.
    /// Anything else must be in brackets with one or two comma-separated
    /// parts; a single part is only allowed as the exact form `[v]`.
    pub fn parse(s: &str) -> Result<Self> {
        let value = s.trim();
        let invalid = || Error::InvalidVersionSpec(s.to_string());

        if let Ok(version) = SemanticVersion::parse(value) {
            return Ok(Self::at_least(version));
        }

        // Shortest valid range is "[1]"
        if value.len() < 3 {
            return Err(invalid());
        }

        let is_min_inclusive = match value.chars().next() {
            Some('[') => true,
            Some('(') => false,
            _ => return Err(invalid()),
        };
        let is_max_inclusive = match value.chars().last() {
            Some(']') => true,
            Some(')') => false,
            _ => return Err(invalid()),
        };

        let inner = &value[1..value.len() - 1];
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();

        match parts.as_slice() {
            [single] => {
                // "[1.0]" is exact; "(1.0)" and "[1.0)" mean nothing
                if !is_min_inclusive || !is_max_inclusive || single.is_empty() {
                    return Err(invalid());
                }
                let version = SemanticVersion::parse(single).map_err(|_| invalid())?;
                Ok(Self::exact(version))
            }
            [min, max] => {
                if min.is_empty() && max.is_empty() {
                    return Err(invalid());
                }
                let min_version = parse_bound(min).map_err(|_| invalid())?;
                let max_version = parse_bound(max).map_err(|_| invalid())?;
                Self::new(min_version, is_min_inclusive, max_version, is_max_inclusive)
            }
            _ => Err(invalid()),
        }
    }

    /// Check if a version lies within this range
    pub fn satisfies(&self, version: &SemanticVersion) -> bool {
        let above_min = match &self.min_version {
            None => true,
            Some(min) if self.is_min_inclusive => version >= min,
            Some(min) => version > min,
        };
        let below_max = match &self.max_version {
            None => true,
            Some(max) if self.is_max_inclusive => version <= max,
            Some(max) => version < max,
        };
        above_min && below_max
    }

    /// Human-readable constraint using comparison symbols, e.g. `(≥ 1.0 && < 2.0)`
    pub fn pretty(&self) -> PrettyVersionSpec<'_> {
        PrettyVersionSpec(self)
    }
}

fn parse_bound(part: &str) -> Result<Option<SemanticVersion>> {
    if part.is_empty() {
        Ok(None)
    } else {
        SemanticVersion::parse(part).map(Some)
    }
}

/// Canonical interval form; `parse(spec.to_string())` yields an equal spec.
impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(min) = &self.min_version
            && self.is_min_inclusive
            && self.max_version.is_none()
            && !self.is_max_inclusive
        {
            return write!(f, "{}", min);
        }

        if self.is_exact()
            && let Some(min) = &self.min_version
        {
            return write!(f, "[{}]", min);
        }

        f.write_str(if self.is_min_inclusive { "[" } else { "(" })?;
        if let Some(min) = &self.min_version {
            write!(f, "{}", min)?;
        }
        f.write_str(", ")?;
        if let Some(max) = &self.max_version {
            write!(f, "{}", max)?;
        }
        f.write_str(if self.is_max_inclusive { "]" } else { ")" })
    }
}

impl FromStr for VersionSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Display adapter rendering a range with mathematical comparison symbols
pub struct PrettyVersionSpec<'a>(&'a VersionSpec);

impl fmt::Display for PrettyVersionSpec<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spec = self.0;
        if spec.is_exact()
            && let Some(version) = &spec.min_version
        {
            return write!(f, "(= {})", version);
        }

        f.write_str("(")?;
        if let Some(min) = &spec.min_version {
            let op = if spec.is_min_inclusive { "≥" } else { ">" };
            write!(f, "{} {}", op, min)?;
        }
        if let Some(max) = &spec.max_version {
            if spec.min_version.is_some() {
                f.write_str(" && ")?;
            }
            let op = if spec.is_max_inclusive { "≤" } else { "<" };
            write!(f, "{} {}", op, max)?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> SemanticVersion {
        SemanticVersion::parse(s).unwrap()
    }

    #[test]
    fn test_parse_bare_version_is_minimum() {
        let spec = VersionSpec::parse("1.0").unwrap();
        assert_eq!(spec.min_version(), Some(&v("1.0")));
        assert!(spec.is_min_inclusive());
        assert_eq!(spec.max_version(), None);
        assert!(!spec.is_max_inclusive());
    }

    #[test]
    fn test_parse_exact() {
        let spec = VersionSpec::parse("[1.5]").unwrap();
        assert!(spec.is_exact());
        assert!(spec.satisfies(&v("1.5")));
        assert!(spec.satisfies(&v("1.5.0")));
        assert!(!spec.satisfies(&v("1.4")));
        assert!(!spec.satisfies(&v("1.6")));
    }

    #[test]
    fn test_parse_open_ranges() {
        let gt = VersionSpec::parse("(1.0,)").unwrap();
        assert!(!gt.satisfies(&v("1.0")));
        assert!(gt.satisfies(&v("1.0.1")));

        let le = VersionSpec::parse("[,1.0]").unwrap();
        assert!(le.satisfies(&v("1.0")));
        assert!(le.satisfies(&v("0.1")));
        assert!(!le.satisfies(&v("1.1")));

        let lt = VersionSpec::parse("[,1.0)").unwrap();
        assert!(!lt.satisfies(&v("1.0")));
        assert!(lt.satisfies(&v("1.0-beta")));
    }

    #[test]
    fn test_parse_bounded_range() {
        let spec = VersionSpec::parse("(1.0, 5.0]").unwrap();
        assert_eq!(spec.min_version(), Some(&v("1.0")));
        assert!(!spec.is_min_inclusive());
        assert_eq!(spec.max_version(), Some(&v("5.0")));
        assert!(spec.is_max_inclusive());

        assert!(!spec.satisfies(&v("1.0")));
        assert!(spec.satisfies(&v("3.2")));
        assert!(spec.satisfies(&v("5.0")));
        assert!(!spec.satisfies(&v("5.0.1")));
    }

    #[test]
    fn test_parse_malformed() {
        for input in [
            "", "[]", "[,]", "(1.0)", "[1.0)", "1.0]", "[1.0", "{1.0}", "[1.0,2.0,3.0]",
            "[a,b]", "(1.0,x]",
        ] {
            assert!(
                matches!(VersionSpec::parse(input), Err(Error::InvalidVersionSpec(_))),
                "expected '{}' to be rejected",
                input
            );
        }
    }

    #[test]
    fn test_min_greater_than_max_rejected() {
        let err = VersionSpec::parse("[2.0,1.0]").unwrap_err();
        assert!(matches!(err, Error::InvalidVersionRange { .. }));

        assert!(VersionSpec::new(Some(v("3.0")), true, Some(v("2.0")), true).is_err());
        assert!(VersionSpec::new(Some(v("2.0")), true, Some(v("3.0")), false).is_ok());
    }

    #[test]
    fn test_empty_interval_satisfies_nothing() {
        let spec = VersionSpec::parse("(1.0,1.0)").unwrap();
        assert!(!spec.satisfies(&v("1.0")));
        assert!(!spec.is_exact());
    }

    #[test]
    fn test_canonical_round_trip() {
        for canonical in ["1.0", "[1.5]", "(1.0, )", "[, 1.0]", "[, 1.0)", "(1.0, 5.0]", "[1.0, 2.0)"] {
            let spec = VersionSpec::parse(canonical).unwrap();
            assert_eq!(spec.to_string(), canonical);
            assert_eq!(VersionSpec::parse(&spec.to_string()).unwrap(), spec);
        }
    }

    #[test]
    fn test_canonicalization_of_compact_forms() {
        assert_eq!(VersionSpec::parse("(1.0,5.0]").unwrap().to_string(), "(1.0, 5.0]");
        assert_eq!(VersionSpec::parse("[1.0,)").unwrap().to_string(), "1.0");
        assert_eq!(VersionSpec::parse("[1.0,1.0]").unwrap().to_string(), "[1.0]");
    }

    #[test]
    fn test_pretty_print() {
        let cases = [
            ("[1.5]", "(= 1.5)"),
            ("1.0", "(≥ 1.0)"),
            ("(1.0,)", "(> 1.0)"),
            ("[,2.0]", "(≤ 2.0)"),
            ("[,2.0)", "(< 2.0)"),
            ("(1.0,5.0]", "(> 1.0 && ≤ 5.0)"),
            ("[1.0,2.0)", "(≥ 1.0 && < 2.0)"),
        ];
        for (input, expected) in cases {
            let spec = VersionSpec::parse(input).unwrap();
            assert_eq!(spec.pretty().to_string(), expected, "for '{}'", input);
        }
    }
}
