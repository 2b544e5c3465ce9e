// src/version/mod.rs

//! Version handling for package identities and dependency ranges
//!
//! This module provides parsing and comparison for dotted package versions
//! with an optional special (prerelease) suffix, such as `1.0`, `2.1.0.3`
//! or `1.0-beta`. Range predicates over these versions live in [`spec`].

pub mod spec;

pub use spec::VersionSpec;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Maximum number of numeric components (major.minor.build.revision)
const MAX_COMPONENTS: usize = 4;

/// A parsed package version with an optional special version suffix
///
/// Format: `major[.minor[.build[.revision]]][-special]`
///
/// Missing numeric components compare as zero, so `1.0` and `1.0.0` are the
/// same version. The original text is kept for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SemanticVersion {
    components: Vec<u64>,
    special: Option<String>,
    original: String,
}

impl SemanticVersion {
    /// Parse a version string
    ///
    /// Examples:
    /// - "1.0" → components=[1, 0], special=None
    /// - "2.1.0.3" → components=[2, 1, 0, 3], special=None
    /// - "1.0-beta" → components=[1, 0], special=Some("beta")
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidVersion(s.to_string()));
        }

        let (numeric, special) = match trimmed.split_once('-') {
            Some((numeric, special)) => (numeric, Some(special)),
            None => (trimmed, None),
        };

        let mut components = Vec::with_capacity(MAX_COMPONENTS);
        for part in numeric.split('.') {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Error::InvalidVersion(s.to_string()));
            }
            let value = part
                .parse::<u64>()
                .map_err(|_| Error::InvalidVersion(s.to_string()))?;
            components.push(value);
        }

        if components.len() > MAX_COMPONENTS {
            return Err(Error::InvalidVersion(s.to_string()));
        }

        if let Some(special) = special
            && !is_valid_special(special)
        {
            return Err(Error::InvalidVersion(s.to_string()));
        }

        Ok(Self {
            components,
            special: special.map(str::to_string),
            original: trimmed.to_string(),
        })
    }

    /// Build a release version from numeric components
    pub fn new(major: u64, minor: u64) -> Self {
        Self {
            components: vec![major, minor],
            special: None,
            original: format!("{}.{}", major, minor),
        }
    }

    pub fn major(&self) -> u64 {
        self.component(0)
    }

    pub fn minor(&self) -> u64 {
        self.component(1)
    }

    /// The special (prerelease) suffix, if any
    pub fn special(&self) -> Option<&str> {
        self.special.as_deref()
    }

    pub fn is_prerelease(&self) -> bool {
        self.special.is_some()
    }

    fn component(&self, index: usize) -> u64 {
        self.components.get(index).copied().unwrap_or(0)
    }

    /// Numeric components with trailing zeros removed, used for hashing
    fn significant_components(&self) -> &[u64] {
        let len = self
            .components
            .iter()
            .rposition(|&c| c != 0)
            .map_or(0, |pos| pos + 1);
        &self.components[..len]
    }

    /// Compare two versions
    pub fn compare(&self, other: &SemanticVersion) -> Ordering {
        for index in 0..MAX_COMPONENTS {
            match self.component(index).cmp(&other.component(index)) {
                Ordering::Equal => {}
                ord => return ord,
            }
        }

        // A release sorts after any of its prereleases
        match (&self.special, &other.special) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => compare_special(a, b),
        }
    }
}

/// Special versions start with an alphanumeric and contain only
/// alphanumerics, dots and hyphens.
fn is_valid_special(special: &str) -> bool {
    special
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphanumeric())
        && special
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
}

/// Compare special versions with semver precedence when both are valid
/// prerelease identifiers, falling back to case-insensitive ordering.
fn compare_special(a: &str, b: &str) -> Ordering {
    let a = a.to_ascii_lowercase();
    let b = b.to_ascii_lowercase();
    match (semver::Prerelease::new(&a), semver::Prerelease::new(&b)) {
        (Ok(pa), Ok(pb)) => pa.cmp(&pb),
        _ => a.cmp(&b),
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl FromStr for SemanticVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SemanticVersion {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<SemanticVersion> for String {
    fn from(version: SemanticVersion) -> Self {
        version.original
    }
}

impl PartialEq for SemanticVersion {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for SemanticVersion {}

impl Hash for SemanticVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.significant_components().hash(state);
        self.special
            .as_ref()
            .map(|s| s.to_ascii_lowercase())
            .hash(state);
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
