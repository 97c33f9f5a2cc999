//! Semantic version type.
//!
//! Provides a Version type following semver 2.0 precedence. Build metadata
//! is accepted on input but never stored, so two versions that differ only
//! in build metadata are equal.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Semantic version (major.minor.patch-prerelease)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: Vec<Identifier>,
}

/// A single dot-separated prerelease identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    /// All-digit identifier, compared numerically
    Numeric(u64),
    /// Identifier containing letters or hyphens, compared lexically
    Alpha(String),
}

/// Version and constraint parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("Empty version string")]
    Empty,

    #[error("Invalid version format '{input}': expected MAJOR.MINOR.PATCH")]
    InvalidFormat { input: String },

    #[error("Invalid number in version: '{component}'")]
    InvalidNumber { component: String },

    #[error("Leading zero in version component: '{component}'")]
    LeadingZero { component: String },

    #[error("Invalid prerelease identifier: '{prerelease}'")]
    InvalidPrerelease { prerelease: String },

    #[error("Invalid build metadata: '{build}'")]
    InvalidBuild { build: String },

    #[error("No version found in constraint '{input}'")]
    NoVersionInConstraint { input: String },
}

impl Version {
    /// Create a new release version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: Vec::new(),
        }
    }

    /// Parse a version string (alias for `str::parse`)
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        input.parse()
    }

    /// Check if this is a prerelease version
    pub fn is_prerelease(&self) -> bool {
        !self.prerelease.is_empty()
    }

    /// Next major release (`X+1.0.0`)
    pub fn bump_major(&self) -> Self {
        Version::new(self.major.saturating_add(1), 0, 0)
    }

    /// Next minor release (`X.Y+1.0`)
    pub fn bump_minor(&self) -> Self {
        Version::new(self.major, self.minor.saturating_add(1), 0)
    }

    /// Precedence comparison
    fn precedence_cmp(&self, other: &Self) -> Ordering {
        match (self.major, self.minor, self.patch).cmp(&(other.major, other.minor, other.patch)) {
            Ordering::Equal => {
                match (self.is_prerelease(), other.is_prerelease()) {
                    (false, false) => Ordering::Equal,
                    (true, false) => Ordering::Less, // prerelease < normal
                    (false, true) => Ordering::Greater,
                    // Slice ordering: element-wise, then shorter first
                    (true, true) => self.prerelease.cmp(&other.prerelease),
                }
            },
            other => other,
        }
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err(VersionError::Empty);
        }

        let body = input.strip_prefix('v').unwrap_or(input);

        // Build metadata is validated and dropped
        let (body, build) = match body.split_once('+') {
            Some((v, b)) => (v, Some(b)),
            None => (body, None),
        };
        if let Some(build) = build {
            if !build.split('.').all(is_identifier) {
                return Err(VersionError::InvalidBuild {
                    build: build.to_string(),
                });
            }
        }

        let (core, prerelease) = match body.split_once('-') {
            Some((c, p)) => (c, Some(p)),
            None => (body, None),
        };

        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() != 3 {
            return Err(VersionError::InvalidFormat {
                input: input.to_string(),
            });
        }

        let major = parse_component(parts[0])?;
        let minor = parse_component(parts[1])?;
        let patch = parse_component(parts[2])?;

        let prerelease = match prerelease {
            Some(pre) => parse_prerelease(pre)?,
            None => Vec::new(),
        };

        Ok(Version {
            major,
            minor,
            patch,
            prerelease,
        })
    }
}

fn parse_component(component: &str) -> Result<u64, VersionError> {
    if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
        return Err(VersionError::InvalidNumber {
            component: component.to_string(),
        });
    }
    if component.len() > 1 && component.starts_with('0') {
        return Err(VersionError::LeadingZero {
            component: component.to_string(),
        });
    }
    component.parse().map_err(|_| VersionError::InvalidNumber {
        component: component.to_string(),
    })
}

fn parse_prerelease(prerelease: &str) -> Result<Vec<Identifier>, VersionError> {
    let invalid = || VersionError::InvalidPrerelease {
        prerelease: prerelease.to_string(),
    };

    prerelease
        .split('.')
        .map(|segment| {
            if !is_identifier(segment) {
                return Err(invalid());
            }
            if segment.bytes().all(|b| b.is_ascii_digit()) {
                segment.parse().map(Identifier::Numeric).map_err(|_| invalid())
            } else {
                Ok(Identifier::Alpha(segment.to_string()))
            }
        })
        .collect()
}

/// `[0-9A-Za-z-]+`
fn is_identifier(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;

        for (i, identifier) in self.prerelease.iter().enumerate() {
            let sep = if i == 0 { '-' } else { '.' };
            write!(f, "{}{}", sep, identifier)?;
        }

        Ok(())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(n) => write!(f, "{}", n),
            Identifier::Alpha(s) => f.write_str(s),
        }
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.precedence_cmp(other)
    }
}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Identifier {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Identifier::Numeric(a), Identifier::Numeric(b)) => a.cmp(b),
            (Identifier::Numeric(_), Identifier::Alpha(_)) => Ordering::Less,
            (Identifier::Alpha(_), Identifier::Numeric(_)) => Ordering::Greater,
            (Identifier::Alpha(a), Identifier::Alpha(b)) => a.cmp(b),
        }
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        s.parse().unwrap()
    }

    #[test]
    fn test_version_parsing() {
        let v = v("1.2.3");
        assert_eq!(v.major, 1);
        assert_eq!(v.minor, 2);
        assert_eq!(v.patch, 3);
        assert!(v.prerelease.is_empty());
    }

    #[test]
    fn test_version_with_prerelease() {
        let v = v("1.2.3-alpha.1");
        assert_eq!(
            v.prerelease,
            vec![Identifier::Alpha("alpha".to_string()), Identifier::Numeric(1)]
        );
        assert!(v.is_prerelease());
    }

    #[test]
    fn test_leading_v_and_build_metadata() {
        let parsed = v("v1.2.3-rc.1+build.42");
        assert_eq!(parsed, v("1.2.3-rc.1"));
        assert_eq!(parsed.to_string(), "1.2.3-rc.1");
    }

    #[test]
    fn test_build_metadata_ignored_for_equality() {
        assert_eq!(v("1.0.0+build1"), v("1.0.0+build2"));
        assert_eq!(v("1.0.0+build1").cmp(&v("1.0.0")), Ordering::Equal);
    }

    #[test]
    fn test_invalid_versions() {
        assert_eq!(Version::parse(""), Err(VersionError::Empty));
        assert!(matches!(
            Version::parse("1.2"),
            Err(VersionError::InvalidFormat { .. })
        ));
        assert!(matches!(
            Version::parse("1.2.3.4"),
            Err(VersionError::InvalidFormat { .. })
        ));
        assert!(matches!(
            Version::parse("1.x.3"),
            Err(VersionError::InvalidNumber { .. })
        ));
        assert!(matches!(
            Version::parse("01.2.3"),
            Err(VersionError::LeadingZero { .. })
        ));
        assert!(matches!(
            Version::parse("1.2.3-"),
            Err(VersionError::InvalidPrerelease { .. })
        ));
        assert!(matches!(
            Version::parse("1.2.3-alpha..1"),
            Err(VersionError::InvalidPrerelease { .. })
        ));
        assert!(matches!(
            Version::parse("1.2.3+"),
            Err(VersionError::InvalidBuild { .. })
        ));
        assert!(matches!(
            Version::parse("1.2.3+bu_ild"),
            Err(VersionError::InvalidBuild { .. })
        ));
    }

    #[test]
    fn test_zero_components_allowed() {
        assert_eq!(v("0.0.0"), Version::new(0, 0, 0));
        assert_eq!(v("10.0.20"), Version::new(10, 0, 20));
    }

    #[test]
    fn test_version_display() {
        assert_eq!(Version::new(1, 2, 3).to_string(), "1.2.3");
        assert_eq!(v("1.2.3-beta.2").to_string(), "1.2.3-beta.2");
    }

    #[test]
    fn test_version_comparison() {
        let v1 = Version::new(1, 0, 0);
        let v2 = Version::new(2, 0, 0);
        let v3 = Version::new(1, 1, 0);

        assert!(v1 < v2);
        assert!(v1 < v3);
        assert!(v3 < v2);
        assert!(Version::new(1, 0, 10) > Version::new(1, 0, 9));
    }

    #[test]
    fn test_prerelease_precedence_chain() {
        let chain = [
            "1.0.0-alpha",
            "1.0.0-alpha.1",
            "1.0.0-beta",
            "1.0.0-beta.2",
            "1.0.0-rc.1",
            "1.0.0",
        ];

        for pair in chain.windows(2) {
            assert!(v(pair[0]) < v(pair[1]), "{} should be < {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_numeric_identifier_before_alpha() {
        assert!(v("1.0.0-1") < v("1.0.0-alpha"));
        assert!(v("1.0.0-alpha.2") < v("1.0.0-alpha.10"));
        assert!(v("1.0.0-alpha.9") < v("1.0.0-alpha.beta"));
    }

    #[test]
    fn test_bump_helpers() {
        let base = v("1.4.2-rc.1");
        assert_eq!(base.bump_major(), Version::new(2, 0, 0));
        assert_eq!(base.bump_minor(), Version::new(1, 5, 0));
    }

    #[test]
    fn test_serde_as_string() {
        let parsed: Version = serde_json::from_str("\"2.1.0-beta\"").unwrap();
        assert_eq!(parsed, v("2.1.0-beta"));
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"2.1.0-beta\"");
        assert!(serde_json::from_str::<Version>("\"2.1\"").is_err());
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn identifier() -> impl Strategy<Value = String> {
        prop_oneof!["[a-z][a-z0-9-]{0,6}", (0u64..50).prop_map(|n| n.to_string())]
    }

    fn version_string() -> impl Strategy<Value = String> {
        (
            0u64..100,
            0u64..100,
            0u64..100,
            prop::collection::vec(identifier(), 0..3),
        )
            .prop_map(|(major, minor, patch, pre)| {
                let mut s = format!("{}.{}.{}", major, minor, patch);
                if !pre.is_empty() {
                    s.push('-');
                    s.push_str(&pre.join("."));
                }
                s
            })
    }

    proptest! {
        #[test]
        fn parse_compare_reflexive(s in version_string()) {
            let a: Version = s.parse().unwrap();
            let b: Version = s.parse().unwrap();
            prop_assert_eq!(a.cmp(&b), Ordering::Equal);
        }

        #[test]
        fn display_round_trip(s in version_string()) {
            let parsed: Version = s.parse().unwrap();
            let reparsed: Version = parsed.to_string().parse().unwrap();
            prop_assert_eq!(parsed, reparsed);
        }

        #[test]
        fn build_metadata_never_affects_order(s in version_string(), build in "[a-z0-9]{1,8}") {
            let plain: Version = s.parse().unwrap();
            let with_build: Version = format!("{}+{}", s, build).parse().unwrap();
            prop_assert_eq!(plain.cmp(&with_build), Ordering::Equal);
        }

        #[test]
        fn comparison_antisymmetric(a in version_string(), b in version_string()) {
            let a: Version = a.parse().unwrap();
            let b: Version = b.parse().unwrap();
            prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        }

        #[test]
        fn comparison_transitive(a in version_string(), b in version_string(), c in version_string()) {
            let a: Version = a.parse().unwrap();
            let b: Version = b.parse().unwrap();
            let c: Version = c.parse().unwrap();
            if a <= b && b <= c {
                prop_assert!(a <= c, "Transitivity violated: {} <= {} <= {}", a, b, c);
            }
        }
    }
}
