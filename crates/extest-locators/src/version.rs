//! Application version numbers.
//!
//! Locator diffs are ordered by plain `major.minor.patch` comparison. Release
//! channel suffixes such as `-insider` are dropped before parsing, so an insider
//! build resolves against the stable line it is heading towards.

use crate::result::{LocatorError, LocatorResult};
use std::fmt;
use std::str::FromStr;

/// A `major.minor.patch` application version
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    /// Major component
    pub major: u64,
    /// Minor component
    pub minor: u64,
    /// Patch component
    pub patch: u64,
}

impl Version {
    /// Create a version from its components
    #[must_use]
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Strip a pre-release or build suffix, leaving the numeric part.
    ///
    /// `"1.50.0-insider"` becomes `"1.50.0"`; `"v1.41.1+abc"` becomes `"1.41.1"`.
    #[must_use]
    pub fn normalize(input: &str) -> &str {
        let trimmed = input.trim();
        let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
        let end = trimmed
            .find(|c: char| c == '-' || c == '+')
            .unwrap_or(trimmed.len());
        &trimmed[..end]
    }

    /// Whether the input carries a pre-release suffix
    #[must_use]
    pub fn is_prerelease(input: &str) -> bool {
        input.trim().contains('-')
    }

    /// Parse a version string, ignoring any pre-release suffix
    pub fn parse(input: &str) -> LocatorResult<Self> {
        input.parse()
    }
}

impl FromStr for Version {
    type Err = LocatorError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || LocatorError::InvalidVersion {
            input: input.to_string(),
        };

        let numeric = Self::normalize(input);
        if numeric.is_empty() {
            return Err(invalid());
        }

        let mut parts = [0u64; 3];
        let mut count = 0;
        for piece in numeric.split('.') {
            if count == parts.len() {
                return Err(invalid());
            }
            parts[count] = piece.parse().map_err(|_| invalid())?;
            count += 1;
        }

        Ok(Self::new(parts[0], parts[1], parts[2]))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod parse_tests {
        use super::*;

        #[test]
        fn test_full_version() {
            assert_eq!(Version::parse("1.37.0").unwrap(), Version::new(1, 37, 0));
        }

        #[test]
        fn test_short_versions_default_to_zero() {
            assert_eq!(Version::parse("1.41").unwrap(), Version::new(1, 41, 0));
            assert_eq!(Version::parse("2").unwrap(), Version::new(2, 0, 0));
        }

        #[test]
        fn test_insider_suffix_is_ignored() {
            assert_eq!(
                Version::parse("1.50.0-insider").unwrap(),
                Version::parse("1.50.0").unwrap()
            );
        }

        #[test]
        fn test_build_metadata_and_prefix() {
            assert_eq!(Version::parse("v1.41.1+abc").unwrap(), Version::new(1, 41, 1));
        }

        #[test]
        fn test_rejects_garbage() {
            assert!(Version::parse("").is_err());
            assert!(Version::parse("-insider").is_err());
            assert!(Version::parse("1.x.0").is_err());
            assert!(Version::parse("1.2.3.4").is_err());
        }
    }

    mod ordering_tests {
        use super::*;

        #[test]
        fn test_numeric_not_lexical() {
            assert!(Version::parse("1.9.0").unwrap() < Version::parse("1.10.0").unwrap());
            assert!(Version::parse("1.41.1").unwrap() > Version::parse("1.41.0").unwrap());
        }

        #[test]
        fn test_display_round_trip_of_short_form() {
            assert_eq!(Version::parse("1.41").unwrap().to_string(), "1.41.0");
        }

        #[test]
        fn test_prerelease_detection() {
            assert!(Version::is_prerelease("1.50.0-insider"));
            assert!(!Version::is_prerelease("1.50.0"));
            assert_eq!(Version::normalize(" 1.50.0-insider "), "1.50.0");
        }
    }
}
