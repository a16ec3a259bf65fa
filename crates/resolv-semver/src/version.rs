//! Semantic version parsing and precedence ordering

use std::cmp::Ordering;
use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

/// Error type for version and condition construction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Invalid semantic version \"{0}\"")]
    InvalidVersion(String),
    #[error("Invalid operator \"{operator}\", expected one of: {expected}")]
    InvalidOperator { operator: String, expected: String },
    #[error("Wildcard operand \"{0}\" cannot be used in a relational condition")]
    WildcardOperand(String),
}

lazy_static! {
    /// Grammar: MAJOR[.MINOR[.PATCH]][-PRERELEASE][+BUILD], each numeric
    /// component either a digit run or a literal `*`. Leading zeros are
    /// accepted, digit runs are only checked for being digit runs.
    static ref SEMVER_RE: Regex = Regex::new(
        r"^(\d+|\*)(?:\.(\d+|\*))?(?:\.(\d+|\*))?(?:-([0-9A-Za-z.-]+))?(?:\+([0-9A-Za-z.-]+))?$"
    ).unwrap();
}

/// One dot-separated pre-release identifier
///
/// Numeric identifiers sort before alphanumeric ones, so the variant
/// order here is load-bearing for the derived `Ord`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Identifier {
    Numeric(u64),
    AlphaNumeric(String),
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(n) => write!(f, "{}", n),
            Identifier::AlphaNumeric(s) => write!(f, "{}", s),
        }
    }
}

/// A parsed semantic version, or a wildcard pattern variant of one
///
/// `None` in a numeric field is the wildcard marker; an omitted trailing
/// component parses the same way as a literal `*`.
#[derive(Debug, Clone)]
pub struct VersionValue {
    major: Option<u64>,
    minor: Option<u64>,
    patch: Option<u64>,
    pre_release: Option<Vec<Identifier>>,
    build_metadata: Option<String>,
}

impl VersionValue {
    /// Parse a version string
    pub fn parse(text: &str) -> Result<Self, FormatError> {
        let captures = SEMVER_RE
            .captures(text)
            .ok_or_else(|| FormatError::InvalidVersion(text.to_string()))?;

        let part = |index: usize| -> Result<Option<u64>, FormatError> {
            match captures.get(index) {
                None => Ok(None),
                Some(m) if m.as_str() == "*" => Ok(None),
                Some(m) => m
                    .as_str()
                    .parse::<u64>()
                    .map(Some)
                    .map_err(|_| FormatError::InvalidVersion(text.to_string())),
            }
        };

        let pre_release = match captures.get(4) {
            None => None,
            Some(m) => Some(
                m.as_str()
                    .split('.')
                    .map(|id| parse_identifier(id, text))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
        };

        Ok(VersionValue {
            major: part(1)?,
            minor: part(2)?,
            patch: part(3)?,
            pre_release,
            build_metadata: captures.get(5).map(|m| m.as_str().to_string()),
        })
    }

    /// Get the major component, `None` meaning wildcard
    pub fn major(&self) -> Option<u64> {
        self.major
    }

    /// Get the minor component, `None` meaning wildcard
    pub fn minor(&self) -> Option<u64> {
        self.minor
    }

    /// Get the patch component, `None` meaning wildcard
    pub fn patch(&self) -> Option<u64> {
        self.patch
    }

    /// Get the pre-release identifiers, if any
    pub fn pre_release(&self) -> Option<&[Identifier]> {
        self.pre_release.as_deref()
    }

    /// Get the build metadata, if any (display only, never compared)
    pub fn build_metadata(&self) -> Option<&str> {
        self.build_metadata.as_deref()
    }

    /// Check that no numeric field is a wildcard
    pub fn is_concrete(&self) -> bool {
        self.major.is_some() && self.minor.is_some() && self.patch.is_some()
    }

    /// SemVer 2.0 precedence comparison
    ///
    /// Major, minor and patch are compared numerically in order; a
    /// pairing where either side is a wildcard is skipped. With all
    /// three equal, a stable version is greater than a pre-release one,
    /// and two pre-release identifier lists compare element-wise
    /// (numeric before alphanumeric, a strict prefix is less). Build
    /// metadata never participates.
    ///
    /// This is a total, transitive order over concrete versions.
    /// Wildcard patterns are matched with [`matches_wildcard`], never
    /// ordered.
    ///
    /// [`matches_wildcard`]: VersionValue::matches_wildcard
    pub fn precedence(&self, other: &VersionValue) -> Ordering {
        let lhs = [self.major, self.minor, self.patch];
        let rhs = [other.major, other.minor, other.patch];

        for (a, b) in lhs.iter().zip(rhs.iter()) {
            if let (Some(a), Some(b)) = (a, b) {
                match a.cmp(b) {
                    Ordering::Equal => continue,
                    decided => return decided,
                }
            }
        }

        match (&self.pre_release, &other.pre_release) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => a.cmp(b),
        }
    }

    /// Test this version against a wildcard pattern
    ///
    /// A wildcard field in `pattern` matches anything; the remaining
    /// fields must be numerically equal. Pre-release and build metadata
    /// are ignored. This relation is not transitive and must never be
    /// used to order two concrete versions.
    pub fn matches_wildcard(&self, pattern: &VersionValue) -> bool {
        let lhs = [self.major, self.minor, self.patch];
        let rhs = [pattern.major, pattern.minor, pattern.patch];

        lhs.iter().zip(rhs.iter()).all(|(field, expected)| {
            match expected {
                None => true,
                Some(expected) => *field == Some(*expected),
            }
        })
    }
}

fn parse_identifier(id: &str, source: &str) -> Result<Identifier, FormatError> {
    if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) {
        id.parse::<u64>()
            .map(Identifier::Numeric)
            .map_err(|_| FormatError::InvalidVersion(source.to_string()))
    } else {
        Ok(Identifier::AlphaNumeric(id.to_string()))
    }
}

impl PartialEq for VersionValue {
    fn eq(&self, other: &Self) -> bool {
        // Build metadata is excluded from equality
        self.major == other.major
            && self.minor == other.minor
            && self.patch == other.patch
            && self.pre_release == other.pre_release
    }
}

impl Eq for VersionValue {}

impl fmt::Display for VersionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = |part: Option<u64>| match part {
            Some(n) => n.to_string(),
            None => "*".to_string(),
        };

        write!(f, "{}.{}.{}", field(self.major), field(self.minor), field(self.patch))?;

        if let Some(ref identifiers) = self.pre_release {
            let joined: Vec<String> = identifiers.iter().map(|id| id.to_string()).collect();
            write!(f, "-{}", joined.join("."))?;
        }

        if let Some(ref build) = self.build_metadata {
            write!(f, "+{}", build)?;
        }

        Ok(())
    }
}
