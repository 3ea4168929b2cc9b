//! Version key parsing
//!
//! Memory files are named `v<major>-<minor>.json`. Parsing is total:
//! every name yields either a version key or `Unversioned`.

use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::sync::OnceLock;

/// Non-negative integer of any size, kept as canonical decimal text
/// (no leading zeros, zero is `"0"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionNumber(String);

impl VersionNumber {
    /// Parse ASCII decimal digits; `None` for anything else
    pub fn parse(digits: &str) -> Option<Self> {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let trimmed = digits.trim_start_matches('0');
        let canonical = if trimmed.is_empty() { "0" } else { trimmed };
        Some(Self(canonical.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for VersionNumber {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl Default for VersionNumber {
    fn default() -> Self {
        Self("0".to_string())
    }
}

impl Ord for VersionNumber {
    // Canonical text: more digits means larger, equal length compares bytewise
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for VersionNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `(major, minor)` pair, ordered lexicographically
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct VersionKey {
    pub major: VersionNumber,
    pub minor: VersionNumber,
}

impl VersionKey {
    pub fn new(major: u64, minor: u64) -> Self {
        Self {
            major: major.into(),
            minor: minor.into(),
        }
    }

    /// Key from two digit strings, e.g. path parameters
    pub fn from_digits(major: &str, minor: &str) -> Option<Self> {
        Some(Self {
            major: VersionNumber::parse(major)?,
            minor: VersionNumber::parse(minor)?,
        })
    }

    /// File name holding this version
    pub fn file_name(&self) -> String {
        format!("v{}-{}.json", self.major, self.minor)
    }
}

impl fmt::Display for VersionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.major, self.minor)
    }
}

/// Result of parsing a candidate file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedName {
    Versioned(VersionKey),
    Unversioned,
}

impl ParsedName {
    /// Ordering key used for latest selection.
    ///
    /// Unversioned names still take part, as `(0, 0)`. Excluding them
    /// would arguably be more correct, but it changes which file an
    /// otherwise pattern-free directory resolves to.
    pub fn sort_key(&self) -> VersionKey {
        match self {
            Self::Versioned(key) => key.clone(),
            Self::Unversioned => VersionKey::default(),
        }
    }
}

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Anchored at the start only: "v1-2.json.json" parses as 1-2
    PATTERN.get_or_init(|| {
        Regex::new(r"^v([0-9]+)-([0-9]+)\.json").expect("valid version pattern")
    })
}

/// Parse a file name into its version key
pub fn parse_file_name(name: &str) -> ParsedName {
    name_pattern()
        .captures(name)
        .and_then(|caps| VersionKey::from_digits(&caps[1], &caps[2]))
        .map_or(ParsedName::Unversioned, ParsedName::Versioned)
}

/// Whether a directory entry is considered at all (`v*.json`)
pub fn is_candidate(name: &str) -> bool {
    name.starts_with('v') && name.ends_with(".json")
}
