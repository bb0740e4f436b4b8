//! Pre-release qualifiers for release-train versions
//!
//! A qualifier is either a labelled pre-release (alpha, beta, rc) with an
//! iteration number, or a development suffix (`.devN`). Labels are ordered
//! alpha < beta < rc, matching the public pre-release grammar.

use std::fmt;
use std::str::FromStr;

/// Pre-release label (alpha, beta or rc)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PreReleaseLabel {
    /// Alpha pre-release
    Alpha,
    /// Beta pre-release
    Beta,
    /// Release candidate
    ReleaseCandidate,
}

impl FromStr for PreReleaseLabel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "a" | "alpha" => Ok(PreReleaseLabel::Alpha),
            "b" | "beta" => Ok(PreReleaseLabel::Beta),
            "rc" | "c" => Ok(PreReleaseLabel::ReleaseCandidate),
            _ => Err(()),
        }
    }
}

impl fmt::Display for PreReleaseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreReleaseLabel::Alpha => write!(f, "a"),
            PreReleaseLabel::Beta => write!(f, "b"),
            PreReleaseLabel::ReleaseCandidate => write!(f, "rc"),
        }
    }
}

/// Labelled pre-release with its iteration number
///
/// # Examples
/// - "rc1" -> PreRelease { label: ReleaseCandidate, number: 1 }
/// - "a3" -> PreRelease { label: Alpha, number: 3 }
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PreRelease {
    pub label: PreReleaseLabel,
    pub number: u64,
}

impl PreRelease {
    pub fn new(label: PreReleaseLabel, number: u64) -> Self {
        PreRelease { label, number }
    }

    pub fn rc(number: u64) -> Self {
        PreRelease::new(PreReleaseLabel::ReleaseCandidate, number)
    }

    pub fn is_rc(&self) -> bool {
        self.label == PreReleaseLabel::ReleaseCandidate
    }
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.label, self.number)
    }
}
