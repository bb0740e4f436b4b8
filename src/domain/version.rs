use crate::domain::prerelease::{PreRelease, PreReleaseLabel};
use crate::error::ReleaseTrainError;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

fn version_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)^v?(?P<major>\d+)\.(?P<minor>\d+)\.(?P<patch>\d+)(?:[-_.]?(?P<label>alpha|beta|rc|a|b|c)[-_.]?(?P<pre>\d+)?)?(?P<devmark>[-_.]?dev[-_.]?(?P<dev>\d+)?)?$",
        )
        .ok()
    })
    .as_ref()
}

/// Structured, comparable release version parsed from a tag.
///
/// Covers a numeric `major.minor.patch` triple, an optional labelled
/// pre-release (`a1`, `b2`, `rc3`) and an optional development suffix
/// (`.dev4`). Ordering follows the release ecosystem's pre-release rules:
/// for the same triple, `dev < alpha < beta < rc < final`, and every number
/// is compared as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VersionIdentifier {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre: Option<PreRelease>,
    pub dev: Option<u64>,
}

impl VersionIdentifier {
    /// Create a final release version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        VersionIdentifier {
            major,
            minor,
            patch,
            pre: None,
            dev: None,
        }
    }

    pub fn with_pre(mut self, pre: PreRelease) -> Self {
        self.pre = Some(pre);
        self
    }

    pub fn with_dev(mut self, dev: u64) -> Self {
        self.dev = Some(dev);
        self
    }

    /// Parse a tag or version string.
    ///
    /// One leading `v` is stripped. Returns `None` for anything outside the
    /// grammar, so callers can drop third-party or legacy tags silently.
    ///
    /// # Example
    /// ```
    /// use release_train::domain::VersionIdentifier;
    ///
    /// let v = VersionIdentifier::parse("v1.1.23.dev11").unwrap();
    /// assert!(v.is_dev());
    /// assert_eq!(v.to_string(), "1.1.23.dev11");
    /// assert!(VersionIdentifier::parse("not-a-version").is_none());
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        let captures = version_regex()?.captures(raw)?;
        let number = |name: &str| -> Option<Option<u64>> {
            match captures.name(name) {
                Some(m) => m.as_str().parse::<u64>().ok().map(Some),
                None => Some(None),
            }
        };

        let major = number("major")??;
        let minor = number("minor")??;
        let patch = number("patch")??;

        let pre = match captures.name("label") {
            Some(label) => {
                let label = label.as_str().parse::<PreReleaseLabel>().ok()?;
                Some(PreRelease::new(label, number("pre")?.unwrap_or(0)))
            }
            None => None,
        };

        let dev = match captures.name("devmark") {
            Some(_) => Some(number("dev")?.unwrap_or(0)),
            None => None,
        };

        Some(VersionIdentifier {
            major,
            minor,
            patch,
            pre,
            dev,
        })
    }

    /// True when the version carries a development-release suffix
    pub fn is_dev(&self) -> bool {
        self.dev.is_some()
    }

    /// True when the pre-release label is specifically `rc`
    pub fn is_rc(&self) -> bool {
        self.pre.map(|p| p.is_rc()).unwrap_or(false)
    }

    /// True for a final release with no qualifier
    pub fn is_final(&self) -> bool {
        self.pre.is_none() && self.dev.is_none()
    }

    fn sort_key(&self) -> (u64, u64, u64, PreKey, DevKey) {
        let pre = match (self.pre, self.dev) {
            (Some(p), _) => PreKey::Pre(p),
            (None, Some(_)) => PreKey::DevOnly,
            (None, None) => PreKey::Final,
        };
        let dev = match self.dev {
            Some(n) => DevKey::Dev(n),
            None => DevKey::Release,
        };
        (self.major, self.minor, self.patch, pre, dev)
    }
}

// Variant order is the ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum PreKey {
    DevOnly,
    Pre(PreRelease),
    Final,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum DevKey {
    Dev(u64),
    Release,
}

impl Ord for VersionIdentifier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for VersionIdentifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for VersionIdentifier {
    type Err = ReleaseTrainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VersionIdentifier::parse(s).ok_or_else(|| ReleaseTrainError::InvalidVersion(s.to_string()))
    }
}

impl fmt::Display for VersionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = self.pre {
            write!(f, "{}", pre)?;
        }
        if let Some(dev) = self.dev {
            write!(f, ".dev{}", dev)?;
        }
        Ok(())
    }
}
