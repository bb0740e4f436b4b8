use crate::domain::{ReleaseStage, VersionIdentifier};
use regex::Regex;
use std::sync::OnceLock;

/// Raw tag string paired with its parsed version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCandidate {
    pub name: String,
    pub version: VersionIdentifier,
}

impl TagCandidate {
    /// Parse a tag, returning `None` when it is not a release version
    pub fn parse(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        let version = VersionIdentifier::parse(&name)?;
        Some(TagCandidate { name, version })
    }
}

/// Strict tag naming used when looking back for the previous release
/// of the same stage: `v1.2.3rc4` for rc, `v1.2.3` for stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagPattern {
    stage: ReleaseStage,
}

impl TagPattern {
    pub fn new(stage: ReleaseStage) -> Self {
        TagPattern { stage }
    }

    /// Format a version as a tag (`1.2.3` -> `v1.2.3`)
    pub fn format(version: &str) -> String {
        format!("v{}", version)
    }

    /// Whether a tag follows this stage's naming exactly
    pub fn matches(&self, tag: &str) -> bool {
        static RC: OnceLock<Option<Regex>> = OnceLock::new();
        static STABLE: OnceLock<Option<Regex>> = OnceLock::new();

        let re = match self.stage {
            ReleaseStage::Rc => RC.get_or_init(|| Regex::new(r"^v\d+\.\d+\.\d+rc\d+$").ok()),
            ReleaseStage::Stable => STABLE.get_or_init(|| Regex::new(r"^v\d+\.\d+\.\d+$").ok()),
            ReleaseStage::Dev => return VersionIdentifier::parse(tag).is_some(),
        };
        re.as_ref().map(|re| re.is_match(tag)).unwrap_or(false)
    }
}
