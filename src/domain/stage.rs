use crate::domain::VersionIdentifier;
use crate::error::ReleaseTrainError;
use std::fmt;
use std::str::FromStr;

/// Stage whose leading tag can be discovered (`dev` or `rc`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagStage {
    Dev,
    Rc,
}

impl TagStage {
    /// Whether a parsed version belongs to this stage
    pub fn matches(&self, version: &VersionIdentifier) -> bool {
        match self {
            TagStage::Dev => version.is_dev(),
            TagStage::Rc => version.is_rc(),
        }
    }

    /// Operator guidance when no tag of this stage exists yet
    pub fn guidance(&self) -> &'static str {
        match self {
            TagStage::Dev => "No dev tags found. Run Stage 1 (Dev Release) first.",
            TagStage::Rc => "No rc tags found. Run Stage 2 (RC Release) first.",
        }
    }
}

impl FromStr for TagStage {
    type Err = ReleaseTrainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dev" => Ok(TagStage::Dev),
            "rc" => Ok(TagStage::Rc),
            other => Err(ReleaseTrainError::InvalidPattern(other.to_string())),
        }
    }
}

impl fmt::Display for TagStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagStage::Dev => write!(f, "dev"),
            TagStage::Rc => write!(f, "rc"),
        }
    }
}

/// Release-train phase that release notes are written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReleaseStage {
    Dev,
    Rc,
    Stable,
}

impl FromStr for ReleaseStage {
    type Err = ReleaseTrainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dev" => Ok(ReleaseStage::Dev),
            "rc" => Ok(ReleaseStage::Rc),
            "stable" => Ok(ReleaseStage::Stable),
            other => Err(ReleaseTrainError::InvalidStage(other.to_string())),
        }
    }
}

impl fmt::Display for ReleaseStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseStage::Dev => write!(f, "dev"),
            ReleaseStage::Rc => write!(f, "rc"),
            ReleaseStage::Stable => write!(f, "stable"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_stage_parse() {
        assert_eq!("dev".parse::<TagStage>().unwrap(), TagStage::Dev);
        assert_eq!("rc".parse::<TagStage>().unwrap(), TagStage::Rc);
    }

    #[test]
    fn test_tag_stage_rejects_other_values() {
        for raw in ["stable", "DEV", "", "beta"] {
            let err = raw.parse::<TagStage>().unwrap_err();
            assert!(err.is_invalid_request());
        }
    }

    #[test]
    fn test_guidance_differs_per_stage() {
        assert!(TagStage::Dev.guidance().contains("dev"));
        assert!(TagStage::Rc.guidance().contains("rc"));
        assert_ne!(TagStage::Dev.guidance(), TagStage::Rc.guidance());
    }

    #[test]
    fn test_stage_predicates() {
        let dev = VersionIdentifier::parse("v1.0.0.dev1").unwrap();
        let rc = VersionIdentifier::parse("v1.0.0rc1").unwrap();
        let beta = VersionIdentifier::parse("v1.0.0b1").unwrap();
        assert!(TagStage::Dev.matches(&dev));
        assert!(!TagStage::Rc.matches(&dev));
        assert!(TagStage::Rc.matches(&rc));
        assert!(!TagStage::Rc.matches(&beta));
        assert!(!TagStage::Dev.matches(&beta));
    }

    #[test]
    fn test_release_stage_parse() {
        assert_eq!("stable".parse::<ReleaseStage>().unwrap(), ReleaseStage::Stable);
        assert!(matches!(
            "prod".parse::<ReleaseStage>(),
            Err(ReleaseTrainError::InvalidStage(_))
        ));
    }
}
