use std::fmt;

/// Non-fatal conditions noticed while discovering tags.
/// These are reported to the operator but never change the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryWarning {
    /// Tag exists but cannot be parsed as a release version
    UnparsableTag { tag: String },
    /// Discovered tag is behind the current history position
    StaleTag { tag: String, commits_behind: u64 },
    /// Staleness was requested against live history but could not be measured
    StalenessUnavailable { tag: String, reason: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::UnparsableTag { tag } => {
                write!(f, "Ignoring tag '{}': not a release version", tag)
            }
            BoundaryWarning::StaleTag {
                tag,
                commits_behind,
            } => {
                let noun = if *commits_behind == 1 { "commit" } else { "commits" };
                write!(
                    f,
                    "Tag '{}' is {} {} behind HEAD",
                    tag, commits_behind, noun
                )
            }
            BoundaryWarning::StalenessUnavailable { tag, reason } => {
                write!(f, "Cannot measure staleness of '{}': {}", tag, reason)
            }
        }
    }
}
