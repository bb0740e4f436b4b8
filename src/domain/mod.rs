//! Domain logic - pure release-train rules independent of git operations

pub mod commit;
pub mod prerelease;
pub mod stage;
pub mod tag;
pub mod version;

pub use commit::{CommitClassification, CommitRecord, ParsedCommit};
pub use prerelease::{PreRelease, PreReleaseLabel};
pub use stage::{ReleaseStage, TagStage};
pub use tag::{TagCandidate, TagPattern};
pub use version::VersionIdentifier;
