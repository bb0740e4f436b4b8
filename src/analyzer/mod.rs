//! Analysis engine for folding commits into release-note categories

pub mod categorizer;

pub use categorizer::{CategorizedCommits, CommitCategorizer};
