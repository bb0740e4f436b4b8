pub mod analyzer;
pub mod boundary;
pub mod changelog;
pub mod cli;
pub mod config;
pub mod conventional;
pub mod discovery;
pub mod domain;
pub mod error;
pub mod git;
pub mod manifest;
pub mod ui;

pub use error::{ReleaseTrainError, Result};
