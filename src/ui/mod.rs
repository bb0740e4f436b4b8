//! User interface module.
//!
//! Release-train runs unattended in CI, so there are no prompts: this module
//! only reports status and non-fatal warnings on stderr.

pub mod formatter;

pub use formatter::{
    describe_previous_tag, display_boundary_warning, display_error, display_status,
    display_success,
};

use crate::boundary::BoundaryWarning;

/// Print every collected warning in order
pub fn display_boundary_warnings(warnings: &[BoundaryWarning]) {
    for warning in warnings {
        display_boundary_warning(warning);
    }
}
