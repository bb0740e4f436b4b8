//! Formatting functions for operator-facing output.
//!
//! Everything here goes to stderr: stdout is reserved for the JSON report and
//! the rendered release notes that CI steps capture.

use console::style;

use crate::boundary::BoundaryWarning;

/// Print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Print a success message with a green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}

/// Print a status message with a yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// Print a boundary warning with a yellow warning icon.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// One-line summary of a previous tag lookup, for status output
pub fn describe_previous_tag(previous_tag: Option<&str>) -> String {
    match previous_tag {
        Some(tag) => format!("Changes since {}", style(tag).cyan()),
        None => "No previous tag, including full history".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_functions_do_not_panic() {
        // Output is printed to stderr
        display_error("test error");
        display_success("test success");
        display_status("test status");
        display_boundary_warning(&BoundaryWarning::UnparsableTag {
            tag: "garbage".to_string(),
        });
    }

    #[test]
    fn test_describe_previous_tag() {
        console::set_colors_enabled(false);
        assert_eq!(
            describe_previous_tag(Some("v1.1.22rc1")),
            "Changes since v1.1.22rc1"
        );
        assert!(describe_previous_tag(None).contains("full history"));
    }
}
