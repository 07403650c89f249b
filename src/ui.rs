//! Terminal output.
//!
//! The computed tag is the only thing written to stdout so the binary can be
//! used in scripts; everything here goes to stderr.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::domain::RuleSet;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Display the tag change: "From: base -> To: new".
pub fn display_proposed_tag(base: &str, new_tag: &str) {
    eprintln!("\n{}", style("Proposed Tag:").bold());
    eprintln!("  From: {}", style(base).red());
    eprintln!("  To:   {}", style(new_tag).green());
}

/// Display the branch rules in evaluation order.
pub fn display_rules(rules: &RuleSet) {
    eprintln!("{}", style("Branch rules (first match wins):").bold());
    for rule in rules.rules() {
        let category = rule.category().to_string();
        eprintln!("  {:<6} {}", category, style(rule.pattern()).cyan());
    }
}

/// Show the git command needed to push a locally created tag.
pub fn display_manual_push_instruction(tag: &str, remote: &str) {
    eprintln!(
        "\n{} To push this tag later, run:\n  {}",
        style("→").yellow(),
        style(format!("git push {} {}", remote, tag)).cyan()
    );
}
