// Line-oriented unified diff over serialized subtrees.

use similar::TextDiff;

/// Unified diff from `running` (before) to `candidate` (after).
///
/// Standard three lines of context, no filename headers. Equal inputs
/// produce the empty string.
pub fn unified_diff(running: &str, candidate: &str) -> String {
    TextDiff::from_lines(running, candidate)
        .unified_diff()
        .context_radius(3)
        .to_string()
}
