//! Nesting legend bookkeeping for grouped predicates.

use crate::ast::Connective;

/// Tracks the active nesting path while the compiler walks a predicate
/// tree, and builds the ordered legend the receiving service uses to
/// reconstruct grouping from flat key/value pairs.
///
/// Legend entries read `{parentIndex}:{connective}{suffix}`; entries for
/// groups opened at the root scope carry no parent index. Suffixes mark
/// group kind: empty for plain groups, `:e` for EXISTS, `:ne` for NOT
/// EXISTS.
#[derive(Debug, Default)]
pub(crate) struct NestingTracker {
    legend: Vec<String>,
    /// Index of the active group in `legend`, or -1 at the root scope.
    cursor: i32,
}

impl NestingTracker {
    pub fn new() -> Self {
        Self {
            legend: Vec::new(),
            cursor: -1,
        }
    }

    /// Record entry into a group and return the cursor to restore on exit.
    pub fn enter(&mut self, connective: Connective, suffix: &str) -> i32 {
        let entry = if self.cursor >= 0 {
            format!("{}:{}{}", self.cursor, connective, suffix)
        } else {
            format!("{}{}", connective, suffix)
        };

        self.legend.push(entry);
        let previous = self.cursor;
        self.cursor = self.legend.len() as i32 - 1;

        previous
    }

    /// Restore the cursor saved by [`enter`](Self::enter).
    ///
    /// Exiting a group that was opened at the root scope leaves the cursor
    /// at 0 instead of -1, so a sibling root-scope group that follows is
    /// recorded as a child of legend index 0. Receiving services decode
    /// legends produced this way today; do not change without confirming
    /// their expectation.
    pub fn exit(&mut self, previous: i32, outermost: bool) {
        self.cursor = if outermost { 0 } else { previous };
    }

    /// Index of the active group, or `None` at the root scope.
    pub fn cursor(&self) -> Option<usize> {
        usize::try_from(self.cursor).ok()
    }

    pub fn legend(&self) -> &[String] {
        &self.legend
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_scope_entry_has_no_parent_index() {
        let mut tracker = NestingTracker::new();
        let prev = tracker.enter(Connective::Or, "");

        assert_eq!(prev, -1);
        assert_eq!(tracker.legend(), &["or"]);
        assert_eq!(tracker.cursor(), Some(0));
    }

    #[test]
    fn test_child_entry_records_parent_and_suffix() {
        let mut tracker = NestingTracker::new();
        let outer = tracker.enter(Connective::And, "");
        let inner = tracker.enter(Connective::Or, ":e");

        assert_eq!(tracker.legend(), &["and", "0:or:e"]);
        assert_eq!(tracker.cursor(), Some(1));

        tracker.exit(inner, false);
        assert_eq!(tracker.cursor(), Some(0));

        tracker.exit(outer, true);
        // Outermost exit clamps to 0 rather than restoring -1.
        assert_eq!(tracker.cursor(), Some(0));
    }

    #[test]
    fn test_sibling_root_groups_share_index_zero() {
        let mut tracker = NestingTracker::new();
        let first = tracker.enter(Connective::And, "");
        tracker.exit(first, true);

        // The quirk: the second root-scope group is recorded as a child of
        // legend index 0 because the cursor never returned to -1.
        tracker.enter(Connective::Or, "");
        assert_eq!(tracker.legend(), &["and", "0:or"]);
    }
}
