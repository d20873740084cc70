//! Per-post expansion of the comment list.

use std::collections::HashSet;

/// Set of post ids whose comment list is shown in full.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionTracker {
    expanded: HashSet<i64>,
}

impl ExpansionTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `post_id`. Returns whether the post is now expanded.
    ///
    /// Any id is accepted; ids with no matching post simply never show up in a join.
    pub fn toggle(&mut self, post_id: i64) -> bool {
        if self.expanded.remove(&post_id) {
            false
        } else {
            self.expanded.insert(post_id);
            true
        }
    }

    #[must_use]
    pub fn is_expanded(&self, post_id: i64) -> bool {
        self.expanded.contains(&post_id)
    }
}
