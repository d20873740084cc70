//! In-memory owner of every collection the view is built from.

use crate::comments::CommentMutator;
use crate::expansion::ExpansionTracker;
use crate::joiner::{join, EnrichedRow};
use crate::models::{Comment, Post, User};
use crate::users::USERS;

/// Users, fetched posts and comments, plus interaction state.
///
/// Posts are fixed after load. Comments only grow.
#[derive(Debug, Clone)]
pub struct EntityStore {
    users: &'static [User],
    posts: Vec<Post>,
    comments: Vec<Comment>,
    expansion: ExpansionTracker,
    mutator: CommentMutator,
}

impl EntityStore {
    /// Build a store over the static user directory.
    #[must_use]
    pub fn new(posts: Vec<Post>, comments: Vec<Comment>) -> Self {
        let mutator = CommentMutator::seeded_from(&comments);
        Self {
            users: &USERS,
            posts,
            comments,
            expansion: ExpansionTracker::new(),
            mutator,
        }
    }

    #[must_use]
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Toggle expansion of a post's comment list.
    pub fn toggle(&mut self, post_id: i64) -> bool {
        self.expansion.toggle(post_id)
    }

    /// Append a locally written comment. Blank text is ignored.
    pub fn add_comment(&mut self, post_id: i64, text: &str) -> Option<Comment> {
        self.mutator.add(&mut self.comments, post_id, text)
    }

    /// Recompute the enriched rows from the current state.
    #[must_use]
    pub fn rows(&self, preview_limit: usize) -> Vec<EnrichedRow<'_>> {
        join(
            &self.posts,
            self.users,
            &self.comments,
            &self.expansion,
            preview_limit,
        )
    }
}
