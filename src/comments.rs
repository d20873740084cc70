//! Locally authored comments.
//!
//! Comments written by the user are validated, given a fresh id and appended
//! to the in-memory collection. They are never sent anywhere.

use tracing::debug;

use crate::constants::{LOCAL_AUTHOR_EMAIL, LOCAL_AUTHOR_NAME};
use crate::models::Comment;

/// Builds local comments with ids that never collide.
///
/// Ids come from a counter seeded one past the largest fetched id, so two
/// submissions in quick succession still get distinct ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentMutator {
    next_id: i64,
}

impl CommentMutator {
    /// Create a mutator whose ids start after every id in `existing`.
    #[must_use]
    pub fn seeded_from(existing: &[Comment]) -> Self {
        let max_id = existing.iter().map(|c| c.id).max().unwrap_or(0);
        Self {
            next_id: max_id.saturating_add(1),
        }
    }

    /// Append a comment for `post_id` with the given raw `text`.
    ///
    /// The text is trimmed; blank input is silently ignored and `None` is
    /// returned without touching `comments`.
    pub fn add(&mut self, comments: &mut Vec<Comment>, post_id: i64, text: &str) -> Option<Comment> {
        let body = text.trim();
        if body.is_empty() {
            debug!(post_id, "Ignoring blank comment");
            return None;
        }

        let comment = Comment {
            id: self.next_id,
            post_id,
            name: LOCAL_AUTHOR_NAME.to_string(),
            email: LOCAL_AUTHOR_EMAIL.to_string(),
            body: body.to_string(),
        };
        self.next_id = self.next_id.saturating_add(1);

        debug!(post_id, comment_id = comment.id, "Added local comment");
        comments.push(comment.clone());
        Some(comment)
    }
}
