//! Joins posts with their author and comments into render-ready rows.
//!
//! Everything here is pure: rows borrow from the inputs and are recomputed on
//! every view refresh rather than cached.

use std::collections::HashMap;

use crate::constants::UNKNOWN_AUTHOR_LABEL;
use crate::expansion::ExpansionTracker;
use crate::models::{Comment, Post, User};
use crate::users::find_user;

/// Resolved author of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author<'a> {
    Known(&'a User),
    /// The post's `userId` has no matching user.
    Unknown,
}

impl Author<'_> {
    /// Heading shown above the post, e.g. `Maria Souza diz:`.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Known(user) => format!("{} diz:", user.name),
            Self::Unknown => UNKNOWN_AUTHOR_LABEL.to_string(),
        }
    }
}

/// A post combined with its author and comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedRow<'a> {
    pub post: &'a Post,
    pub author: Author<'a>,
    /// Every comment on the post, in fetch order.
    pub comments: Vec<&'a Comment>,
    /// The comments to display given the expansion state.
    pub visible_comments: Vec<&'a Comment>,
    /// More comments exist than the collapsed preview shows.
    pub has_more: bool,
    pub expanded: bool,
}

/// Build one row per post, in post order.
///
/// A post shows all of its comments when expanded or when it has at most
/// `preview_limit` of them; otherwise only the first `preview_limit`.
#[must_use]
pub fn join<'a>(
    posts: &'a [Post],
    users: &'a [User],
    comments: &'a [Comment],
    expansion: &ExpansionTracker,
    preview_limit: usize,
) -> Vec<EnrichedRow<'a>> {
    let mut by_post: HashMap<i64, Vec<&'a Comment>> = HashMap::new();
    for comment in comments {
        by_post.entry(comment.post_id).or_default().push(comment);
    }

    posts
        .iter()
        .map(|post| {
            let author = find_user(users, post.user_id).map_or(Author::Unknown, Author::Known);
            let comments = by_post.get(&post.id).cloned().unwrap_or_default();
            let is_expanded = expansion.is_expanded(post.id);
            let has_more = comments.len() > preview_limit;
            let visible_comments = if is_expanded || !has_more {
                comments.clone()
            } else {
                comments[..preview_limit].to_vec()
            };

            EnrichedRow {
                post,
                author,
                comments,
                visible_comments,
                has_more,
                expanded: is_expanded,
            }
        })
        .collect()
}

/// One page of a client-side paginated list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 0-indexed
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.current_page > 0
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current_page + 1 < self.total_pages
    }
}

/// Slice `items` into pages of `per_page` and return page `page`.
///
/// Out of range pages are clamped to the last page. There is always at least
/// one (possibly empty) page. A `per_page` of zero is treated as one.
#[must_use]
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page).max(1);
    let current_page = page.min(total_pages - 1);

    let items = items
        .into_iter()
        .skip(current_page * per_page)
        .take(per_page)
        .collect();

    Page {
        items,
        current_page,
        total_pages,
        total_items,
    }
}
