//! Shared constants used across the application.

/// Default endpoint returning the JSON array of posts.
pub const DEFAULT_POSTS_URL: &str = "https://jsonplaceholder.typicode.com/posts";

/// Default endpoint returning the JSON array of comments.
pub const DEFAULT_COMMENTS_URL: &str = "https://jsonplaceholder.typicode.com/comments";

/// Artificial delay before the fetch is dispatched, in milliseconds.
///
/// Only there so the loading state is observable. It is not a backoff.
pub const DEFAULT_LOAD_DELAY_MS: u64 = 2000;

/// Number of comments shown for a collapsed post.
pub const DEFAULT_COMMENT_PREVIEW_LIMIT: usize = 3;

/// Default page size for client-side pagination of posts.
pub const DEFAULT_POSTS_PER_PAGE: usize = 10;

/// Display name given to comments written locally.
pub const LOCAL_AUTHOR_NAME: &str = "Você";

/// Email given to comments written locally.
pub const LOCAL_AUTHOR_EMAIL: &str = "voce@example.com";

/// Label shown in place of an author when a post references no known user.
pub const UNKNOWN_AUTHOR_LABEL: &str = "Usuário desconhecido diz:";

/// User agent sent with every retrieval.
pub const USER_AGENT: &str = concat!("blog-feed/", env!("CARGO_PKG_VERSION"));
