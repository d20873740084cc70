//! Session controller tying the fetch, the view state and user events together.
//!
//! The controller is the only owner of the session state. All mutations go
//! through `&mut self`, so they are serialized without any locking; the
//! presentation layer only reads rows and raises events.

use tracing::{debug, info};

use crate::constants::DEFAULT_COMMENT_PREVIEW_LIMIT;
use crate::fetcher::{FeedSource, FetchError, FetchedData};
use crate::joiner::{paginate, EnrichedRow, Page};
use crate::models::Comment;
use crate::view_state::ViewState;

/// Drives one viewing session over a [`FeedSource`].
#[derive(Debug)]
pub struct FeedController<S> {
    source: S,
    state: ViewState,
    preview_limit: usize,
    torn_down: bool,
}

impl<S: FeedSource> FeedController<S> {
    #[must_use]
    pub fn new(source: S) -> Self {
        Self::with_preview_limit(source, DEFAULT_COMMENT_PREVIEW_LIMIT)
    }

    #[must_use]
    pub fn with_preview_limit(source: S, preview_limit: usize) -> Self {
        Self {
            source,
            state: ViewState::Loading,
            preview_limit,
            torn_down: false,
        }
    }

    /// Run the load cycle and return the resulting state.
    ///
    /// Only the first call fetches; once the state has left `Loading` the
    /// current state is returned as is. Dropping the returned future
    /// abandons the request and leaves the state at `Loading`; a host that
    /// drives the fetch elsewhere hands its outcome to [`apply`](Self::apply).
    pub async fn load(&mut self) -> &ViewState {
        if self.state.is_loading() && !self.torn_down {
            let result = self.source.fetch_all().await;
            self.apply(result);
        }
        &self.state
    }

    /// Feed a completed load into the state machine.
    ///
    /// Results arriving after [`teardown`](Self::teardown), or after the state
    /// has already resolved, are discarded. Returns whether the result was applied.
    pub fn apply(&mut self, result: Result<FetchedData, FetchError>) -> bool {
        if self.torn_down {
            debug!("Discarding load result after teardown");
            return false;
        }
        let applied = self.state.complete(result);
        if applied {
            match &self.state {
                ViewState::Ready(store) => info!(
                    posts = store.posts().len(),
                    comments = store.comments().len(),
                    "Feed ready"
                ),
                ViewState::Error(message) => info!(error = %message, "Feed failed to load"),
                ViewState::Loading => {}
            }
        } else {
            debug!("Discarding load result for a resolved session");
        }
        applied
    }

    /// Stop accepting results. Anything passed to `apply` afterwards is ignored.
    pub fn teardown(&mut self) {
        self.torn_down = true;
    }

    #[must_use]
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Current enriched rows; empty unless the session is ready.
    #[must_use]
    pub fn rows(&self) -> Vec<EnrichedRow<'_>> {
        self.state
            .store()
            .map(|store| store.rows(self.preview_limit))
            .unwrap_or_default()
    }

    /// One page of the current rows.
    #[must_use]
    pub fn page(&self, page: usize, per_page: usize) -> Page<EnrichedRow<'_>> {
        paginate(self.rows(), page, per_page)
    }

    /// Toggle expansion of a post's comments. No-op unless ready.
    pub fn toggle(&mut self, post_id: i64) -> bool {
        match self.state.store_mut() {
            Some(store) => {
                let expanded = store.toggle(post_id);
                debug!(post_id, expanded, "Toggled comments");
                expanded
            }
            None => false,
        }
    }

    /// Add a local comment from raw input text. No-op unless ready or when
    /// the text is blank.
    pub fn add_comment(&mut self, post_id: i64, text: &str) -> Option<Comment> {
        self.state
            .store_mut()
            .and_then(|store| store.add_comment(post_id, text))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use reqwest::StatusCode;

    use super::*;
    use crate::models::Post;

    struct StaticSource(Result<(), StatusCode>);

    #[async_trait]
    impl FeedSource for StaticSource {
        async fn fetch_all(&self) -> Result<FetchedData, FetchError> {
            match self.0 {
                Ok(()) => Ok(FetchedData {
                    posts: vec![Post {
                        id: 1,
                        user_id: 1,
                        title: "t".to_string(),
                        body: "b".to_string(),
                    }],
                    comments: vec![],
                }),
                Err(status) => Err(FetchError::HttpStatus {
                    url: "http://test/posts".to_string(),
                    status,
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_load_reaches_ready() {
        let mut controller = FeedController::new(StaticSource(Ok(())));
        assert!(controller.state().is_loading());
        assert!(controller.rows().is_empty());

        assert!(controller.load().await.is_ready());
        assert_eq!(controller.rows().len(), 1);
    }

    #[tokio::test]
    async fn test_events_ignored_outside_ready() {
        let mut controller = FeedController::new(StaticSource(Err(StatusCode::BAD_GATEWAY)));
        assert!(controller.add_comment(1, "hello").is_none());
        assert!(!controller.toggle(1));

        controller.load().await;
        assert!(controller.state().error_message().is_some());
        assert!(controller.add_comment(1, "hello").is_none());
        assert!(controller.rows().is_empty());
    }

    #[tokio::test]
    async fn test_teardown_discards_result() {
        let mut controller = FeedController::new(StaticSource(Ok(())));
        controller.teardown();

        assert!(controller.load().await.is_loading());
        assert!(!controller.apply(Ok(FetchedData::default())));
        assert!(controller.state().is_loading());
    }

    struct PendingSource;

    #[async_trait]
    impl FeedSource for PendingSource {
        async fn fetch_all(&self) -> Result<FetchedData, FetchError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_late_result_after_teardown_is_discarded() {
        let mut controller = FeedController::new(PendingSource);

        let abandoned = tokio::time::timeout(Duration::from_millis(20), controller.load()).await;
        assert!(abandoned.is_err());
        assert!(controller.state().is_loading());

        controller.teardown();

        // The abandoned request completes after the session went away
        let late = StaticSource(Ok(())).fetch_all().await;
        assert!(!controller.apply(late));
        assert!(controller.state().is_loading());
        assert!(controller.rows().is_empty());
    }

    #[tokio::test]
    async fn test_result_applied_while_live() {
        let mut controller = FeedController::new(PendingSource);
        let result = StaticSource(Ok(())).fetch_all().await;

        assert!(controller.apply(result));
        assert!(controller.state().is_ready());
        assert!(!controller.apply(Ok(FetchedData::default())));
        assert_eq!(controller.rows().len(), 1);
    }

    #[tokio::test]
    async fn test_second_load_does_not_refetch() {
        let mut controller = FeedController::new(StaticSource(Ok(())));
        controller.load().await;
        controller.add_comment(1, "kept");
        controller.load().await;
        assert_eq!(controller.state().store().unwrap().comments().len(), 1);
    }
}
