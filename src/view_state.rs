//! Session view state: `Loading`, then `Ready` or `Error`.

use crate::fetcher::{FetchError, FetchedData};
use crate::store::EntityStore;

/// What the presentation layer should show.
///
/// `Error` is terminal; there is no transition back to `Loading`.
#[derive(Debug, Clone, Default)]
pub enum ViewState {
    #[default]
    Loading,
    Ready(EntityStore),
    Error(String),
}

impl ViewState {
    /// Apply the outcome of a load.
    ///
    /// Only a `Loading` state moves; returns `false` and leaves the state
    /// untouched otherwise.
    pub fn complete(&mut self, result: Result<FetchedData, FetchError>) -> bool {
        if !self.is_loading() {
            return false;
        }
        *self = match result {
            Ok(data) => Self::Ready(EntityStore::new(data.posts, data.comments)),
            Err(e) => Self::Error(e.to_string()),
        };
        true
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }

    #[must_use]
    pub fn store(&self) -> Option<&EntityStore> {
        match self {
            Self::Ready(store) => Some(store),
            _ => None,
        }
    }

    pub fn store_mut(&mut self) -> Option<&mut EntityStore> {
        match self {
            Self::Ready(store) => Some(store),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;
    use crate::models::Post;

    fn status_error() -> FetchError {
        FetchError::HttpStatus {
            url: "http://localhost/posts".to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[test]
    fn test_starts_loading() {
        let state = ViewState::default();
        assert!(state.is_loading());
        assert!(state.store().is_none());
        assert!(state.error_message().is_none());
    }

    #[test]
    fn test_success_moves_to_ready_even_when_empty() {
        let mut state = ViewState::Loading;
        assert!(state.complete(Ok(FetchedData::default())));

        let store = state.store().unwrap();
        assert!(store.posts().is_empty());
        assert!(store.comments().is_empty());
    }

    #[test]
    fn test_failure_moves_to_error_with_message() {
        let mut state = ViewState::Loading;
        assert!(state.complete(Err(status_error())));

        assert!(state.store().is_none());
        let message = state.error_message().unwrap();
        assert!(message.contains("500"), "message was {message}");
    }

    #[test]
    fn test_error_is_terminal() {
        let mut state = ViewState::Loading;
        state.complete(Err(status_error()));

        let data = FetchedData {
            posts: vec![Post {
                id: 1,
                user_id: 1,
                title: "t".to_string(),
                body: "b".to_string(),
            }],
            comments: vec![],
        };
        assert!(!state.complete(Ok(data)));
        assert!(state.error_message().is_some());
    }

    #[test]
    fn test_ready_ignores_later_results() {
        let mut state = ViewState::Loading;
        state.complete(Ok(FetchedData::default()));
        assert!(!state.complete(Err(status_error())));
        assert!(state.is_ready());
    }
}
