//! Blog feed controller library.
//!
//! Fetches posts and comments concurrently, joins them with a static user
//! directory, and exposes render-ready rows together with local interaction
//! state (comment expansion and locally written comments).

pub mod comments;
pub mod config;
pub mod constants;
pub mod controller;
pub mod expansion;
pub mod fetcher;
pub mod joiner;
pub mod models;
pub mod render;
pub mod store;
pub mod users;
pub mod view_state;
