//! HTML rendering of the feed view using maud templates.
//!
//! This is the reference presentation layer: it only reads the view state
//! and rows, and emits plain forms whose submissions map back onto
//! `toggle(post_id)` and `add_comment(post_id, text)`.

use maud::{html, Markup, Render, DOCTYPE};

use crate::controller::FeedController;
use crate::fetcher::FeedSource;
use crate::joiner::{EnrichedRow, Page};
use crate::view_state::ViewState;

const PAGE_TITLE: &str = "Blog Posts - JSONPlaceholder";

/// Render a complete HTML document for the controller's current state.
///
/// `page` is 0-indexed and clamped to the available pages.
#[must_use]
pub fn render_document<S: FeedSource>(
    controller: &FeedController<S>,
    page: usize,
    per_page: usize,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="pt-BR" {
            head {
                meta charset="utf-8";
                title { (PAGE_TITLE) }
            }
            body {
                (render_state(controller, page, per_page))
            }
        }
    }
}

/// Render the body content for the controller's current state.
#[must_use]
pub fn render_state<S: FeedSource>(
    controller: &FeedController<S>,
    page: usize,
    per_page: usize,
) -> Markup {
    match controller.state() {
        ViewState::Loading => html! {
            div class="loading-screen" {
                p class="loading-text" { "Carregando posts..." }
            }
        },
        ViewState::Error(message) => html! {
            div class="error-screen" {
                p class="error-text" { "Erro ao buscar dados: " (message) }
            }
        },
        ViewState::Ready(_) => render_posts(&controller.page(page, per_page)),
    }
}

/// Render one page of enriched rows.
#[must_use]
pub fn render_posts(page: &Page<EnrichedRow<'_>>) -> Markup {
    html! {
        div class="app" {
            div class="container" {
                h1 class="main-title" { (PAGE_TITLE) }
                div class="posts-grid" {
                    @for row in &page.items {
                        (PostCard::new(row))
                    }
                }
                (PageNav::new(page))
            }
        }
    }
}

/// A single post with its comments, toggle control and comment form.
struct PostCard<'a, 'b> {
    row: &'a EnrichedRow<'b>,
}

impl<'a, 'b> PostCard<'a, 'b> {
    fn new(row: &'a EnrichedRow<'b>) -> Self {
        Self { row }
    }

    fn toggle_label(&self) -> String {
        if self.row.expanded {
            "Ver menos".to_string()
        } else {
            format!("Ver todos os {} comentários", self.row.comments.len())
        }
    }
}

impl Render for PostCard<'_, '_> {
    fn render(&self) -> Markup {
        let post = self.row.post;
        html! {
            div class="post-card" id={ "post-" (post.id) } {
                h2 class="post-author" { (self.row.author.label()) }
                h3 class="post-title" { (post.title) }
                p class="post-body" { (post.body) }

                div class="comments-section" {
                    h4 { "Comentários:" }
                    @if self.row.visible_comments.is_empty() {
                        p { "Sem comentários" }
                    } @else {
                        ul {
                            @for comment in &self.row.visible_comments {
                                li id={ "comment-" (comment.id) } {
                                    p { strong { (comment.name) } " (" (comment.email) ")" }
                                    p { (comment.body) }
                                }
                            }
                        }
                    }
                    @if self.row.has_more {
                        form class="toggle-comments" method="post" action="/toggle" {
                            input type="hidden" name="post_id" value=(post.id);
                            button type="submit" { (self.toggle_label()) }
                        }
                    }
                    form class="comment-form" method="post" action="/comments" {
                        input type="hidden" name="post_id" value=(post.id);
                        textarea name="text" placeholder="Escreva um comentário" {}
                        button type="submit" { "Comentar" }
                    }
                }
            }
        }
    }
}

/// Previous/next navigation between pages of posts.
struct PageNav {
    current_page: usize,
    total_pages: usize,
    has_previous: bool,
    has_next: bool,
}

impl PageNav {
    fn new<T>(page: &Page<T>) -> Self {
        Self {
            current_page: page.current_page,
            total_pages: page.total_pages,
            has_previous: page.has_previous(),
            has_next: page.has_next(),
        }
    }
}

impl Render for PageNav {
    fn render(&self) -> Markup {
        if self.total_pages <= 1 {
            return html! {};
        }

        html! {
            nav class="pagination" {
                @if self.has_previous {
                    a href={ "?page=" (self.current_page - 1) } { "\u{00ab} Anterior" }
                } @else {
                    span class="disabled" { "\u{00ab} Anterior" }
                }
                span class="current" { "Página " (self.current_page + 1) " de " (self.total_pages) }
                @if self.has_next {
                    a href={ "?page=" (self.current_page + 1) } { "Próxima \u{00bb}" }
                } @else {
                    span class="disabled" { "Próxima \u{00bb}" }
                }
            }
        }
    }
}
