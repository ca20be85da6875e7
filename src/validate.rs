//! Required-field check for search results.
//!
//! NewsAPI keeps withdrawn stories in its index but blanks them out with the
//! literal text `"[Removed]"`. Those, and any record missing one of the
//! required text fields, are dropped before anything is printed or saved.

use crate::models::Article;
use tracing::debug;

/// Marker NewsAPI substitutes for withdrawn content.
pub const REMOVED_SENTINEL: &str = "[Removed]";

/// Returns `true` when `title`, `description`, `url` and `author` are all
/// present, non-empty and not the removal sentinel.
pub fn is_valid(article: &Article) -> bool {
    [
        &article.title,
        &article.description,
        &article.url,
        &article.author,
    ]
    .into_iter()
    .all(|field| match field.as_deref() {
        Some(value) => !value.is_empty() && value != REMOVED_SENTINEL,
        None => false,
    })
}

/// Keep valid articles in their original order.
///
/// # Returns
///
/// The surviving articles and how many were dropped.
pub fn filter_valid(articles: Vec<Article>) -> (Vec<Article>, usize) {
    let total = articles.len();
    let kept: Vec<Article> = articles
        .into_iter()
        .filter(|a| {
            let ok = is_valid(a);
            if !ok {
                debug!(url = ?a.url, title = ?a.title, "Dropping incomplete article");
            }
            ok
        })
        .collect();
    let dropped = total - kept.len();
    (kept, dropped)
}
