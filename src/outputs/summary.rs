//! Plain-text listing of fetched articles for the terminal.

use crate::models::Article;

const RULE_WIDTH: usize = 60;

/// Render a numbered summary of `articles`.
///
/// ```text
/// ============================================================
/// FOUND 1 ARTICLES
/// ============================================================
///
/// 1. Markets rally - Reuters
///    Author:       Jane Doe
///    Published At: 2025-01-15T10:00:00Z
///    Description:  Stocks rose on Tuesday.
///    URL:          https://example.com/a
/// ```
pub fn render_summary(articles: &[Article]) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = format!("{rule}\nFOUND {} ARTICLES\n{rule}\n", articles.len());

    for (i, article) in articles.iter().enumerate() {
        out.push_str(&format!(
            "\n{}. {} - {}\n",
            i + 1,
            or_unknown(article.title.as_deref()),
            or_unknown(article.source_name())
        ));
        out.push_str(&format!(
            "   Author:       {}\n",
            or_unknown(article.author.as_deref())
        ));
        out.push_str(&format!(
            "   Published At: {}\n",
            or_unknown(article.published_at.as_deref())
        ));
        out.push_str(&format!(
            "   Description:  {}\n",
            or_unknown(article.description.as_deref())
        ));
        out.push_str(&format!(
            "   URL:          {}\n",
            or_unknown(article.url.as_deref())
        ));
    }
    out
}

fn or_unknown(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("unknown")
}
