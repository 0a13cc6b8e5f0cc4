//! Body-text extraction for robots.txt served as HTML
//!
//! Some misconfigured servers wrap robots.txt in a web page (typically a
//! `<pre>` block inside `<body>`). The directives survive as the page's
//! text content, so extracting it lets the parser proceed as if the file
//! had been served plain.

use scraper::{Html, Selector};

/// Returns `true` when a response body looks like an HTML document rather
/// than plain robots.txt text
pub(crate) fn looks_like_html(content_type: Option<&str>, body: &str) -> bool {
    if content_type.is_some_and(|value| value.to_lowercase().contains("text/html")) {
        return true;
    }
    body.trim_start().starts_with('<')
}

/// Extracts the text content of the document's `<body>`, or `None` when
/// the document has no body element
pub(crate) fn extract_body_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("body").ok()?;
    let body = document.select(&selector).next()?;
    Some(body.text().collect())
}
