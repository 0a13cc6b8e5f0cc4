//! Retrieval collaborators
//!
//! The core only consumes completed text; these helpers produce it. They
//! carry the crate's I/O: fetching robots.txt over HTTP with a
//! caller-supplied client, or reading it from a local file. Retry, timeout,
//! and caching policy stay with the caller.

mod html;

use std::path::Path;

use tracing::{debug, warn};

use crate::scope::BaseUrl;
use crate::{FetchError, FetchResult, RobotsTxt};

/// Fetches and parses the robots.txt governing `site_url`
///
/// The file always lives at the top level of the origin, so any path in
/// `site_url` is ignored: `https://example.com/pricing/roll-off` fetches
/// `https://example.com:443/robots.txt`. The client is passed in so the
/// caller controls user agent, timeouts, and proxies; tests point it at a
/// mock server.
///
/// Servers that wrap robots.txt in an HTML page are handled by extracting
/// the page body's text before parsing.
pub async fn from_url(client: &reqwest::Client, site_url: &str) -> FetchResult<RobotsTxt> {
    let base = BaseUrl::parse(site_url)?;
    let robots_url = format!("{}/robots.txt", base.as_str());

    let response = client
        .get(&robots_url)
        .send()
        .await
        .map_err(|source| FetchError::Http {
            url: robots_url.clone(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: robots_url,
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let body = response
        .text()
        .await
        .map_err(|source| FetchError::Http {
            url: robots_url.clone(),
            source,
        })?;

    let text = if html::looks_like_html(content_type.as_deref(), &body) {
        warn!(url = %robots_url, "robots.txt served as HTML, extracting body text");
        html::extract_body_text(&body).ok_or(FetchError::MissingBody {
            url: robots_url.clone(),
        })?
    } else {
        body
    };

    debug!(url = %robots_url, bytes = text.len(), "fetched robots.txt");
    Ok(RobotsTxt::new(site_url, &text)?)
}

/// Reads and parses a local robots.txt file, scoped to `base_url`
pub async fn from_file(base_url: &str, path: impl AsRef<Path>) -> FetchResult<RobotsTxt> {
    let bytes = tokio::fs::read(path.as_ref()).await?;
    debug!(path = %path.as_ref().display(), bytes = bytes.len(), "read robots.txt");
    Ok(RobotsTxt::from_bytes(base_url, &bytes)?)
}
