//! Robots-Gate: a robots exclusion protocol engine for polite crawlers
//!
//! This crate parses robots.txt content into an immutable rule table and
//! answers the one question a crawler actually has: may this user agent
//! fetch this URL? It implements the matching rules documented at
//! <https://developers.google.com/search/reference/robots_txt>, including
//! wildcard (`*`) and end-anchor (`$`) pattern semantics, longest-prefix
//! user-agent resolution, and the allow-wins-tie precedence rule.
//!
//! Parsing is synchronous; the resulting [`RobotsTxt`] is read-only and can
//! be queried from any number of threads without locking. Fetching the file
//! over HTTP or from disk lives in the [`fetch`] module and hands a
//! completed text to the core.

pub mod fetch;
pub mod parser;
pub mod rules;
pub mod scope;

use thiserror::Error;

/// Fatal errors raised while constructing a [`RobotsTxt`]
///
/// Any of these aborts the parse; no partial rule table is ever returned.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid encoding detected on line {line}, all characters must be UTF-8 encoded")]
    InvalidEncoding { line: usize },

    #[error(
        "invalid crawl-delay on line {line}, could not convert {value:?} to a non-negative integer"
    )]
    InvalidCrawlDelay { value: String, line: usize },

    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Non-fatal errors raised while answering a query
///
/// Every query error fails open: the crawl defaults to permitted, and the
/// error is surfaced so a higher policy layer can log or reject.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("failed to parse URL {url:?}: {reason}")]
    Url { url: String, reason: String },

    #[error("absolute URL is scoped to {requested}, but this robots.txt applies to {scope}")]
    ScopeMismatch { requested: String, scope: String },

    #[error("unable to match against pattern {pattern:?}")]
    Pattern { pattern: String },
}

/// Errors raised by the retrieval collaborators in [`fetch`]
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("unexpected status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("robots.txt parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("HTML response for {url} has no <body> to extract robots.txt from")]
    MissingBody { url: String },
}

/// Result type alias for construction-time operations
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Result type alias for query-time operations
pub type QueryResult<T> = std::result::Result<T, QueryError>;

/// Result type alias for retrieval operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// Re-export commonly used types
pub use parser::{EncodingValidator, Utf8Validator};
pub use rules::{RobotsTxt, RuleSet};
pub use scope::BaseUrl;
