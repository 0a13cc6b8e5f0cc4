//! The rule table and its query surface
//!
//! [`RobotsTxt`] is the parse result: an immutable mapping from user-agent
//! name to [`RuleSet`], the sitemap list, and the base URL the table is
//! scoped to. It is created once, read many times, and safe to share
//! across threads without locking.

mod matcher;
mod resolver;

use std::collections::BTreeMap;
use std::time::Duration;

use crate::parser::{self, EncodingValidator, Utf8Validator};
use crate::scope::BaseUrl;
use crate::{ParseResult, QueryResult};

/// The allow/disallow patterns and crawl delay for one user agent
///
/// Pattern lists preserve file order exactly as declared, because matching
/// stops at the first hit within a list.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    disallowed: Vec<String>,
    allowed: Vec<String>,
    crawl_delay: Option<Duration>,
}

impl RuleSet {
    /// Disallowed path patterns, in file order
    pub fn disallowed(&self) -> &[String] {
        &self.disallowed
    }

    /// Allowed path patterns, in file order
    pub fn allowed(&self) -> &[String] {
        &self.allowed
    }

    /// The crawl delay for this agent, zero when unset
    pub fn crawl_delay(&self) -> Duration {
        self.crawl_delay.unwrap_or(Duration::ZERO)
    }

    pub(crate) fn push_allow(&mut self, pattern: String) {
        self.allowed.push(pattern);
    }

    pub(crate) fn push_disallow(&mut self, pattern: String) {
        self.disallowed.push(pattern);
    }

    pub(crate) fn set_crawl_delay(&mut self, delay: Duration) {
        self.crawl_delay = Some(delay);
    }
}

/// A parsed robots.txt, scoped to one scheme/host/port
///
/// The primary surface is the decision itself ([`can_crawl`]) plus the
/// crawl delay and sitemap hints; [`rule_set`](Self::rule_set) offers a
/// read-only view of the resolved group for callers that want to inspect
/// or report the raw patterns.
///
/// [`can_crawl`]: RobotsTxt::can_crawl
///
/// # Examples
///
/// ```
/// use robots_gate::RobotsTxt;
///
/// let robots = RobotsTxt::new(
///     "https://example.com",
///     "User-agent: *\nDisallow: /private/\n",
/// )
/// .unwrap();
///
/// assert!(robots.can_crawl("somebot", "/products/").unwrap());
/// assert!(!robots.can_crawl("somebot", "/private/ledger").unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct RobotsTxt {
    rules: BTreeMap<String, RuleSet>,
    sitemaps: Vec<String>,
    base_url: BaseUrl,
}

impl RobotsTxt {
    /// Parses robots.txt text scoped to `base_url`
    ///
    /// `base_url` must carry a scheme and host; construction fails
    /// otherwise. Any encoding or crawl-delay error aborts the parse.
    pub fn new(base_url: &str, content: &str) -> ParseResult<Self> {
        Self::from_bytes(base_url, content.as_bytes())
    }

    /// Parses raw bytes, validating each line as UTF-8
    pub fn from_bytes(base_url: &str, content: &[u8]) -> ParseResult<Self> {
        Self::from_bytes_with_validator(base_url, content, &Utf8Validator)
    }

    /// Parses raw bytes with a caller-supplied encoding check
    pub fn from_bytes_with_validator(
        base_url: &str,
        content: &[u8],
        validator: &dyn EncodingValidator,
    ) -> ParseResult<Self> {
        let base_url = BaseUrl::parse(base_url)?;
        let (rules, sitemaps) = parser::parse_table(content, validator)?;

        Ok(Self {
            rules,
            sitemaps,
            base_url,
        })
    }

    /// Decides whether `agent` may fetch `url`
    ///
    /// `url` may be a bare path (`/products/`) or an absolute URL; an
    /// absolute URL must match this table's scheme, host, and port, since
    /// robots.txt directives never apply outside the origin they were
    /// retrieved from.
    ///
    /// Every `Err` fails open: the crawl defaults to permitted and the
    /// error says why the check could not be applied. Use
    /// [`is_allowed`](Self::is_allowed) when only the decision matters.
    pub fn can_crawl(&self, agent: &str, url: &str) -> QueryResult<bool> {
        let Some(rule_set) = resolver::resolve(agent, &self.rules) else {
            return Ok(true);
        };

        // Everything is allowed if nothing is disallowed.
        if rule_set.disallowed().is_empty() {
            return Ok(true);
        }

        let path = self.base_url.request_path(url)?;

        // The most specific rule, by raw pattern length, wins across the
        // two lists; a tie goes to Allow.
        let disallowed_length = matcher::match_length(&path, rule_set.disallowed())?;
        let allowed_length = matcher::match_length(&path, rule_set.allowed())?;

        Ok(disallowed_length == 0 || allowed_length >= disallowed_length)
    }

    /// The fail-open rendering of [`can_crawl`](Self::can_crawl): a query
    /// error logs a warning and permits the crawl
    pub fn is_allowed(&self, agent: &str, url: &str) -> bool {
        match self.can_crawl(agent, url) {
            Ok(allowed) => allowed,
            Err(error) => {
                tracing::warn!(agent, url, %error, "robots.txt check failed open");
                true
            }
        }
    }

    /// How long `agent` should wait between requests, zero when unset
    pub fn crawl_delay(&self, agent: &str) -> Duration {
        resolver::resolve(agent, &self.rules)
            .map(RuleSet::crawl_delay)
            .unwrap_or(Duration::ZERO)
    }

    /// Sitemap URLs in declaration order; duplicates are preserved
    pub fn sitemaps(&self) -> &[String] {
        &self.sitemaps
    }

    /// The canonical `scheme://host[:port]` this table is scoped to
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// The rule set governing `agent`, if any group matches
    pub fn rule_set(&self, agent: &str) -> Option<&RuleSet> {
        resolver::resolve(agent, &self.rules)
    }
}
