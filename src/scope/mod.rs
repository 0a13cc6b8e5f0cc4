//! Base-URL scoping
//!
//! A robots.txt applies only to the scheme, host, and port it was
//! retrieved from. [`BaseUrl`] canonicalizes that origin once at
//! construction and then checks every absolute candidate URL against it,
//! while resolving relative candidates to a path+query for matching.

use url::Url;

use crate::{ParseError, ParseResult, QueryError, QueryResult};

/// The canonical `scheme://host[:port]` a rule table is scoped to
///
/// An explicit port is kept; otherwise `http` defaults to 80 and `https`
/// to 443; other schemes carry no port. The canonical string is the
/// comparison key for scope checks.
#[derive(Debug, Clone)]
pub struct BaseUrl {
    url: Url,
    canonical: String,
}

impl BaseUrl {
    /// Parses and canonicalizes a base URL; scheme and host are required
    pub fn parse(raw: &str) -> ParseResult<Self> {
        let url = Url::parse(raw).map_err(|error| ParseError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: error.to_string(),
        })?;
        if url.host_str().is_none() {
            return Err(ParseError::InvalidBaseUrl {
                url: raw.to_string(),
                reason: "missing host".to_string(),
            });
        }

        let canonical = canonical_form(&url);
        Ok(Self { url, canonical })
    }

    /// The canonical `scheme://host[:port]` form
    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    /// Resolves a candidate URL to the path+query used for matching
    ///
    /// Absolute candidates must canonicalize to this exact scope; relative
    /// candidates resolve against the base. The result always starts with
    /// `/`, so matching has one less shape to account for.
    pub(crate) fn request_path(&self, candidate: &str) -> QueryResult<String> {
        match Url::parse(candidate) {
            Ok(absolute) => {
                let requested = canonical_form(&absolute);
                if requested != self.canonical {
                    return Err(QueryError::ScopeMismatch {
                        requested,
                        scope: self.canonical.clone(),
                    });
                }
                Ok(path_and_query(&absolute))
            }
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let resolved = self.url.join(candidate).map_err(|error| QueryError::Url {
                    url: candidate.to_string(),
                    reason: error.to_string(),
                })?;
                Ok(path_and_query(&resolved))
            }
            Err(error) => Err(QueryError::Url {
                url: candidate.to_string(),
                reason: error.to_string(),
            }),
        }
    }
}

fn canonical_form(url: &Url) -> String {
    let host = url.host_str().unwrap_or("");
    match url.port_or_known_default() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    }
}

fn path_and_query(url: &Url) -> String {
    let mut path = url.path().to_string();
    if !path.starts_with('/') {
        path.insert(0, '/');
    }
    if let Some(query) = url.query() {
        path.push('?');
        path.push_str(query);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_https_port() {
        let base = BaseUrl::parse("https://example.com").unwrap();
        assert_eq!(base.as_str(), "https://example.com:443");
    }

    #[test]
    fn test_default_http_port() {
        let base = BaseUrl::parse("http://example.com").unwrap();
        assert_eq!(base.as_str(), "http://example.com:80");
    }

    #[test]
    fn test_explicit_port_kept() {
        let base = BaseUrl::parse("https://example.com:8443").unwrap();
        assert_eq!(base.as_str(), "https://example.com:8443");
    }

    #[test]
    fn test_host_is_lowercased() {
        let base = BaseUrl::parse("HTTPS://EXAMPLE.COM").unwrap();
        assert_eq!(base.as_str(), "https://example.com:443");
    }

    #[test]
    fn test_path_on_base_is_ignored() {
        let base = BaseUrl::parse("https://example.com/pricing/roll-off").unwrap();
        assert_eq!(base.as_str(), "https://example.com:443");
    }

    #[test]
    fn test_missing_scheme_fails() {
        let err = BaseUrl::parse("example.com").unwrap_err();
        assert!(matches!(err, ParseError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn test_missing_host_fails() {
        let err = BaseUrl::parse("mailto:someone@example.com").unwrap_err();
        assert!(matches!(err, ParseError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn test_relative_candidate_resolves_to_path() {
        let base = BaseUrl::parse("https://example.com").unwrap();
        assert_eq!(base.request_path("/products/").unwrap(), "/products/");
        assert_eq!(base.request_path("").unwrap(), "/");
        assert_eq!(
            base.request_path("/pricing?s=lightbox").unwrap(),
            "/pricing?s=lightbox"
        );
    }

    #[test]
    fn test_relative_candidate_without_leading_slash() {
        let base = BaseUrl::parse("https://example.com").unwrap();
        assert_eq!(base.request_path("products").unwrap(), "/products");
    }

    #[test]
    fn test_absolute_candidate_in_scope() {
        let base = BaseUrl::parse("https://example.com").unwrap();
        assert_eq!(
            base.request_path("https://example.com/products?page=2").unwrap(),
            "/products?page=2"
        );
    }

    #[test]
    fn test_absolute_candidate_root_path() {
        let base = BaseUrl::parse("https://example.com").unwrap();
        assert_eq!(base.request_path("https://example.com").unwrap(), "/");
    }

    #[test]
    fn test_scheme_mismatch() {
        let base = BaseUrl::parse("https://example.com").unwrap();
        let err = base.request_path("http://example.com/products").unwrap_err();
        assert!(matches!(err, QueryError::ScopeMismatch { .. }));
    }

    #[test]
    fn test_host_mismatch() {
        let base = BaseUrl::parse("https://example.com").unwrap();
        let err = base.request_path("https://other.com/products").unwrap_err();
        assert!(matches!(err, QueryError::ScopeMismatch { .. }));
    }

    #[test]
    fn test_port_mismatch() {
        let base = BaseUrl::parse("https://example.com").unwrap();
        let err = base
            .request_path("https://example.com:8443/products")
            .unwrap_err();
        assert!(matches!(err, QueryError::ScopeMismatch { .. }));
    }

    #[test]
    fn test_explicit_default_port_matches() {
        let base = BaseUrl::parse("https://example.com").unwrap();
        assert_eq!(
            base.request_path("https://example.com:443/products").unwrap(),
            "/products"
        );
    }
}
