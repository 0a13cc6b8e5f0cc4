//! Directive line tokenizer
//!
//! Turns one raw line of robots.txt into a `(key, value)` directive, or
//! nothing at all: comments, blank lines, and lines without a `key: value`
//! shape are skipped rather than treated as errors. The only fatal outcome
//! at this layer is a line that fails the encoding check.

use crate::{ParseError, ParseResult};

/// Per-line encoding check, injected into the parser
///
/// The default is [`Utf8Validator`]; tests (or callers dealing with exotic
/// upstream sources) can substitute their own policy.
pub trait EncodingValidator {
    /// Returns `true` if the line's bytes are acceptably encoded
    fn is_valid(&self, line: &[u8]) -> bool;
}

/// Accepts any valid UTF-8 line, which is what the protocol requires
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8Validator;

impl EncodingValidator for Utf8Validator {
    fn is_valid(&self, line: &[u8]) -> bool {
        std::str::from_utf8(line).is_ok()
    }
}

/// The directive keys the builder reacts to
///
/// Anything else parses as `Unknown` and is ignored downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKey {
    UserAgent,
    Allow,
    Disallow,
    CrawlDelay,
    Sitemap,
    Unknown,
}

impl DirectiveKey {
    fn from_key(key: &str) -> Self {
        match key {
            "user-agent" => Self::UserAgent,
            "allow" => Self::Allow,
            "disallow" => Self::Disallow,
            "crawl-delay" => Self::CrawlDelay,
            "sitemap" => Self::Sitemap,
            _ => Self::Unknown,
        }
    }
}

/// One parsed `key: value` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub key: DirectiveKey,
    pub value: String,
}

/// Tokenizes a single raw line
///
/// `line_number` is 1-based and only used for diagnostics. Returns
/// `Ok(None)` for lines that carry no directive.
pub fn tokenize_line(
    raw: &[u8],
    line_number: usize,
    validator: &dyn EncodingValidator,
) -> ParseResult<Option<Directive>> {
    let trimmed = raw.trim_ascii();

    if !validator.is_valid(trimmed) {
        return Err(ParseError::InvalidEncoding { line: line_number });
    }
    let line = std::str::from_utf8(trimmed)
        .map_err(|_| ParseError::InvalidEncoding { line: line_number })?;

    // Comment stripping happens before the blank check so that a line that
    // is nothing but a comment is skipped, not parsed.
    let line = match line.split_once('#') {
        Some((before, _)) => before,
        None => line,
    };
    if line.is_empty() {
        return Ok(None);
    }

    // Split on the first colon only; values such as sitemap URLs contain
    // colons of their own.
    let Some((key, value)) = line.split_once(':') else {
        return Ok(None);
    };
    let key = key.trim().to_lowercase();
    let value = value.trim();
    if key.is_empty() || value.is_empty() {
        return Ok(None);
    }

    // A value is a single token; anything after the first whitespace is
    // dropped silently.
    let Some(value) = value.split_whitespace().next() else {
        return Ok(None);
    };

    Ok(Some(Directive {
        key: DirectiveKey::from_key(&key),
        value: value.to_string(),
    }))
}
