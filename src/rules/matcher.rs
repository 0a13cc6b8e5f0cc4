//! Path pattern matching
//!
//! Computes how specific the most specific matching pattern is, as the
//! character length of the raw pattern text. The scan stops at the FIRST
//! matching pattern in file order, not the longest: within a single allow
//! or disallow list, declaration order is the tie-break, and an earlier,
//! shorter pattern can mask a later, longer one. That quirk is part of the
//! observable contract and is pinned by tests here; the lengths are only
//! compared across the allow list versus the disallow list.

use regex::Regex;

use crate::{QueryError, QueryResult};

/// Returns the raw character length of the first pattern matching `path`,
/// or 0 if nothing matches
pub(crate) fn match_length(path: &str, patterns: &[String]) -> QueryResult<usize> {
    for pattern in patterns {
        if pattern.contains('*') || pattern.contains('$') {
            let expression = translate(pattern);
            let regex = Regex::new(&expression).map_err(|_| QueryError::Pattern {
                pattern: pattern.clone(),
            })?;

            // An empty match carries no information; treat it as no match.
            match regex.find(path) {
                Some(found) if !found.as_str().is_empty() => {
                    return Ok(pattern.chars().count());
                }
                _ => continue,
            }
        }

        if path.starts_with(pattern.as_str()) {
            return Ok(pattern.chars().count());
        }
    }

    Ok(0)
}

/// Translates a robots.txt pattern into a regular expression
///
/// `*` spans anything, a trailing `$` anchors the match to the end of the
/// path, and every other character is literal. Escaping the literal
/// segments keeps arbitrary robots.txt content from injecting regex
/// metacharacters; an interior `$` is therefore matched literally.
fn translate(pattern: &str) -> String {
    let (body, anchored) = match pattern.strip_suffix('$') {
        Some(body) => (body, true),
        None => (pattern, false),
    };

    let mut expression = body
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    if anchored {
        expression.push('$');
    }

    expression
}

#[cfg(test)]
mod tests {
    use super::*;

    fn length(path: &str, patterns: &[&str]) -> usize {
        let patterns: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        match_length(path, &patterns).unwrap()
    }

    #[test]
    fn test_empty_pattern_list() {
        assert_eq!(length("/anything", &[]), 0);
    }

    #[test]
    fn test_plain_prefix_match() {
        assert_eq!(length("/fish", &["/fish"]), 5);
        assert_eq!(length("/fish.html", &["/fish"]), 5);
        assert_eq!(length("/fishheads", &["/fish"]), 5);
        assert_eq!(length("/fish.php?id=1", &["/fish"]), 5);
    }

    #[test]
    fn test_plain_prefix_no_match() {
        assert_eq!(length("/Fish.asp", &["/fish"]), 0);
        assert_eq!(length("/catfish", &["/fish"]), 0);
        assert_eq!(length("/?id=fish", &["/fish"]), 0);
    }

    #[test]
    fn test_trailing_slash_is_significant() {
        assert_eq!(length("/fish/", &["/fish/"]), 6);
        assert_eq!(length("/fish/salmon.htm", &["/fish/"]), 6);
        assert_eq!(length("/fish", &["/fish/"]), 0);
        assert_eq!(length("/fish.html", &["/fish/"]), 0);
    }

    #[test]
    fn test_wildcard_spans_anything() {
        assert_eq!(length("/filename.php", &["/*.php"]), 6);
        assert_eq!(length("/folder/filename.php", &["/*.php"]), 6);
        assert_eq!(length("/folder/any.php.file.html", &["/*.php"]), 6);
        assert_eq!(length("/windows.PHP", &["/*.php"]), 0);
    }

    #[test]
    fn test_trailing_anchor() {
        assert_eq!(length("/filename.php", &["/*.php$"]), 7);
        assert_eq!(length("/filename.php?x=1", &["/*.php$"]), 0);
        assert_eq!(length("/filename.php5", &["/*.php$"]), 0);
        assert_eq!(length("/filename.php/", &["/*.php$"]), 0);
    }

    #[test]
    fn test_wildcard_between_literals() {
        assert_eq!(length("/fish.php", &["/fish*.php"]), 10);
        assert_eq!(length("/fishheads/catfish.php?x=1", &["/fish*.php"]), 10);
        assert_eq!(length("/Fish.PHP", &["/fish*.php"]), 0);
    }

    #[test]
    fn test_match_anywhere_not_just_at_start() {
        assert_eq!(length("/store/retail/online/frontend/", &["*/retail/*/frontend/*"]), 21);
        assert_eq!(length("/online/frontend/", &["*/retail/*/frontend/*"]), 0);
    }

    #[test]
    fn test_metacharacters_are_literal() {
        // A dot in the pattern must not match an arbitrary character.
        assert_eq!(length("/filexphp", &["/*.php"]), 0);
        assert_eq!(length("/page?s=lightbox", &["*?s=lightbox"]), 12);
        assert_eq!(length("/page?cart=full&s=lightbox", &["*?s=lightbox"]), 0);
        assert_eq!(length("/a(b)c", &["/a(b)c"]), 6);
    }

    #[test]
    fn test_first_match_wins_over_longer_later_pattern() {
        // File order is the tie-break within a list: the longer, more
        // specific pattern declared later is masked.
        assert_eq!(length("/fish/salmon.htm", &["/fish", "/fish/salmon"]), 5);
        assert_eq!(length("/fish/salmon.htm", &["/fish/salmon", "/fish"]), 12);
    }

    #[test]
    fn test_wildcard_no_match_scans_next_pattern() {
        assert_eq!(length("/pricing", &["/*.php", "/pricing"]), 8);
    }

    #[test]
    fn test_length_is_raw_pattern_length() {
        // "/*" is 2 characters even though it matches the whole path.
        assert_eq!(length("/anything/else", &["/*"]), 2);
    }

    #[test]
    fn test_root_disallow() {
        assert_eq!(length("/", &["/"]), 1);
        assert_eq!(length("/anything?x=1", &["/"]), 1);
    }
}
