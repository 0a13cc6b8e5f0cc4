//! Robots.txt parsing
//!
//! [`tokenizer`] turns raw lines into directives; [`builder`] folds the
//! directive stream into the agent → rule-set table. The whole parse is
//! synchronous and all-or-nothing: the first fatal error aborts it and no
//! partial table is returned.

mod builder;
mod tokenizer;

pub use tokenizer::{Directive, DirectiveKey, EncodingValidator, Utf8Validator};

use std::collections::BTreeMap;

use crate::rules::RuleSet;
use crate::ParseResult;

use builder::TableBuilder;
use tokenizer::tokenize_line;

/// Parses raw robots.txt bytes into the rule table and sitemap list
///
/// Lines are separated by `\n`; a trailing `\r` is trimmed along with other
/// surrounding whitespace, so CRLF input parses identically.
pub(crate) fn parse_table(
    content: &[u8],
    validator: &dyn EncodingValidator,
) -> ParseResult<(BTreeMap<String, RuleSet>, Vec<String>)> {
    let mut builder = TableBuilder::new();

    for (index, raw_line) in content.split(|&byte| byte == b'\n').enumerate() {
        let line_number = index + 1;
        if let Some(directive) = tokenize_line(raw_line, line_number, validator)? {
            builder.feed(directive, line_number)?;
        }
    }

    Ok(builder.finish())
}
