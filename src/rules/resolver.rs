//! User-agent resolution
//!
//! Picks the rule set whose agent name is the longest case-insensitive
//! prefix of the requested name, so an entry for `googlebot` governs a
//! request from `googlebot-images` unless a more specific entry exists.
//! Keys are scanned in sorted order, so two equal-length candidates (case
//! variants of the same name) resolve deterministically.

use std::collections::BTreeMap;

use crate::rules::RuleSet;

/// Resolves the rule set governing `requested_agent`
///
/// Falls back to the `*` group; `None` means no group applies and the
/// caller must treat the agent as unrestricted.
pub(crate) fn resolve<'table>(
    requested_agent: &str,
    rules: &'table BTreeMap<String, RuleSet>,
) -> Option<&'table RuleSet> {
    let requested = requested_agent.to_lowercase();

    let mut matched: Option<&String> = None;
    for name in rules.keys() {
        if !requested.starts_with(&name.to_lowercase()) {
            continue;
        }
        if matched.map_or(true, |m| name.chars().count() >= m.chars().count()) {
            matched = Some(name);
        }
    }

    match matched {
        Some(name) => rules.get(name),
        None => rules.get("*"),
    }
}
