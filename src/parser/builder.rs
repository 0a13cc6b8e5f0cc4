//! Rule table builder
//!
//! A small state machine over the directive stream. Consecutive
//! `User-agent` lines accumulate a group; the first non-user-agent
//! directive closes the group, so a later `User-agent` line starts a fresh
//! one instead of extending the old one. Directives apply to every agent
//! in the current group.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::parser::tokenizer::{Directive, DirectiveKey};
use crate::rules::RuleSet;
use crate::{ParseError, ParseResult};

/// Mutable accumulation state, frozen into the table by [`finish`]
///
/// [`finish`]: TableBuilder::finish
pub(crate) struct TableBuilder {
    rules: BTreeMap<String, RuleSet>,
    sitemaps: Vec<String>,
    current_agents: Vec<String>,
    group_closed: bool,
}

impl TableBuilder {
    pub(crate) fn new() -> Self {
        Self {
            rules: BTreeMap::new(),
            sitemaps: Vec::new(),
            current_agents: Vec::new(),
            group_closed: false,
        }
    }

    /// Applies one directive; `line_number` is 1-based, for diagnostics
    pub(crate) fn feed(&mut self, directive: Directive, line_number: usize) -> ParseResult<()> {
        match directive.key {
            DirectiveKey::UserAgent => {
                if self.group_closed {
                    self.current_agents.clear();
                    self.group_closed = false;
                }
                if !self.current_agents.contains(&directive.value) {
                    self.current_agents.push(directive.value.clone());
                }
                // Declaring an agent with no directives still makes it
                // resolvable, as an allow-everything rule set.
                self.rules.entry(directive.value).or_default();
            }
            DirectiveKey::Allow => {
                for agent in &self.current_agents {
                    self.rules
                        .entry(agent.clone())
                        .or_default()
                        .push_allow(directive.value.clone());
                }
                self.group_closed = true;
            }
            DirectiveKey::Disallow => {
                for agent in &self.current_agents {
                    self.rules
                        .entry(agent.clone())
                        .or_default()
                        .push_disallow(directive.value.clone());
                }
                self.group_closed = true;
            }
            DirectiveKey::CrawlDelay => {
                let seconds: u64 =
                    directive
                        .value
                        .parse()
                        .map_err(|_| ParseError::InvalidCrawlDelay {
                            value: directive.value.clone(),
                            line: line_number,
                        })?;
                for agent in &self.current_agents {
                    self.rules
                        .entry(agent.clone())
                        .or_default()
                        .set_crawl_delay(Duration::from_secs(seconds));
                }
                self.group_closed = true;
            }
            DirectiveKey::Sitemap => {
                self.sitemaps.push(directive.value);
                self.group_closed = true;
            }
            DirectiveKey::Unknown => {}
        }

        Ok(())
    }

    /// Freezes the accumulated state; only reachable when no directive
    /// failed, so partial tables never escape
    pub(crate) fn finish(self) -> (BTreeMap<String, RuleSet>, Vec<String>) {
        (self.rules, self.sitemaps)
    }
}
