//! Host-keyed registry of extraction rules.
//!
//! Dispatch is an exact lookup on the URL host. There is no fallback rule:
//! an unknown host is an error naming that host.

use std::collections::HashMap;

use stanza_core::Error;

use super::rules::ExtractionRule;
use super::sources;

/// Maps a source host to the rule that extracts its pages.
pub struct AdapterRegistry {
    rules: HashMap<String, Box<dyn ExtractionRule>>,
}

impl AdapterRegistry {
    /// A registry with no rules.
    pub fn empty() -> Self {
        Self { rules: HashMap::new() }
    }

    /// Register `rule` for `host`, replacing any earlier rule for it.
    pub fn with(mut self, host: &str, rule: impl ExtractionRule + 'static) -> Self {
        self.rules.insert(host.to_string(), Box::new(rule));
        self
    }

    /// Find the rule for exactly `host`.
    pub fn dispatch(&self, host: &str) -> Result<&dyn ExtractionRule, Error> {
        self.rules
            .get(host)
            .map(|rule| rule.as_ref())
            .ok_or_else(|| Error::UnknownSource(host.to_string()))
    }

    /// Registered hosts, sorted.
    pub fn hosts(&self) -> Vec<&str> {
        let mut hosts: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        hosts.sort_unstable();
        hosts
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for AdapterRegistry {
    /// Every source site the quiz knows about.
    fn default() -> Self {
        sources::known_sources()
    }
}
