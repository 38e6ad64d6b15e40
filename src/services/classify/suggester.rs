//! Group suggestion for an unmapped canonical item.
//!
//! Resolution order: cheap deterministic match on a source-supplied label
//! first, external classifier second, fuzzy salvage of the classifier reply
//! last. Anything unresolved is handed back as `None` for a human to
//! decide, never a silent wrong default.

use std::collections::BTreeMap;

use crate::config::Thresholds;
use crate::services::matching::best_match;

use super::provider::ClassificationPort;

pub struct GroupSuggester<'a> {
    provider: Option<&'a dyn ClassificationPort>,
    thresholds: Thresholds,
}

impl<'a> GroupSuggester<'a> {
    /// `provider` may be `None` (classifier unreachable at startup); the
    /// suggester then only uses the deterministic label path.
    pub fn new(provider: Option<&'a dyn ClassificationPort>, thresholds: Thresholds) -> Self {
        Self {
            provider,
            thresholds,
        }
    }

    /// Propose a group for `item_name`, or `None` when unresolved.
    ///
    /// `source_label` is a group-ish label that came attached to the source
    /// row, when the spreadsheet had one. `groups` is the known catalog,
    /// name → description.
    pub fn suggest_group(
        &self,
        item_name: &str,
        source_label: Option<&str>,
        groups: &BTreeMap<String, String>,
    ) -> Option<String> {
        if groups.is_empty() {
            return None;
        }
        let names: Vec<String> = groups.keys().cloned().collect();

        // 1. Source label against known names: no external call needed.
        if let Some(label) = source_label.map(str::trim).filter(|l| !l.is_empty()) {
            if let Some(m) = best_match(label, &names) {
                if m.score >= self.thresholds.group_recognition {
                    log::debug!("group '{}' recognized from source label ({}%)", m.candidate, m.score);
                    return Some(m.candidate);
                }
            }
        }

        // 2. External classifier, best-effort.
        let provider = self.provider?;
        let reply = match provider.classify(item_name, groups) {
            Ok(reply) => reply,
            Err(e) => {
                log::warn!("classifier unavailable for '{item_name}': {e}");
                return None;
            }
        };

        // 3. Verbatim group name.
        let reply = reply.trim();
        if groups.contains_key(reply) {
            return Some(reply.to_string());
        }

        // 4. The reply is free text; salvage it by re-matching.
        if let Some(m) = best_match(reply, &names) {
            if m.score > self.thresholds.ai_reply_accept {
                log::debug!(
                    "classifier reply '{}' matched to group '{}' ({}%)",
                    reply,
                    m.candidate,
                    m.score
                );
                return Some(m.candidate);
            }
        }

        log::debug!("classifier reply '{reply}' did not match any group");
        None
    }
}

#[cfg(test)]
#[path = "tests/suggester_tests.rs"]
mod tests;
