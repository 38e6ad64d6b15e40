//! Per-upload mapping session: collects the descriptions the catalog has
//! never seen, pre-selects a decision for each, and commits the accepted
//! decisions. One instance per imported batch; nothing is persisted until
//! `commit`, and a failed commit retries safely because every upsert is
//! idempotent per raw description.

use std::collections::{BTreeMap, HashSet};

use sqlx::SqlitePool;

use crate::config::Thresholds;
use crate::database::mapping_repo;
use crate::services::classify::GroupSuggester;
use crate::services::matching::{best_match, ScoredMatch};
use crate::types::errors::{AppError, AppResult};

// ─── Session Types ───────────────────────────────────────────────────────────

/// Lifecycle of one imported batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Gathering new raw descriptions not yet in the catalog.
    Collecting,
    /// One pending decision per new description, awaiting confirmation.
    AwaitingDecisions,
    /// Decisions are being written.
    Committing,
    /// Every decision persisted.
    Committed,
    /// Commit failed; nothing further will be written by this session.
    Aborted,
}

/// What to do with one new raw description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionKind {
    /// Map to an existing canonical item.
    Associate,
    /// Register a new canonical item.
    Create,
}

#[derive(Debug, Clone)]
pub struct Decision {
    pub kind: DecisionKind,
    /// The chosen canonical item name; empty means still unresolved.
    pub canonical_item: String,
    pub group_name: Option<String>,
}

impl Decision {
    pub fn associate(canonical_item: impl Into<String>) -> Self {
        Self {
            kind: DecisionKind::Associate,
            canonical_item: canonical_item.into(),
            group_name: None,
        }
    }

    pub fn create(canonical_item: impl Into<String>) -> Self {
        Self {
            kind: DecisionKind::Create,
            canonical_item: canonical_item.into(),
            group_name: None,
        }
    }

    pub fn with_group(mut self, group_name: impl Into<String>) -> Self {
        self.group_name = Some(group_name.into());
        self
    }

    fn is_resolved(&self) -> bool {
        !self.canonical_item.trim().is_empty()
    }
}

/// A description entering the session, with the group-ish label that came
/// attached to its source row, if the spreadsheet had one.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub raw_description: String,
    pub source_label: Option<String>,
}

impl NewItem {
    pub fn new(raw_description: impl Into<String>) -> Self {
        Self {
            raw_description: raw_description.into(),
            source_label: None,
        }
    }
}

/// One undecided description with its scorer suggestion and current decision.
#[derive(Debug, Clone)]
pub struct PendingItem {
    pub raw_description: String,
    pub source_label: Option<String>,
    /// What the scorer proposed against the current canonical set, if
    /// anything scored at all.
    pub suggestion: Option<ScoredMatch>,
    pub decision: Decision,
}

// ─── Session ─────────────────────────────────────────────────────────────────

pub struct MappingSession {
    state: SessionState,
    items: Vec<PendingItem>,
    thresholds: Thresholds,
}

impl MappingSession {
    /// Start a session for a batch of imported descriptions.
    ///
    /// Descriptions already in the catalog are dropped (their mapping stands);
    /// the remainder each get a default decision: `Associate` with the best
    /// candidate when its score clears the association threshold, otherwise
    /// `Create` with a capitalized copy of the raw text. Defaults are
    /// always overridable via `set_decision`.
    pub async fn collect(
        pool: &SqlitePool,
        batch: &[NewItem],
        thresholds: Thresholds,
    ) -> AppResult<Self> {
        let mut session = Self {
            state: SessionState::Collecting,
            items: Vec::new(),
            thresholds,
        };

        let known: HashSet<String> = mapping_repo::list_mapped_raw_descriptions(pool)
            .await?
            .into_iter()
            .collect();
        let canonical_items = mapping_repo::list_canonical_items(pool).await?;

        let mut seen = HashSet::new();
        for item in batch {
            let raw = item.raw_description.trim();
            if raw.is_empty() || known.contains(raw) || !seen.insert(raw.to_string()) {
                continue;
            }

            let suggestion = best_match(raw, &canonical_items);
            let decision = match &suggestion {
                Some(m) if m.score >= session.thresholds.association_accept => {
                    Decision::associate(m.candidate.clone())
                }
                _ => Decision::create(capitalize(raw)),
            };

            session.items.push(PendingItem {
                raw_description: raw.to_string(),
                source_label: item.source_label.clone(),
                suggestion,
                decision,
            });
        }

        log::info!(
            "mapping session: {} new of {} imported descriptions",
            session.items.len(),
            batch.len()
        );
        session.state = SessionState::AwaitingDecisions;
        Ok(session)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The undecided items, in batch order.
    pub fn pending(&self) -> &[PendingItem] {
        &self.items
    }

    /// Override the decision for one description.
    pub fn set_decision(&mut self, raw_description: &str, decision: Decision) -> AppResult<()> {
        if self.state != SessionState::AwaitingDecisions {
            return Err(AppError::Validation(
                "session is no longer accepting decisions".into(),
            ));
        }
        let item = self
            .items
            .iter_mut()
            .find(|i| i.raw_description == raw_description)
            .ok_or_else(|| {
                AppError::NotFound(format!("'{raw_description}' is not part of this session"))
            })?;
        item.decision = decision;
        Ok(())
    }

    /// Fill in missing group names on pending decisions via the suggester.
    /// Items the suggester cannot resolve keep `group_name = None` and are
    /// left for the operator.
    pub fn suggest_groups(
        &mut self,
        suggester: &GroupSuggester<'_>,
        groups: &BTreeMap<String, String>,
    ) {
        for item in &mut self.items {
            if item.decision.group_name.is_none() && item.decision.is_resolved() {
                item.decision.group_name = suggester.suggest_group(
                    &item.decision.canonical_item,
                    item.source_label.as_deref(),
                    groups,
                );
            }
        }
    }

    /// The first description still lacking a non-empty decision value.
    pub fn first_incomplete(&self) -> Option<&str> {
        self.items
            .iter()
            .find(|i| !i.decision.is_resolved())
            .map(|i| i.raw_description.as_str())
    }

    /// Persist every decision. All-or-nothing from the caller's point of
    /// view: an incomplete decision aborts before anything is written, and a
    /// storage failure flips the session to `Aborted` (upserts already
    /// applied are harmless to repeat on a retry with a fresh session).
    pub async fn commit(&mut self, pool: &SqlitePool) -> AppResult<usize> {
        if self.state != SessionState::AwaitingDecisions {
            return Err(AppError::Validation(format!(
                "cannot commit from state {:?}",
                self.state
            )));
        }
        if let Some(raw) = self.first_incomplete() {
            return Err(AppError::Validation(format!(
                "decision pending for item '{raw}'"
            )));
        }

        self.state = SessionState::Committing;
        for idx in 0..self.items.len() {
            let (raw, canonical, group) = {
                let item = &self.items[idx];
                (
                    item.raw_description.clone(),
                    item.decision.canonical_item.clone(),
                    item.decision.group_name.clone(),
                )
            };
            let result =
                mapping_repo::upsert_mapping(pool, &raw, &canonical, group.as_deref(), None).await;

            if let Err(e) = result {
                log::error!("mapping commit failed at '{raw}': {e}");
                self.state = SessionState::Aborted;
                return Err(e);
            }
        }

        self.state = SessionState::Committed;
        Ok(self.items.len())
    }
}

/// First letter uppercased, the rest lowercased: the default name for a
/// canonical item created from raw text.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
