use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::config::Thresholds;
use crate::services::classify::provider::ClassificationPort;

struct FixedProvider {
    reply: Result<String, String>,
    calls: AtomicUsize,
}

impl FixedProvider {
    fn ok(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            reply: Err("connection refused".to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ClassificationPort for FixedProvider {
    fn classify(
        &self,
        _item_name: &str,
        _groups: &BTreeMap<String, String>,
    ) -> Result<String, String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }
}

fn groups() -> BTreeMap<String, String> {
    let mut g = BTreeMap::new();
    g.insert("Pintura".to_string(), "Tintas e seladores".to_string());
    g.insert(
        "Instalações Elétricas".to_string(),
        "Fiação, quadros e tomadas".to_string(),
    );
    g.insert(
        "Alvenaria e Vedações Verticais".to_string(),
        "Tijolos e blocos".to_string(),
    );
    g
}

#[test]
fn test_source_label_short_circuits_external_call() {
    let provider = FixedProvider::ok("Pintura");
    let suggester = GroupSuggester::new(Some(&provider), Thresholds::default());

    // Accent/case variation of a known group name still clears the
    // recognition threshold without consulting the classifier.
    let suggestion = suggester.suggest_group(
        "Aplicação de tinta látex",
        Some("PINTURA"),
        &groups(),
    );
    assert_eq!(suggestion.as_deref(), Some("Pintura"));
    assert_eq!(provider.call_count(), 0);
}

#[test]
fn test_verbatim_reply_accepted() {
    let provider = FixedProvider::ok("Instalações Elétricas");
    let suggester = GroupSuggester::new(Some(&provider), Thresholds::default());

    let suggestion = suggester.suggest_group("Tomada dupla 10A", None, &groups());
    assert_eq!(suggestion.as_deref(), Some("Instalações Elétricas"));
    assert_eq!(provider.call_count(), 1);
}

#[test]
fn test_near_miss_reply_salvaged_by_rematch() {
    // Reply without accents is not a verbatim group name but re-matches.
    let provider = FixedProvider::ok("instalacoes eletricas");
    let suggester = GroupSuggester::new(Some(&provider), Thresholds::default());

    let suggestion = suggester.suggest_group("Tomada dupla 10A", None, &groups());
    assert_eq!(suggestion.as_deref(), Some("Instalações Elétricas"));
}

#[test]
fn test_garbage_reply_returns_none() {
    let provider = FixedProvider::ok("não sei classificar esse serviço");
    let suggester = GroupSuggester::new(Some(&provider), Thresholds::default());

    let suggestion = suggester.suggest_group("Item misterioso", None, &groups());
    assert!(suggestion.is_none());
}

#[test]
fn test_failing_provider_degrades_to_none() {
    let provider = FixedProvider::failing();
    let suggester = GroupSuggester::new(Some(&provider), Thresholds::default());

    let suggestion = suggester.suggest_group("Qualquer item", None, &groups());
    assert!(suggestion.is_none());
    assert_eq!(provider.call_count(), 1);
}

#[test]
fn test_no_provider_uses_label_path_only() {
    let suggester = GroupSuggester::new(None, Thresholds::default());

    let suggestion = suggester.suggest_group("Parede de bloco", Some("alvenaria e vedacoes verticais"), &groups());
    assert_eq!(suggestion.as_deref(), Some("Alvenaria e Vedações Verticais"));

    // Without a usable label there is nothing left to try.
    let suggestion = suggester.suggest_group("Parede de bloco", None, &groups());
    assert!(suggestion.is_none());
}

#[test]
fn test_empty_group_catalog_returns_none() {
    let provider = FixedProvider::ok("Pintura");
    let suggester = GroupSuggester::new(Some(&provider), Thresholds::default());

    let suggestion = suggester.suggest_group("Item", Some("Pintura"), &BTreeMap::new());
    assert!(suggestion.is_none());
    assert_eq!(provider.call_count(), 0);
}
