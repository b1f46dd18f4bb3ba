//! Integration tests for fallback lookup and memoization.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use glossa::{Catalog, Message, MessageSource, PluralForms, Translator, vars};

/// A fallback that counts how often it is consulted.
struct CountingSource {
    catalog: Catalog,
    lookups: AtomicUsize,
}

impl CountingSource {
    fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            lookups: AtomicUsize::new(0),
        }
    }

    fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl MessageSource for CountingSource {
    fn locale(&self) -> &str {
        "base"
    }

    fn lookup(&self, key: &str) -> Option<Message> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.catalog.get_message(key)
    }
}

// =========================================================================
// Memoization
// =========================================================================

#[test]
fn fallback_entry_is_memoized_locally() {
    let base = Arc::new(CountingSource::new(Catalog::from_iter([("Save", "Enregistrer")])));
    let translator = Translator::builder()
        .locale("fr_CA")
        .fallback(base.clone())
        .build();

    assert!(translator.catalog().get_message("Save").is_none());
    assert_eq!(translator.translate("Save", vars! {}), "Enregistrer");
    assert_eq!(base.lookups(), 1);

    assert_eq!(
        translator.catalog().get_message("Save"),
        Some(Message::from("Enregistrer"))
    );
    assert_eq!(translator.translate("Save", vars! {}), "Enregistrer");
    assert_eq!(base.lookups(), 1);
}

#[test]
fn missing_keys_are_not_memoized() {
    let base = Arc::new(CountingSource::new(Catalog::new()));
    let translator = Translator::builder()
        .locale("fr_CA")
        .fallback(base.clone())
        .build();

    assert_eq!(translator.translate("Quit", vars! {}), "Quit");
    assert_eq!(translator.translate("Quit", vars! {}), "Quit");

    assert_eq!(base.lookups(), 2);
    assert!(!translator.catalog().contains("Quit"));
}

#[test]
fn empty_fallback_entry_is_not_memoized() {
    let base = Arc::new(CountingSource::new(Catalog::from_iter([("Quit", "")])));
    let translator = Translator::builder()
        .locale("fr_CA")
        .fallback(base.clone())
        .build();

    assert_eq!(translator.translate("Quit", vars! {}), "Quit");
    assert!(!translator.catalog().contains("Quit"));
}

#[test]
fn local_entry_wins_without_consulting_fallback() {
    let base = Arc::new(CountingSource::new(Catalog::from_iter([("Color", "Couleur")])));
    let translator = Translator::builder()
        .locale("fr_CA")
        .catalog(Catalog::from_iter([("Color", "Couleur (CA)")]))
        .fallback(base.clone())
        .build();

    assert_eq!(translator.translate("Color", vars! {}), "Couleur (CA)");
    assert_eq!(base.lookups(), 0);
}

#[test]
fn empty_local_entry_is_replaced_by_fallback_entry() {
    let base = Arc::new(CountingSource::new(Catalog::from_iter([("Color", "Couleur")])));
    let translator = Translator::builder()
        .locale("fr_CA")
        .catalog(Catalog::from_iter([("Color", "")]))
        .fallback(base.clone())
        .build();

    assert_eq!(translator.translate("Color", vars! {}), "Couleur");
    assert_eq!(
        translator.catalog().get_message("Color"),
        Some(Message::from("Couleur"))
    );
}

// =========================================================================
// Multi-level Chains
// =========================================================================

#[test]
fn three_level_chain_memoizes_at_every_level() {
    let root = Arc::new(CountingSource::new(Catalog::from_iter([(
        "{_count} days",
        PluralForms::from_list(["{_count} jour", "{_count} jours"]),
    )])));
    let fr = Arc::new(
        Translator::builder()
            .locale("fr")
            .fallback(root.clone())
            .build(),
    );
    let fr_ca = Translator::builder()
        .locale("fr_CA")
        .fallback(fr.clone())
        .build();

    assert_eq!(
        fr_ca.translate("{_count} days", vars! { "_count" => 2 }),
        "2 jours"
    );
    assert!(fr.catalog().contains("{_count} days"));
    assert!(fr_ca.catalog().contains("{_count} days"));

    assert_eq!(fr.translate("{_count} days", vars! { "_count" => 1 }), "1 jour");
    assert_eq!(root.lookups(), 1);
}

#[test]
fn fallback_accessor_exposes_fallback_locale() {
    let fr = Arc::new(Translator::builder().locale("fr").build());
    let fr_ca = Translator::builder().locale("fr_CA").fallback(fr).build();

    assert_eq!(fr_ca.locale(), "fr_CA");
    assert_eq!(fr_ca.fallback().map(|source| source.locale()), Some("fr"));
}

// =========================================================================
// Shared Use
// =========================================================================

#[test]
fn translator_is_shareable_across_threads() {
    let base = Arc::new(CountingSource::new(Catalog::from_iter([
        ("Yes", "Oui"),
        ("No", "Non"),
    ])));
    let translator = Arc::new(
        Translator::builder()
            .locale("fr_CA")
            .fallback(base.clone())
            .build(),
    );

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let translator = Arc::clone(&translator);
            thread::spawn(move || {
                let key = if i % 2 == 0 { "Yes" } else { "No" };
                translator.translate(key, vars! {})
            })
        })
        .collect();

    let results: Vec<String> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    for (i, result) in results.iter().enumerate() {
        let expected = if i % 2 == 0 { "Oui" } else { "Non" };
        assert_eq!(result, expected);
    }
    assert_eq!(translator.catalog().len(), 2);
    assert!(base.lookups() >= 2);
}
