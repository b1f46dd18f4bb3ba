//! Tests for catalog storage, auditing, and the serde shape of entries.

use glossa::{Catalog, CatalogWarning, ContextForms, ContextMessage, Message, PluralForms};

// =========================================================================
// Storage
// =========================================================================

#[test]
fn get_message_does_not_consult_anything_else() {
    let catalog = Catalog::from_iter([("a", "A")]);
    assert_eq!(catalog.get_message("a"), Some(Message::from("A")));
    assert_eq!(catalog.get_message("b"), None);
}

#[test]
fn add_messages_bulk_inserts() {
    let catalog = Catalog::new();
    catalog.add_messages([("one", "1"), ("two", "2")]);
    assert_eq!(catalog.len(), 2);
    assert!(catalog.contains("two"));
    assert!(!catalog.is_empty());
}

#[test]
fn plural_forms_keep_definition_order_on_overwrite() {
    let mut forms = PluralForms::from_iter([("one", "a"), ("few", "b"), ("other", "c")]);
    forms.insert("one", "A");
    let order: Vec<(&str, &str)> = forms.iter().map(|(tag, text)| (tag.as_str(), text)).collect();
    assert_eq!(order, vec![("one", "A"), ("few", "b"), ("other", "c")]);
    assert_eq!(forms.first(), Some("A"));
    assert_eq!(forms.last(), Some("c"));
}

#[test]
fn context_forms_keep_definition_order() {
    let forms = ContextForms::from_iter([("b", "B"), ("a", "A")]);
    let contexts: Vec<&str> = forms.iter().map(|(context, _)| context).collect();
    assert_eq!(contexts, vec!["b", "a"]);
    assert_eq!(forms.first(), Some(&ContextMessage::from("B")));
}

// =========================================================================
// Auditing
// =========================================================================

#[test]
fn validate_against_reports_problems_sorted_by_key() {
    let source = Catalog::from_iter([
        ("apples", Message::from(PluralForms::from_list(["apple", "apples"]))),
        ("hello", Message::from("Hello")),
        ("title", Message::from(ContextForms::from_iter([("", "Title")]))),
    ]);
    let translation = Catalog::from_iter([
        ("title", Message::from("Titre")),
        ("hello", Message::from("")),
        ("apples", Message::from(PluralForms::from_list(["pomme", "pommes"]))),
        ("extra", Message::from("En trop")),
    ]);

    let warnings = translation.validate_against(&source, "fr");

    assert_eq!(
        warnings,
        vec![
            CatalogWarning::UnknownKey {
                key: "extra".to_string(),
                locale: "fr".to_string(),
            },
            CatalogWarning::EmptyMessage {
                key: "hello".to_string(),
                locale: "fr".to_string(),
            },
            CatalogWarning::ShapeMismatch {
                key: "title".to_string(),
                locale: "fr".to_string(),
                expected: "context",
                found: "text",
            },
        ]
    );

    let rendered = warnings
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    insta::assert_snapshot!(rendered, @r"
    'extra' in 'fr' is not defined in the source catalog
    'hello' in 'fr' is empty
    'title' in 'fr' is text but the source entry is context
    ");
}

#[test]
fn validate_against_matching_catalogs_is_clean() {
    let source = Catalog::from_iter([("hello", "Hello")]);
    let translation = Catalog::from_iter([("hello", "Bonjour")]);
    assert!(translation.validate_against(&source, "fr").is_empty());
}

// =========================================================================
// Serde Shape
// =========================================================================

#[test]
fn deserializes_all_entry_shapes() {
    let json = r#"{
        "hello": "Bonjour",
        "apples": ["pomme", "pommes"],
        "days": {"one": "jour", "other": "jours"},
        "may": {"_context": {"": "mai", "verb": ["peut", "peuvent"]}}
    }"#;
    let entries: Vec<(String, Message)> =
        serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(json)
            .unwrap()
            .into_iter()
            .map(|(key, value)| (key, serde_json::from_value(value).unwrap()))
            .collect();
    let catalog = Catalog::from_iter(entries);

    assert_eq!(catalog.get_message("hello"), Some(Message::from("Bonjour")));
    assert_eq!(
        catalog.get_message("apples"),
        Some(Message::from(PluralForms::from_list(["pomme", "pommes"])))
    );
    assert_eq!(
        catalog.get_message("days"),
        Some(Message::from(PluralForms::from_iter([
            ("one", "jour"),
            ("other", "jours"),
        ])))
    );
    assert_eq!(
        catalog.get_message("may"),
        Some(Message::from(ContextForms::from_iter([
            ("", ContextMessage::from("mai")),
            (
                "verb",
                ContextMessage::from(PluralForms::from_list(["peut", "peuvent"]))
            ),
        ])))
    );
}

#[test]
fn plural_map_order_is_preserved() {
    let message: Message =
        serde_json::from_str(r#"{"other": "jours", "one": "jour"}"#).unwrap();
    let Message::Plural(forms) = message else {
        panic!("expected plural forms");
    };
    assert_eq!(forms.first(), Some("jours"));
    assert_eq!(forms.last(), Some("jour"));
}

#[test]
fn serializes_context_under_reserved_key() {
    let message = Message::from(ContextForms::from_iter([("formal", "Monsieur")]));
    let json = serde_json::to_string(&message).unwrap();
    assert_eq!(json, r#"{"_context":{"formal":"Monsieur"}}"#);
}
