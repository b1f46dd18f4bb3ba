//! Resolution steps applied to a message entry once it has been looked up.
//!
//! Each step has a defined fallback so that resolution always yields a
//! template: a missing context yields the key, a missing plural form yields
//! the last form.

use std::collections::HashMap;

use crate::types::{ContextForms, ContextMessage, PluralForms, PluralTag, Value};

/// Variable selecting the context variant of a message.
pub const CONTEXT_KEY: &str = "_context";

/// Variable holding the count used for plural selection.
pub const COUNT_KEY: &str = "_count";

/// Variable holding the singular text for a plural call against a message
/// that only has one form.
pub const SINGULAR_KEY: &str = "_singular";

/// Pick the context variant of a message.
///
/// Without a requested context, the `""` variant wins, then the first
/// variant defined. A requested context that is missing or maps to the empty
/// string yields the key itself, so the gap stays visible.
pub(crate) fn resolve_context(
    key: &str,
    forms: &ContextForms,
    context: Option<&Value>,
) -> ContextMessage {
    let Some(context) = context else {
        return forms
            .get("")
            .or_else(|| forms.first())
            .cloned()
            .unwrap_or_else(|| ContextMessage::from(key));
    };

    let context = context.to_string();
    match forms.get(&context) {
        None => {
            tracing::trace!(%key, %context, "no variant for requested context");
            ContextMessage::from(key)
        }
        Some(ContextMessage::Text(text)) if text.is_empty() => ContextMessage::from(key),
        Some(message) => message.clone(),
    }
}

/// The text used when a plural message is requested without any variables.
pub(crate) fn first_form(forms: &PluralForms) -> String {
    forms.first().unwrap_or_default().to_string()
}

/// Build two positional forms from a singular override and the stored text.
pub(crate) fn coerce_singular(singular: &Value, plural: String) -> PluralForms {
    PluralForms::from_iter([
        (PluralTag::index(0), singular.to_string()),
        (PluralTag::index(1), plural),
    ])
}

/// The form for `tag`, or the last form when the tag is not defined.
pub(crate) fn select_form(forms: &PluralForms, tag: &PluralTag) -> String {
    forms
        .get(tag)
        .or_else(|| forms.last())
        .unwrap_or_default()
        .to_string()
}

/// The plural count carried by the variables, 0 when absent or not numeric.
pub(crate) fn count_of(variables: &HashMap<String, Value>) -> i64 {
    variables
        .get(COUNT_KEY)
        .and_then(Value::as_count)
        .unwrap_or(0)
}
