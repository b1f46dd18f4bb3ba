//! The translator: fallback lookup, context and plural resolution, formatting.

use std::collections::HashMap;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use bon::Builder;

use crate::catalog::Catalog;
use crate::formatter::{MessageFormatter, PlaceholderFormatter};
use crate::plural::{CldrPluralSelector, PluralSelector};
use crate::resolve::{
    CONTEXT_KEY, COUNT_KEY, SINGULAR_KEY, coerce_singular, count_of, first_form, resolve_context,
    select_form,
};
use crate::types::{ContextMessage, Message, Value};

/// A source of message entries that resolves keys through its own chain.
///
/// [`Translator`] is the main implementation; a translator's fallback is any
/// `MessageSource`.
pub trait MessageSource: Send + Sync {
    /// The locale this source serves.
    fn locale(&self) -> &str;

    /// Find a non-empty entry for `key`, consulting fallbacks as needed.
    fn lookup(&self, key: &str) -> Option<Message>;
}

/// Translates message keys for one locale.
///
/// A translator owns the catalog for its locale and optionally points to one
/// fallback source, typically the translator of a more general locale
/// (`fr_CA` → `fr` → base catalog). The fallback is fixed at construction, so
/// a chain made only of translators is built bottom-up and cannot loop. A
/// custom [`MessageSource`] that can be re-pointed after construction, such as
/// one holding a `OnceLock<Arc<Translator>>`, can close a loop; avoiding that
/// is up to the caller.
///
/// Entries found through the fallback are copied into the local catalog, so
/// each key walks the chain at most once. The catalog synchronizes that write,
/// which makes a translator safe to share across threads behind an `Arc`.
///
/// Translation never fails: a key with no entry anywhere in the chain
/// translates to the key itself.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use glossa::{Catalog, PluralForms, Translator, vars};
///
/// let base = Translator::builder()
///     .locale("fr")
///     .catalog(Catalog::from_iter([
///         ("Hello", "Bonjour"),
///     ]))
///     .build();
///
/// let translator = Translator::builder()
///     .locale("fr_CA")
///     .catalog(Catalog::from_iter([(
///         "{_count} apples",
///         PluralForms::from_list(["{_count} pomme", "{_count} pommes"]),
///     )]))
///     .fallback(Arc::new(base))
///     .build();
///
/// assert_eq!(translator.translate("Hello", vars! {}), "Bonjour");
/// assert_eq!(translator.translate("{_count} apples", vars! { "_count" => 3 }), "3 pommes");
/// assert_eq!(translator.translate("Goodbye", vars! {}), "Goodbye");
/// ```
#[derive(Builder)]
#[builder(on(String, into))]
pub struct Translator {
    /// Locale identifier passed to the plural selector and the formatter.
    locale: String,

    /// Messages for this locale, pre-populated by a loader.
    #[builder(default)]
    catalog: Catalog,

    /// Renders resolved templates. Shared, so many translators can use one.
    #[builder(default = Arc::new(PlaceholderFormatter) as Arc<dyn MessageFormatter>)]
    formatter: Arc<dyn MessageFormatter>,

    /// Chooses plural forms by count.
    #[builder(default = Arc::new(CldrPluralSelector::default()) as Arc<dyn PluralSelector>)]
    selector: Arc<dyn PluralSelector>,

    /// Source consulted for keys missing from the catalog.
    fallback: Option<Arc<dyn MessageSource>>,
}

impl Translator {
    /// The catalog owned by this translator.
    ///
    /// Includes entries memoized from the fallback chain so far.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The fallback source, if any.
    pub fn fallback(&self) -> Option<&Arc<dyn MessageSource>> {
        self.fallback.as_ref()
    }

    /// Translate `key`, resolving context and plural forms from `variables`
    /// and substituting the rest through the formatter.
    ///
    /// Reserved variables:
    /// - `_context` selects a context variant; it is removed before formatting
    /// - `_count` drives plural selection (0 when absent)
    /// - `_singular` supplies the singular form when the stored message only
    ///   has one form
    ///
    /// Calling with no variables returns the resolved text as-is, without
    /// formatting; for plural forms that is the first form.
    pub fn translate(&self, key: &str, mut variables: HashMap<String, Value>) -> String {
        let message = self.lookup(key).unwrap_or_else(|| {
            tracing::trace!(locale = %self.locale, %key, "no translation, using key");
            Message::Text(key.to_string())
        });

        let mut message = match message {
            Message::Context(forms) => {
                let resolved = resolve_context(key, &forms, variables.get(CONTEXT_KEY));
                variables.remove(CONTEXT_KEY);
                resolved
            }
            Message::Text(text) => ContextMessage::Text(text),
            Message::Plural(forms) => ContextMessage::Plural(forms),
        };

        if variables.is_empty() {
            return match message {
                ContextMessage::Text(text) => text,
                ContextMessage::Plural(forms) => first_form(&forms),
            };
        }

        if let ContextMessage::Text(text) = message {
            message = match variables.get(SINGULAR_KEY) {
                Some(singular) => ContextMessage::Plural(coerce_singular(singular, text)),
                None => ContextMessage::Text(text),
            };
        }

        let mut template = match message {
            ContextMessage::Text(text) => text,
            ContextMessage::Plural(forms) => {
                let tag = self.selector.select(&self.locale, count_of(&variables));
                select_form(&forms, &tag)
            }
        };

        if template.is_empty() {
            template = key.to_string();
        }

        self.formatter.format(&self.locale, &template, &variables)
    }

    /// Translate a message with singular and plural source forms.
    ///
    /// The plural text is the lookup key; `count` and `singular` are passed as
    /// `_count` and `_singular`, overriding any such entries in `variables`.
    pub fn translate_plural(
        &self,
        singular: &str,
        plural: &str,
        count: i64,
        mut variables: HashMap<String, Value>,
    ) -> String {
        variables.insert(COUNT_KEY.to_string(), Value::Number(count));
        variables.insert(SINGULAR_KEY.to_string(), Value::from(singular));
        self.translate(plural, variables)
    }

    /// Translate a message in a disambiguating context.
    ///
    /// `context` is passed as `_context`, overriding any such entry in
    /// `variables`.
    pub fn translate_context(
        &self,
        context: &str,
        key: &str,
        mut variables: HashMap<String, Value>,
    ) -> String {
        variables.insert(CONTEXT_KEY.to_string(), Value::from(context));
        self.translate(key, variables)
    }

    /// Translate a plural message in a disambiguating context.
    pub fn translate_context_plural(
        &self,
        context: &str,
        singular: &str,
        plural: &str,
        count: i64,
        mut variables: HashMap<String, Value>,
    ) -> String {
        variables.insert(CONTEXT_KEY.to_string(), Value::from(context));
        self.translate_plural(singular, plural, count, variables)
    }
}

impl MessageSource for Translator {
    fn locale(&self) -> &str {
        &self.locale
    }

    fn lookup(&self, key: &str) -> Option<Message> {
        let local = self.catalog.get_message(key);
        if let Some(message) = local.filter(|message| !message.is_empty()) {
            return Some(message);
        }

        let fallback = self.fallback.as_ref()?;
        let message = fallback.lookup(key).filter(|message| !message.is_empty())?;
        tracing::debug!(
            locale = %self.locale,
            fallback = %fallback.locale(),
            %key,
            "memoizing entry from fallback"
        );
        self.catalog.add_message(key, message.clone());
        Some(message)
    }
}

impl Debug for Translator {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Translator")
            .field("locale", &self.locale)
            .field("catalog", &self.catalog)
            .field("fallback", &self.fallback.as_ref().map(|source| source.locale()))
            .finish_non_exhaustive()
    }
}
