use std::fmt::{Formatter, Result as FmtResult};

use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::PluralTag;

/// A catalog entry for one message key.
///
/// Entries come in three shapes:
/// - A plain text message
/// - A set of plural forms, selected by count
/// - A set of context variants, selected by the `_context` variable, each of
///   which is itself plain text or a set of plural forms
///
/// The serde representation mirrors the natural JSON shape of a catalog:
/// a string, a list or map of plural forms, or `{"_context": {...}}`.
///
/// # Example
///
/// ```
/// use glossa::{ContextForms, Message, PluralForms};
///
/// let plain = Message::from("Hello");
/// let plural = Message::from(PluralForms::from_list(["one file", "{_count} files"]));
/// let contextual = Message::from(ContextForms::from_iter([
///     ("", "May"),
///     ("verb", "may"),
/// ]));
///
/// assert_eq!(plain.shape(), "text");
/// assert_eq!(plural.shape(), "plural");
/// assert_eq!(contextual.shape(), "context");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "MessageRepr", into = "MessageRepr")]
pub enum Message {
    /// A single fixed message.
    Text(String),

    /// Plural forms keyed by plural tag, in definition order.
    Plural(PluralForms),

    /// Context variants keyed by context tag, in definition order.
    Context(ContextForms),
}

impl Message {
    /// Returns true when this entry carries nothing displayable.
    ///
    /// Empty entries are treated as missing by catalog lookups.
    pub fn is_empty(&self) -> bool {
        match self {
            Message::Text(text) => text.is_empty(),
            Message::Plural(forms) => forms.is_empty(),
            Message::Context(forms) => forms.is_empty(),
        }
    }

    /// Short name of this entry's shape, for diagnostics.
    pub fn shape(&self) -> &'static str {
        match self {
            Message::Text(_) => "text",
            Message::Plural(_) => "plural",
            Message::Context(_) => "context",
        }
    }

    /// Get the text if this is a plain message.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Message::Text(text) => Some(text),
            Message::Plural(_) | Message::Context(_) => None,
        }
    }
}

impl From<&str> for Message {
    fn from(s: &str) -> Self {
        Message::Text(s.to_string())
    }
}

impl From<String> for Message {
    fn from(s: String) -> Self {
        Message::Text(s)
    }
}

impl From<PluralForms> for Message {
    fn from(forms: PluralForms) -> Self {
        Message::Plural(forms)
    }
}

impl From<ContextForms> for Message {
    fn from(forms: ContextForms) -> Self {
        Message::Context(forms)
    }
}

impl From<ContextMessage> for Message {
    fn from(message: ContextMessage) -> Self {
        match message {
            ContextMessage::Text(text) => Message::Text(text),
            ContextMessage::Plural(forms) => Message::Plural(forms),
        }
    }
}

/// The message stored under one context tag.
///
/// Contexts may carry plural forms but never nest further contexts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextMessage {
    /// A single fixed message.
    Text(String),

    /// Plural forms for this context.
    Plural(PluralForms),
}

impl ContextMessage {
    /// Returns true for the empty string or an empty set of plural forms.
    pub fn is_empty(&self) -> bool {
        match self {
            ContextMessage::Text(text) => text.is_empty(),
            ContextMessage::Plural(forms) => forms.is_empty(),
        }
    }
}

impl From<&str> for ContextMessage {
    fn from(s: &str) -> Self {
        ContextMessage::Text(s.to_string())
    }
}

impl From<String> for ContextMessage {
    fn from(s: String) -> Self {
        ContextMessage::Text(s)
    }
}

impl From<PluralForms> for ContextMessage {
    fn from(forms: PluralForms) -> Self {
        ContextMessage::Plural(forms)
    }
}

/// Plural forms of a message, in definition order.
///
/// Order matters: the first form is used when a plural message is requested
/// without variables, and the last form is the catch-all when the selected
/// tag has no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluralForms {
    forms: Vec<(PluralTag, String)>,
}

impl PluralForms {
    /// Create an empty set of plural forms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build positional forms, tagged `"0"`, `"1"`, ... in order.
    ///
    /// ```
    /// use glossa::PluralForms;
    ///
    /// let forms = PluralForms::from_list(["apple", "apples"]);
    /// assert_eq!(forms.get("0"), Some("apple"));
    /// assert_eq!(forms.get("1"), Some("apples"));
    /// ```
    pub fn from_list<S: Into<String>>(forms: impl IntoIterator<Item = S>) -> Self {
        forms
            .into_iter()
            .enumerate()
            .map(|(index, text)| (PluralTag::index(index), text))
            .collect()
    }

    /// Insert a form, replacing the text of an existing tag in place.
    pub fn insert(&mut self, tag: impl Into<PluralTag>, text: impl Into<String>) {
        let tag = tag.into();
        let text = text.into();
        match self.forms.iter_mut().find(|(existing, _)| *existing == tag) {
            Some((_, slot)) => *slot = text,
            None => self.forms.push((tag, text)),
        }
    }

    /// Get the form for a tag.
    pub fn get(&self, tag: &str) -> Option<&str> {
        self.forms
            .iter()
            .find(|(existing, _)| existing.as_str() == tag)
            .map(|(_, text)| text.as_str())
    }

    /// The first defined form.
    pub fn first(&self) -> Option<&str> {
        self.forms.first().map(|(_, text)| text.as_str())
    }

    /// The last defined form.
    pub fn last(&self) -> Option<&str> {
        self.forms.last().map(|(_, text)| text.as_str())
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    /// Iterate over `(tag, text)` pairs in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&PluralTag, &str)> {
        self.forms.iter().map(|(tag, text)| (tag, text.as_str()))
    }
}

impl<T: Into<PluralTag>, S: Into<String>> FromIterator<(T, S)> for PluralForms {
    fn from_iter<I: IntoIterator<Item = (T, S)>>(iter: I) -> Self {
        let mut forms = PluralForms::new();
        for (tag, text) in iter {
            forms.insert(tag, text);
        }
        forms
    }
}

/// Context variants of a message, in definition order.
///
/// The empty tag `""` is the "no context" variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextForms {
    forms: Vec<(String, ContextMessage)>,
}

impl ContextForms {
    /// Create an empty set of context variants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variant, replacing an existing one with the same tag in place.
    pub fn insert(&mut self, context: impl Into<String>, message: impl Into<ContextMessage>) {
        let context = context.into();
        let message = message.into();
        match self.forms.iter_mut().find(|(existing, _)| *existing == context) {
            Some((_, slot)) => *slot = message,
            None => self.forms.push((context, message)),
        }
    }

    /// Get the variant for a context tag.
    pub fn get(&self, context: &str) -> Option<&ContextMessage> {
        self.forms
            .iter()
            .find(|(existing, _)| existing == context)
            .map(|(_, message)| message)
    }

    /// The first defined variant.
    pub fn first(&self) -> Option<&ContextMessage> {
        self.forms.first().map(|(_, message)| message)
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    /// Iterate over `(context, message)` pairs in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContextMessage)> {
        self.forms
            .iter()
            .map(|(context, message)| (context.as_str(), message))
    }
}

impl<C: Into<String>, M: Into<ContextMessage>> FromIterator<(C, M)> for ContextForms {
    fn from_iter<I: IntoIterator<Item = (C, M)>>(iter: I) -> Self {
        let mut forms = ContextForms::new();
        for (context, message) in iter {
            forms.insert(context, message);
        }
        forms
    }
}

// Serde plumbing

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum MessageRepr {
    Text(String),
    Context(ContextRepr),
    Plural(PluralForms),
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ContextRepr {
    #[serde(rename = "_context")]
    context: ContextForms,
}

impl From<MessageRepr> for Message {
    fn from(repr: MessageRepr) -> Self {
        match repr {
            MessageRepr::Text(text) => Message::Text(text),
            MessageRepr::Context(ContextRepr { context }) => Message::Context(context),
            MessageRepr::Plural(forms) => Message::Plural(forms),
        }
    }
}

impl From<Message> for MessageRepr {
    fn from(message: Message) -> Self {
        match message {
            Message::Text(text) => MessageRepr::Text(text),
            Message::Plural(forms) => MessageRepr::Plural(forms),
            Message::Context(context) => MessageRepr::Context(ContextRepr { context }),
        }
    }
}

impl Serialize for PluralForms {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.forms.len()))?;
        for (tag, text) in &self.forms {
            map.serialize_entry(tag, text)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PluralForms {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FormsVisitor;

        impl<'de> Visitor<'de> for FormsVisitor {
            type Value = PluralForms;

            fn expecting(&self, f: &mut Formatter<'_>) -> FmtResult {
                f.write_str("a list of plural forms or a map of plural tag to form")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<PluralForms, A::Error> {
                let mut forms = Vec::new();
                while let Some(text) = seq.next_element::<String>()? {
                    forms.push(text);
                }
                Ok(PluralForms::from_list(forms))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<PluralForms, A::Error> {
                let mut forms = PluralForms::new();
                while let Some((tag, text)) = map.next_entry::<String, String>()? {
                    forms.insert(tag, text);
                }
                Ok(forms)
            }
        }

        deserializer.deserialize_any(FormsVisitor)
    }
}

impl Serialize for ContextForms {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.forms.len()))?;
        for (context, message) in &self.forms {
            map.serialize_entry(context, message)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ContextForms {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ContextVisitor;

        impl<'de> Visitor<'de> for ContextVisitor {
            type Value = ContextForms;

            fn expecting(&self, f: &mut Formatter<'_>) -> FmtResult {
                f.write_str("a map of context tag to message")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<ContextForms, A::Error> {
                let mut forms = ContextForms::new();
                while let Some((context, message)) = map.next_entry::<String, ContextMessage>()? {
                    forms.insert(context, message);
                }
                Ok(forms)
            }
        }

        deserializer.deserialize_map(ContextVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_text_only_matches_plain_messages() {
        assert_eq!(Message::from("Hello").as_text(), Some("Hello"));
        assert_eq!(Message::from(PluralForms::from_list(["a", "b"])).as_text(), None);
        assert_eq!(Message::from(ContextForms::from_iter([("", "x")])).as_text(), None);
    }
}
