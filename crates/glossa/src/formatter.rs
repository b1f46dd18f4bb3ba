//! Placeholder substitution for resolved message templates.
//!
//! The translator hands the final template and the caller's variables to a
//! [`MessageFormatter`]. [`PlaceholderFormatter`] is the stock implementation:
//! it replaces `{name}` with the variable `name`, so `{_count}` and positional
//! `{0}` work too.

use std::collections::HashMap;

use crate::parser::{Segment, parse_template};
use crate::types::Value;

/// Renders a resolved template with variables.
///
/// Implementations must be total and must not depend on anything beyond
/// their arguments; the variables are borrowed immutably.
pub trait MessageFormatter: Send + Sync {
    fn format(&self, locale: &str, template: &str, variables: &HashMap<String, Value>) -> String;
}

impl<F> MessageFormatter for F
where
    F: Fn(&str, &str, &HashMap<String, Value>) -> String + Send + Sync,
{
    fn format(&self, locale: &str, template: &str, variables: &HashMap<String, Value>) -> String {
        self(locale, template, variables)
    }
}

/// Formatter replacing `{name}` placeholders with variable values.
///
/// - `{{` and `}}` produce literal braces.
/// - A placeholder with no matching variable is kept as written.
/// - A template that does not parse is returned unchanged.
///
/// # Example
///
/// ```
/// use glossa::{PlaceholderFormatter, vars};
/// use glossa::formatter::MessageFormatter;
///
/// let formatter = PlaceholderFormatter;
/// let out = formatter.format("en", "{name} has {_count} items", &vars! {
///     "name" => "Alice",
///     "_count" => 3,
/// });
/// assert_eq!(out, "Alice has 3 items");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderFormatter;

impl MessageFormatter for PlaceholderFormatter {
    fn format(&self, locale: &str, template: &str, variables: &HashMap<String, Value>) -> String {
        let parsed = match parse_template(template) {
            Ok(parsed) => parsed,
            Err(error) => {
                tracing::warn!(%locale, %template, %error, "leaving unparseable template as-is");
                return template.to_string();
            }
        };

        let mut output = String::with_capacity(template.len());
        for segment in &parsed.segments {
            match segment {
                Segment::Literal(text) => output.push_str(text),
                Segment::Placeholder(name) => match variables.get(name) {
                    Some(value) => output.push_str(&value.to_string()),
                    None => {
                        output.push('{');
                        output.push_str(name);
                        output.push('}');
                    }
                },
            }
        }
        output
    }
}
