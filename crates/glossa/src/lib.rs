//! Message translation with fallback catalogs, contexts and plural forms.
//!
//! A [`Translator`] resolves a message key against its [`Catalog`], falling
//! back along a chain of translators for more general locales. The resolved
//! entry is narrowed by context (`_context`) and plural form (`_count`),
//! then rendered by a [`MessageFormatter`].

pub mod catalog;
pub mod error;
pub mod formatter;
pub mod parser;
pub mod plural;
mod resolve;
pub mod translator;
pub mod types;

pub use catalog::Catalog;
pub use error::{CatalogWarning, LocaleError};
pub use formatter::{MessageFormatter, PlaceholderFormatter};
pub use plural::{CldrPluralSelector, PluralSelector, TagStyle};
pub use resolve::{CONTEXT_KEY, COUNT_KEY, SINGULAR_KEY};
pub use translator::{MessageSource, Translator};
pub use types::{ContextForms, ContextMessage, Message, PluralForms, PluralTag, Value};

/// Creates a `HashMap<String, Value>` of translation variables.
///
/// Values are converted via `Into<Value>`, so you can pass integers, floats,
/// booleans, or strings directly.
///
/// # Example
///
/// ```
/// use glossa::vars;
///
/// let v = vars! { "_count" => 3, "name" => "Alice" };
/// assert_eq!(v.len(), 2);
/// assert_eq!(v["_count"].as_number(), Some(3));
/// assert_eq!(v["name"].as_string(), Some("Alice"));
/// ```
#[macro_export]
macro_rules! vars {
    {} => {
        ::std::collections::HashMap::<String, $crate::Value>::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = ::std::collections::HashMap::<String, $crate::Value>::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            map
        }
    };
}
