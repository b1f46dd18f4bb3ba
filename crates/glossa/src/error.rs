//! Error and warning types for glossa.
//!
//! Translation itself never fails. These types cover the edges where a
//! caller can ask for an explicit verdict: locale identifiers and catalog
//! audits.

use thiserror::Error;

/// A locale identifier that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid locale '{locale}': {message}")]
pub struct LocaleError {
    pub locale: String,
    pub message: String,
}

/// A problem found when auditing a translated catalog against its source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogWarning {
    /// The translation defines a key the source catalog does not have.
    #[error("'{key}' in '{locale}' is not defined in the source catalog")]
    UnknownKey { key: String, locale: String },

    /// The translation and the source disagree on the entry shape.
    #[error("'{key}' in '{locale}' is {found} but the source entry is {expected}")]
    ShapeMismatch {
        key: String,
        locale: String,
        expected: &'static str,
        found: &'static str,
    },

    /// The translation maps a key to nothing displayable.
    #[error("'{key}' in '{locale}' is empty")]
    EmptyMessage { key: String, locale: String },
}
