//! Plural form selection.
//!
//! The translator does not implement plural arithmetic. It asks a
//! [`PluralSelector`] for the tag of the form to use and looks that tag up in
//! the message's plural forms. [`CldrPluralSelector`] is the stock selector,
//! backed by the CLDR cardinal rules shipped with `icu_plurals`.
//!
//! Plural rules are cached per thread per locale to avoid re-creating
//! `PluralRules` instances on every call. The cache is initialized lazily
//! on first access within each thread.

use std::cell::RefCell;

use icu_locale_core::{Locale, locale};
use icu_plurals::{PluralCategory, PluralRuleType, PluralRules};

use crate::error::LocaleError;
use crate::types::PluralTag;

/// Chooses the plural form tag for a count in a locale.
///
/// Implementations must be total and deterministic: every `(locale, count)`
/// yields some tag, always the same one.
pub trait PluralSelector: Send + Sync {
    fn select(&self, locale: &str, count: i64) -> PluralTag;
}

impl<F> PluralSelector for F
where
    F: Fn(&str, i64) -> PluralTag + Send + Sync,
{
    fn select(&self, locale: &str, count: i64) -> PluralTag {
        self(locale, count)
    }
}

/// How [`CldrPluralSelector`] names the form it selects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TagStyle {
    /// Position of the category among the locale's categories, with `one`
    /// first and the rest in CLDR order (zero, two, few, many, other).
    /// English yields `"0"` for one and `"1"` for other; Latvian yields `"0"`
    /// for one, `"1"` for zero and `"2"` for other. Slot 0 is always the
    /// singular, matching catalogs that list forms singular first.
    #[default]
    Index,

    /// The CLDR category name, e.g. `"one"` or `"few"`.
    Category,
}

/// Plural selector backed by CLDR cardinal rules.
///
/// Locale identifiers may use `_` or `-` separators and may carry a
/// `.charset` or `@modifier` suffix, which is ignored. Identifiers that do
/// not parse fall back to English rules.
///
/// # Example
///
/// ```
/// use glossa::plural::{CldrPluralSelector, PluralSelector, TagStyle};
///
/// let by_index = CldrPluralSelector::default();
/// assert_eq!(by_index.select("en_US", 1).as_str(), "0");
/// assert_eq!(by_index.select("en_US", 7).as_str(), "1");
///
/// let by_name = CldrPluralSelector::new(TagStyle::Category);
/// assert_eq!(by_name.select("ru", 3).as_str(), "few");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CldrPluralSelector {
    style: TagStyle,
}

impl CldrPluralSelector {
    pub fn new(style: TagStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> TagStyle {
        self.style
    }

    /// Check that a locale identifier parses, without selecting anything.
    pub fn validate_locale(locale: &str) -> Result<(), LocaleError> {
        parse_locale(locale).map(|_| ())
    }
}

impl PluralSelector for CldrPluralSelector {
    fn select(&self, locale: &str, count: i64) -> PluralTag {
        with_rules(locale, |rules| {
            let Some(rules) = rules else {
                return match self.style {
                    TagStyle::Index => PluralTag::index(0),
                    TagStyle::Category => PluralTag::new("other"),
                };
            };
            let category = rules.category_for(count);
            match self.style {
                TagStyle::Category => PluralTag::new(category_str(category)),
                TagStyle::Index => PluralTag::index(slot_of(rules, category)),
            }
        })
    }
}

/// Slot of `category` with `one` moved to the front of the locale's categories.
fn slot_of(rules: &PluralRules, category: PluralCategory) -> usize {
    let has_one = rules.categories().any(|candidate| candidate == PluralCategory::One);
    if category == PluralCategory::One {
        return 0;
    }
    let offset = usize::from(has_one);
    rules
        .categories()
        .filter(|candidate| *candidate != PluralCategory::One)
        .position(|candidate| candidate == category)
        .map_or(0, |position| position + offset)
}

thread_local! {
    /// Per-thread cache of `PluralRules` keyed by the caller's locale string.
    static PLURAL_RULES_CACHE: RefCell<Vec<(String, Option<PluralRules>)>> = const { RefCell::new(Vec::new()) };
}

/// Get CLDR plural category for a number in a given locale.
///
/// Returns one of: "zero", "one", "two", "few", "many", "other".
///
/// # Examples
///
/// ```
/// use glossa::plural::plural_category;
///
/// assert_eq!(plural_category("en", 1), "one");
/// assert_eq!(plural_category("en", 2), "other");
/// assert_eq!(plural_category("ru", 5), "many");
/// ```
pub fn plural_category(locale: &str, n: i64) -> &'static str {
    with_rules(locale, |rules| {
        rules.map_or("other", |rules| category_str(rules.category_for(n)))
    })
}

fn with_rules<T>(locale: &str, f: impl FnOnce(Option<&PluralRules>) -> T) -> T {
    PLURAL_RULES_CACHE.with_borrow_mut(|cache| {
        if let Some(index) = cache.iter().position(|(code, _)| code == locale) {
            return f(cache[index].1.as_ref());
        }
        cache.push((locale.to_string(), build_rules(locale)));
        f(cache.last().and_then(|(_, rules)| rules.as_ref()))
    })
}

/// Build cardinal `PluralRules` for a locale identifier.
fn build_rules(locale: &str) -> Option<PluralRules> {
    let parsed = parse_locale(locale).unwrap_or_else(|error| {
        tracing::warn!(%error, "falling back to English plural rules");
        locale!("en")
    });
    PluralRules::try_new(parsed.into(), PluralRuleType::Cardinal.into())
        .or_else(|error| {
            tracing::warn!(%locale, %error, "no plural rules, falling back to English");
            PluralRules::try_new(locale!("en").into(), PluralRuleType::Cardinal.into())
        })
        .ok()
}

fn parse_locale(locale: &str) -> Result<Locale, LocaleError> {
    let normalized = locale
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .replace('_', "-");
    Locale::try_from_str(&normalized).map_err(|e| LocaleError {
        locale: locale.to_string(),
        message: e.to_string(),
    })
}

/// Translate a `PluralCategory` enum to its string representation.
fn category_str(category: PluralCategory) -> &'static str {
    match category {
        PluralCategory::Zero => "zero",
        PluralCategory::One => "one",
        PluralCategory::Two => "two",
        PluralCategory::Few => "few",
        PluralCategory::Many => "many",
        PluralCategory::Other => "other",
    }
}
