//! AST types for placeholder templates.

/// A parsed template, a sequence of segments.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Template {
    pub segments: Vec<Segment>,
}

impl Template {
    /// Names of all placeholders, in order of appearance, with repeats.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }
}

/// A segment of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, with escapes already resolved.
    Literal(String),

    /// A `{name}` placeholder, holding the variable name.
    Placeholder(String),
}
