//! Template string parser using winnow.
//!
//! Parses message templates into an AST. Handles:
//! - Literal text segments
//! - Placeholders `{name}`, with optional inner whitespace
//! - Escape sequences: {{ }}

use winnow::combinator::{alt, delimited, repeat};
use winnow::prelude::*;
use winnow::token::take_while;

use super::ast::{Segment, Template};
use super::error::ParseError;

/// Parse a template string into an AST.
///
/// ```
/// use glossa::parser::{Segment, parse_template};
///
/// let template = parse_template("Hello, {name}!").unwrap();
/// assert_eq!(
///     template.segments,
///     vec![
///         Segment::Literal("Hello, ".into()),
///         Segment::Placeholder("name".into()),
///         Segment::Literal("!".into()),
///     ]
/// );
/// ```
pub fn parse_template(input: &str) -> Result<Template, ParseError> {
    let mut remaining = input;
    match template(&mut remaining) {
        Ok(t) if remaining.is_empty() => Ok(t),
        Ok(_) => {
            let (line, column) = calculate_position(input, remaining);
            Err(ParseError::Syntax {
                line,
                column,
                message: format!(
                    "unexpected character: '{}'",
                    remaining.chars().next().unwrap_or('?')
                ),
            })
        }
        Err(e) => {
            let (line, column) = calculate_position(input, remaining);
            Err(ParseError::Syntax {
                line,
                column,
                message: format!("parse error: {e}"),
            })
        }
    }
}

/// Calculate line and column from original input and remaining input.
fn calculate_position(original: &str, remaining: &str) -> (usize, usize) {
    let consumed = original.len() - remaining.len();
    let consumed_str = &original[..consumed];
    let line = consumed_str.chars().filter(|&c| c == '\n').count() + 1;
    let column = match consumed_str.rfind('\n') {
        Some(pos) => consumed - pos,
        None => consumed + 1,
    };
    (line, column)
}

/// Parse a complete template into segments.
fn template(input: &mut &str) -> ModalResult<Template> {
    let segments: Vec<Segment> = repeat(0.., segment).parse_next(input)?;
    Ok(Template {
        segments: merge_literals(segments),
    })
}

/// Merge adjacent Literal segments into single segments.
fn merge_literals(segments: Vec<Segment>) -> Vec<Segment> {
    let mut result = Vec::with_capacity(segments.len());

    for segment in segments {
        match segment {
            Segment::Literal(text) => {
                if let Some(Segment::Literal(prev)) = result.last_mut() {
                    prev.push_str(&text);
                } else {
                    result.push(Segment::Literal(text));
                }
            }
            other @ Segment::Placeholder(_) => result.push(other),
        }
    }

    result
}

/// Parse a single segment (escape, placeholder, or literal).
fn segment(input: &mut &str) -> ModalResult<Segment> {
    alt((escape_sequence, placeholder, literal_run)).parse_next(input)
}

/// Parse escape sequences: {{ -> {, }} -> }
fn escape_sequence(input: &mut &str) -> ModalResult<Segment> {
    alt((
        "{{".value(Segment::Literal("{".to_string())),
        "}}".value(Segment::Literal("}".to_string())),
    ))
    .parse_next(input)
}

/// Parse a run of literal characters (not { or }).
fn literal_run(input: &mut &str) -> ModalResult<Segment> {
    take_while(1.., |c: char| c != '{' && c != '}')
        .map(|s: &str| Segment::Literal(s.to_string()))
        .parse_next(input)
}

/// Parse a placeholder: { name }
fn placeholder(input: &mut &str) -> ModalResult<Segment> {
    delimited(('{', ws), identifier, (ws, '}'))
        .map(|name: &str| Segment::Placeholder(name.to_string()))
        .parse_next(input)
}

/// Parse optional whitespace.
fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_ascii_whitespace())
        .void()
        .parse_next(input)
}

/// Parse a placeholder name (alphanumeric with underscores).
fn identifier<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_').parse_next(input)
}
