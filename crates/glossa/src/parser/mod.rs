//! Placeholder template parser.
//!
//! Message templates are literal text with `{name}` placeholders. This module
//! parses them into an AST that the placeholder formatter walks.

pub mod ast;
pub mod error;
mod template;

pub use ast::{Segment, Template};
pub use error::ParseError;
pub use template::parse_template;
