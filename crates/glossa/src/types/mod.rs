mod message;
mod plural_tag;
mod value;

pub use message::{ContextForms, ContextMessage, Message, PluralForms};
pub use plural_tag::PluralTag;
pub use value::Value;
