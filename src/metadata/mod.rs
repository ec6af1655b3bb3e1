//! Align metadata parsing
//!
//! Two incompatible XML layouts exist. The file name prefix selects one
//! [`MetadataSchema`], and its field table drives the parse.

mod parser;
mod record;
mod schema;
mod xml;
#[cfg(test)]
mod tests;

pub use parser::MetadataParser;
pub use record::{MetadataRecord, SchemaExtras};
pub use schema::{FieldKind, FieldSpec, MetadataSchema, SETTING_KEYS};
