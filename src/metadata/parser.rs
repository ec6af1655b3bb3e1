//! Align file parsing

use std::collections::HashMap;
use std::fs;

use log::{debug, trace};

use crate::config::NamingConfig;
use crate::errors::{ReferenceError, ReferenceResult};
use crate::matching::FileHandle;
use super::record::{MetadataRecord, SchemaExtras};
use super::schema::{FieldKind, FieldSpec, MetadataSchema, CENTER, FOCUS, ROTATION, SETTINGS, SIZE};
use super::xml;

/// Value read from one field node
#[derive(Debug, Clone, PartialEq)]
enum FieldValue {
    Scalar(f64),
    Pair(f64, f64),
    Settings(Vec<f64>),
}

/// Parses Align files into [`MetadataRecord`]s, dispatching on file name
#[derive(Debug, Clone)]
pub struct MetadataParser {
    naming: NamingConfig,
}

impl MetadataParser {
    pub fn new(naming: NamingConfig) -> Self {
        MetadataParser { naming }
    }

    /// Schema a metadata file name selects
    pub fn classify(&self, file_name: &str) -> MetadataSchema {
        MetadataSchema::classify(file_name, &self.naming)
    }

    /// Parse a metadata file
    ///
    /// The schema is decided from the name before the file is opened, so an
    /// unknown prefix never touches the disk.
    pub fn parse(&self, file: &FileHandle) -> ReferenceResult<MetadataRecord> {
        let schema = self.classify(file.name());
        if schema == MetadataSchema::Unknown {
            return Err(ReferenceError::UnrecognizedSchema(file.name().to_string()));
        }

        debug!("Reading {} as {} metadata", file.name(), schema);
        let bytes = fs::read(file.path())?;
        let content = String::from_utf8(bytes).map_err(|e| parse_error(file.name(), format!(
            "not valid UTF-8: {}", e)))?;

        Self::parse_document(schema, file.name(), &content)
    }

    /// Parse document text already known to follow `schema`
    pub fn parse_document(
        schema: MetadataSchema,
        file_name: &str,
        content: &str,
    ) -> ReferenceResult<MetadataRecord> {
        if schema == MetadataSchema::Unknown {
            return Err(ReferenceError::UnrecognizedSchema(file_name.to_string()));
        }

        let texts = xml::field_node_texts(content).map_err(|e| parse_error(file_name, e))?;
        let values = read_fields(schema.fields(), &texts).map_err(|e| parse_error(file_name, e))?;

        let scalar = |name: &str| match values.get(name) {
            Some(FieldValue::Scalar(v)) => Ok(*v),
            _ => Err(parse_error(file_name, format!("field '{}' is not a number", name))),
        };
        let pair = |name: &str| match values.get(name) {
            Some(FieldValue::Pair(x, y)) => Ok((*x, *y)),
            _ => Err(parse_error(file_name, format!("field '{}' is not a pair", name))),
        };

        let (center_x, center_y) = pair(CENTER)?;
        let (size_x, size_y) = pair(SIZE)?;

        let extras = match schema {
            MetadataSchema::Composite => SchemaExtras::Composite { focus: scalar(FOCUS)? },
            MetadataSchema::SingleScan => match values.get(SETTINGS) {
                Some(FieldValue::Settings(s)) if s.len() >= 4 => SchemaExtras::SingleScan {
                    brightness: s[0],
                    contrast: s[1],
                    autoexposure: s[2],
                    exposure_time: s[3],
                },
                _ => return Err(parse_error(file_name, "settings block is incomplete".to_string())),
            },
            MetadataSchema::Unknown => {
                return Err(ReferenceError::UnrecognizedSchema(file_name.to_string()))
            },
        };

        let record = MetadataRecord {
            rotation: scalar(ROTATION)?,
            center_x,
            center_y,
            size_x,
            size_y,
            extras,
        };
        trace!("{} -> {:?}", file_name, record);
        Ok(record)
    }
}

fn parse_error(file_name: &str, reason: String) -> ReferenceError {
    ReferenceError::MetadataParseError {
        file: file_name.to_string(),
        reason,
    }
}

/// Read every field of a table, failing on the first missing or bad node
fn read_fields(
    specs: &[FieldSpec],
    texts: &[Option<String>],
) -> Result<HashMap<&'static str, FieldValue>, String> {
    let mut values = HashMap::new();

    for spec in specs {
        let text = match texts.get(spec.node) {
            None => {
                return Err(format!(
                    "missing field '{}' (child node {}, document has {})",
                    spec.name, spec.node, texts.len()
                ))
            },
            Some(None) => {
                return Err(format!("field '{}' (child node {}) has no text", spec.name, spec.node))
            },
            Some(Some(text)) => text.as_str(),
        };

        let value = match spec.kind {
            FieldKind::Scalar => FieldValue::Scalar(number(spec.name, text)?),
            FieldKind::Pair => {
                let mut parts = text.split(',');
                match (parts.next(), parts.next()) {
                    (Some(x), Some(y)) => FieldValue::Pair(number(spec.name, x)?, number(spec.name, y)?),
                    _ => return Err(format!("field '{}' expected 'x,y' but found '{}'", spec.name, text)),
                }
            },
            FieldKind::Settings(keys) => {
                let entries: Vec<&str> = text.split(';').collect();
                let mut settings = Vec::with_capacity(keys.len());
                for (position, key) in keys.iter().enumerate() {
                    let raw = entries
                        .get(position)
                        .and_then(|entry| entry.split('=').nth(1))
                        .ok_or_else(|| format!(
                            "setting '{}' (position {}) missing in '{}'", key, position, text))?;
                    settings.push(number(key, raw)?);
                }
                FieldValue::Settings(settings)
            },
        };

        values.insert(spec.name, value);
    }

    Ok(values)
}

fn number(name: &str, text: &str) -> Result<f64, String> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| format!("field '{}' is not numeric: '{}'", name, text))
}
