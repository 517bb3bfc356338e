//! Frontmatter extraction.
//!
//! A [`DocumentParser`] turns raw text into a metadata mapping plus the
//! remaining body. The default [`FrontmatterParser`] reads a YAML block
//! fenced by `---` lines at the very start of the text:
//!
//! ```text
//! ---
//! title: Post One
//! date: 2023-01-01
//! ---
//! Body text starts here.
//! ```
//!
//! Text that does not open with the delimiter has no metadata; the whole
//! text is the body.

use fusion_query::{Number, Value};

use crate::document::Metadata;
use crate::error::ParseError;

/// Metadata and body split out of raw text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDocument {
    pub metadata: Metadata,
    pub content: String,
}

/// Splits raw document text into metadata and body.
pub trait DocumentParser: Send + Sync {
    /// Parses `raw`. A malformed metadata block is an error; a missing one
    /// is not.
    fn parse(&self, raw: &str) -> Result<ParsedDocument, ParseError>;
}

/// YAML frontmatter parser.
#[derive(Debug, Clone)]
pub struct FrontmatterParser {
    delimiter: String,
}

impl Default for FrontmatterParser {
    fn default() -> Self {
        Self {
            delimiter: "---".to_string(),
        }
    }
}

impl FrontmatterParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `delimiter` instead of `---` to fence the metadata block.
    pub fn with_delimiter(delimiter: impl Into<String>) -> Self {
        Self {
            delimiter: delimiter.into(),
        }
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    fn is_delimiter(&self, line: &str) -> bool {
        line.trim_end() == self.delimiter
    }
}

impl DocumentParser for FrontmatterParser {
    fn parse(&self, raw: &str) -> Result<ParsedDocument, ParseError> {
        let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);

        let mut lines = text.split_inclusive('\n');
        let opened = lines.next().is_some_and(|first| self.is_delimiter(first));
        if !opened {
            return Ok(ParsedDocument {
                metadata: Metadata::new(),
                content: text.to_string(),
            });
        }

        // Byte offsets into `text`: start of the block, then scan for the
        // closing delimiter line.
        let block_start = text.find('\n').map_or(text.len(), |i| i + 1);
        let mut offset = block_start;
        let mut block_end = None;
        for line in lines {
            if self.is_delimiter(line) {
                block_end = Some((offset, offset + line.len()));
                break;
            }
            offset += line.len();
        }

        let (end, body_start) =
            block_end.ok_or_else(|| ParseError::Unterminated(self.delimiter.clone()))?;

        Ok(ParsedDocument {
            metadata: parse_metadata(&text[block_start..end])?,
            content: text[body_start..].to_string(),
        })
    }
}

/// Parses a YAML block into metadata. An empty block is an empty mapping.
pub fn parse_metadata(block: &str) -> Result<Metadata, ParseError> {
    if block.trim().is_empty() {
        return Ok(Metadata::new());
    }

    match serde_yaml::from_str::<serde_yaml::Value>(block)? {
        serde_yaml::Value::Null => Ok(Metadata::new()),
        serde_yaml::Value::Mapping(mapping) => convert_mapping(mapping),
        serde_yaml::Value::Tagged(tagged) => match tagged.value {
            serde_yaml::Value::Mapping(mapping) => convert_mapping(mapping),
            other => Err(ParseError::NotAMapping(yaml_kind(&other))),
        },
        other => Err(ParseError::NotAMapping(yaml_kind(&other))),
    }
}

/// Converts a YAML value into a [`Value`]. Tags are dropped.
pub fn yaml_to_value(value: serde_yaml::Value) -> Result<Value, ParseError> {
    Ok(match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => Value::Number(convert_number(&n)),
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(seq) => Value::Sequence(
            seq.into_iter()
                .map(yaml_to_value)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        serde_yaml::Value::Mapping(mapping) => Value::Mapping(convert_mapping(mapping)?),
        serde_yaml::Value::Tagged(tagged) => yaml_to_value(tagged.value)?,
    })
}

fn convert_mapping(mapping: serde_yaml::Mapping) -> Result<Metadata, ParseError> {
    mapping
        .into_iter()
        .map(|(key, value)| -> Result<(String, Value), ParseError> {
            Ok((convert_key(key)?, yaml_to_value(value)?))
        })
        .collect()
}

fn convert_key(key: serde_yaml::Value) -> Result<String, ParseError> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        other => Err(ParseError::InvalidKey(yaml_kind(&other).to_string())),
    }
}

fn convert_number(n: &serde_yaml::Number) -> Number {
    if let Some(i) = n.as_i64() {
        Number::I64(i)
    } else if let Some(u) = n.as_u64() {
        Number::U64(u)
    } else {
        Number::F64(n.as_f64().unwrap_or(f64::NAN))
    }
}

fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "bool",
        serde_yaml::Value::Number(_) => "number",
        serde_yaml::Value::String(_) => "string",
        serde_yaml::Value::Sequence(_) => "sequence",
        serde_yaml::Value::Mapping(_) => "mapping",
        serde_yaml::Value::Tagged(_) => "tagged value",
    }
}
