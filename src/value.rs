//! The parsed value tree. Strings borrow directly from the source text, with escape sequences
//! left exactly as they were written.
use std::fmt::{Display, Formatter};

use crate::table::PropertyTable;
use crate::vector::ElementVector;

/// Basic enumeration of different Json values
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue<'a> {
    /// Raw string contents, without the surrounding quotes
    String(&'a str),
    /// Map of values
    Object(PropertyTable<'a>),
    /// Array of values
    Array(ElementVector<'a>),
    /// Canonical boolean value
    Boolean(bool),
    /// Canonical null value
    Null,
    /// Floating point numeric value
    Number(f64),
}

impl<'a> JsonValue<'a> {
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            JsonValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&PropertyTable<'a>> {
        match self {
            JsonValue::Object(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ElementVector<'a>> {
        match self {
            JsonValue::Array(vector) => Some(vector),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    /// Look up a property, if this is an object
    pub fn get(&self, key: &str) -> Option<&JsonValue<'a>> {
        self.as_object().and_then(|table| table.get(key))
    }

    /// Look up an element, if this is an array
    pub fn index(&self, index: usize) -> Option<&JsonValue<'a>> {
        self.as_array().and_then(|vector| vector.get(index))
    }

    /// Short name of the value's type
    pub fn type_name(&self) -> &'static str {
        match self {
            JsonValue::String(_) => "string",
            JsonValue::Object(_) => "object",
            JsonValue::Array(_) => "array",
            JsonValue::Boolean(_) => "boolean",
            JsonValue::Null => "null",
            JsonValue::Number(_) => "number",
        }
    }

    /// An adaptor which renders the tree as an indented outline, one value per line
    pub fn tree(&self) -> TreeDisplay<'_, 'a> {
        TreeDisplay(self)
    }
}

/// See [JsonValue::tree]
pub struct TreeDisplay<'v, 'a>(&'v JsonValue<'a>);

impl TreeDisplay<'_, '_> {
    fn write_value(f: &mut Formatter<'_>, value: &JsonValue, depth: usize) -> std::fmt::Result {
        match value {
            JsonValue::String(s) => writeln!(f, "string \"{s}\""),
            JsonValue::Boolean(b) => writeln!(f, "boolean {b}"),
            JsonValue::Null => writeln!(f, "null"),
            JsonValue::Number(n) => writeln!(f, "number {n}"),
            JsonValue::Object(table) => {
                writeln!(f, "object ({} properties)", table.len())?;
                for property in table.iter() {
                    write!(f, "{:indent$}\"{}\": ", "", property.key, indent = (depth + 1) * 2)?;
                    Self::write_value(f, &property.value, depth + 1)?;
                }
                Ok(())
            }
            JsonValue::Array(vector) => {
                writeln!(f, "array ({} elements)", vector.len())?;
                for element in vector {
                    write!(f, "{:indent$}- ", "", indent = (depth + 1) * 2)?;
                    Self::write_value(f, element, depth + 1)?;
                }
                Ok(())
            }
        }
    }
}

impl Display for TreeDisplay<'_, '_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Self::write_value(f, self.0, 0)
    }
}
