//! The value tree produced by the tree-building writer.
//!
//! [`Value`] is a tagged union over every kind the document format defines;
//! [`Document`] is the insertion-ordered mapping that serves as the format's
//! primary container type.

use alloc::{string::String, vec::Vec};
use core::fmt;

use crate::types::{Binary, CodeWithScope, DbPointer, ObjectId, RegularExpression, Timestamp};

/// An ordered sequence of values.
pub type Array = Vec<Value>;

/// An ordered mapping from unique field names to values.
///
/// Field order is the order in which names were *first* inserted; inserting an
/// existing name replaces its value in place (last write wins). Documents in
/// this format are small, so lookups are a linear scan over the entries.
///
/// # Examples
///
/// ```
/// use bsonwrite::{Document, Value};
///
/// let mut doc = Document::new();
/// doc.insert("a", 1);
/// doc.insert("b", "two");
/// doc.insert("a", 3);
/// assert_eq!(doc.get("a"), Some(&Value::Int32(3)));
/// assert_eq!(doc.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    entries: Vec<(String, Value)>,
}

impl Document {
    /// An empty document.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts a field, replacing and returning the previous value if the
    /// name was already present. A replaced field keeps its original
    /// position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => Some(core::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// The value of the named field, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Whether the named field is present.
    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Removes the named field, returning its value if it was present.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let index = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the document has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut document = Self::new();
        for (name, value) in iter {
            document.insert(name, value);
        }
        document
    }
}

impl IntoIterator for Document {
    type Item = (String, Value);
    type IntoIter = alloc::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// A single value in a document tree.
///
/// Containers (`Document`, `Array`) are mutable only while some open writer
/// context holds them; once appended to their parent they are logically
/// immutable from the writer's perspective.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 64-bit floating point number.
    Double(f64),
    /// A UTF-8 string.
    String(String),
    /// An embedded document.
    Document(Document),
    /// An array of values.
    Array(Array),
    /// A binary payload with a subtype tag.
    Binary(Binary),
    /// The deprecated undefined value.
    Undefined,
    /// A 12-byte object id.
    ObjectId(ObjectId),
    /// A boolean.
    Boolean(bool),
    /// A UTC datetime, as milliseconds since the Unix epoch.
    DateTime(i64),
    /// The null value.
    Null,
    /// A regular expression.
    RegularExpression(RegularExpression),
    /// A deprecated pointer into another namespace.
    DbPointer(DbPointer),
    /// A code string.
    JavaScriptCode(String),
    /// A deprecated symbol.
    Symbol(String),
    /// A code string paired with a scope document.
    JavaScriptCodeWithScope(CodeWithScope),
    /// A 32-bit signed integer.
    Int32(i32),
    /// An internal timestamp.
    Timestamp(Timestamp),
    /// A 64-bit signed integer.
    Int64(i64),
    /// The minimum key, sorting before every other value.
    MinKey,
    /// The maximum key, sorting after every other value.
    MaxKey,
}

impl Value {
    /// Returns `true` if the value is [`Null`](Value::Null).
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The embedded document, if this value is one.
    #[must_use]
    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Self::Document(document) => Some(document),
            _ => None,
        }
    }

    /// The array, if this value is one.
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    /// The string contents, if this value is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The boolean, if this value is one.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer, if this value is a 32-bit integer.
    #[must_use]
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Int32(i) => Some(*i),
            _ => None,
        }
    }

    /// The integer, if this value is a 64-bit integer.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int64(i) => Some(*i),
            _ => None,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Document> for Value {
    fn from(v: Document) -> Self {
        Self::Document(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::Array(v.into_iter().map(Into::into).collect())
    }
}

impl From<Binary> for Value {
    fn from(v: Binary) -> Self {
        Self::Binary(v)
    }
}

impl From<ObjectId> for Value {
    fn from(v: ObjectId) -> Self {
        Self::ObjectId(v)
    }
}

impl From<RegularExpression> for Value {
    fn from(v: RegularExpression) -> Self {
        Self::RegularExpression(v)
    }
}

impl From<Timestamp> for Value {
    fn from(v: Timestamp) -> Self {
        Self::Timestamp(v)
    }
}

impl From<DbPointer> for Value {
    fn from(v: DbPointer) -> Self {
        Self::DbPointer(v)
    }
}

impl From<CodeWithScope> for Value {
    fn from(v: CodeWithScope) -> Self {
        Self::JavaScriptCodeWithScope(v)
    }
}

/// Escapes a string for inclusion in the diagnostic rendering.
///
/// Quotes, backslashes, and control characters are replaced with their JSON
/// escape sequences.
pub(crate) fn write_escaped<W: fmt::Write>(src: &str, f: &mut W) -> fmt::Result {
    for c in src.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c.is_ascii_control() => write!(f, "\\u{:04X}", c as u32)?,
            _ => f.write_char(c)?,
        }
    }
    Ok(())
}

fn write_quoted<W: fmt::Write>(src: &str, f: &mut W) -> fmt::Result {
    f.write_str("\"")?;
    write_escaped(src, f)?;
    f.write_str("\"")
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        let mut first = true;
        for (name, value) in self.iter() {
            if !first {
                f.write_str(",")?;
            }
            first = false;
            write_quoted(name, f)?;
            write!(f, ":{value}")?;
        }
        f.write_str("}")
    }
}

/// Renders the value in a relaxed, extended-JSON-like form.
///
/// This is a human-oriented diagnostic rendering, not a wire format: numbers
/// print bare, and byte payloads print as hex.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Double(v) => write!(f, "{v}"),
            Value::String(v) => write_quoted(v, f),
            Value::Document(v) => v.fmt(f),
            Value::Array(v) => {
                f.write_str("[")?;
                let mut first = true;
                for item in v {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    item.fmt(f)?;
                }
                f.write_str("]")
            }
            Value::Binary(v) => {
                write!(f, "{{\"$binary\":\"")?;
                for byte in &v.bytes {
                    write!(f, "{byte:02x}")?;
                }
                write!(f, "\",\"$type\":\"{:02x}\"}}", u8::from(v.subtype))
            }
            Value::Undefined => f.write_str("{\"$undefined\":true}"),
            Value::ObjectId(v) => write!(f, "{{\"$oid\":\"{v}\"}}"),
            Value::Boolean(v) => f.write_str(if *v { "true" } else { "false" }),
            Value::DateTime(v) => write!(f, "{{\"$date\":{v}}}"),
            Value::Null => f.write_str("null"),
            Value::RegularExpression(v) => {
                f.write_str("{\"$regex\":")?;
                write_quoted(&v.pattern, f)?;
                f.write_str(",\"$options\":")?;
                write_quoted(&v.options, f)?;
                f.write_str("}")
            }
            Value::DbPointer(v) => {
                f.write_str("{\"$dbPointer\":{\"$ref\":")?;
                write_quoted(&v.namespace, f)?;
                write!(f, ",\"$id\":{{\"$oid\":\"{}\"}}}}}}", v.id)
            }
            Value::JavaScriptCode(v) => {
                f.write_str("{\"$code\":")?;
                write_quoted(v, f)?;
                f.write_str("}")
            }
            Value::Symbol(v) => {
                f.write_str("{\"$symbol\":")?;
                write_quoted(v, f)?;
                f.write_str("}")
            }
            Value::JavaScriptCodeWithScope(v) => {
                f.write_str("{\"$code\":")?;
                write_quoted(&v.code, f)?;
                write!(f, ",\"$scope\":{}}}", v.scope)
            }
            Value::Int32(v) => write!(f, "{v}"),
            Value::Timestamp(v) => {
                write!(f, "{{\"$timestamp\":{{\"t\":{},\"i\":{}}}}}", v.time, v.increment)
            }
            Value::Int64(v) => write!(f, "{v}"),
            Value::MinKey => f.write_str("{\"$minKey\":1}"),
            Value::MaxKey => f.write_str("{\"$maxKey\":1}"),
        }
    }
}
