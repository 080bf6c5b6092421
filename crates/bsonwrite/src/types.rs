//! Extended scalar types carried by the value tree.
//!
//! These are the kinds the document format defines beyond what Rust's
//! primitives cover: object ids, tagged binary payloads, regular expressions,
//! internal timestamps, deprecated pointers, and code paired with a scope
//! document.

use alloc::{string::String, vec::Vec};
use core::{fmt, str::FromStr};

use thiserror::Error;

use crate::value::Document;

/// A 12-byte document object identifier.
///
/// The writer treats the id as opaque bytes; generating fresh ids is the
/// driver layer's job.
///
/// # Examples
///
/// ```
/// use bsonwrite::ObjectId;
///
/// let id: ObjectId = "507f1f77bcf86cd799439011".parse().unwrap();
/// assert_eq!(id.to_string(), "507f1f77bcf86cd799439011");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    /// Wraps 12 raw bytes as an object id.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    /// The raw bytes of the id.
    #[must_use]
    pub const fn bytes(&self) -> [u8; 12] {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId(\"{self}\")")
    }
}

/// Error returned when parsing an [`ObjectId`] from a hex string fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("an object id is 24 hexadecimal characters")]
pub struct ParseObjectIdError;

impl FromStr for ObjectId {
    type Err = ParseObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 24 || !s.is_ascii() {
            return Err(ParseObjectIdError);
        }
        let mut bytes = [0u8; 12];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&s[2 * i..2 * i + 2], 16)
                .map_err(|_| ParseObjectIdError)?;
        }
        Ok(Self(bytes))
    }
}

/// The subtype tag carried by a [`Binary`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinarySubtype {
    /// Generic binary data.
    Generic,
    /// A function.
    Function,
    /// Generic binary data (old, deprecated encoding).
    BinaryOld,
    /// A UUID in the old, driver-dependent byte order.
    UuidOld,
    /// A UUID.
    Uuid,
    /// An MD5 digest.
    Md5,
    /// A user-defined subtype (0x80 and above).
    UserDefined(u8),
}

impl From<BinarySubtype> for u8 {
    fn from(subtype: BinarySubtype) -> Self {
        match subtype {
            BinarySubtype::Generic => 0x00,
            BinarySubtype::Function => 0x01,
            BinarySubtype::BinaryOld => 0x02,
            BinarySubtype::UuidOld => 0x03,
            BinarySubtype::Uuid => 0x04,
            BinarySubtype::Md5 => 0x05,
            BinarySubtype::UserDefined(tag) => tag,
        }
    }
}

impl From<u8> for BinarySubtype {
    fn from(tag: u8) -> Self {
        match tag {
            0x00 => Self::Generic,
            0x01 => Self::Function,
            0x02 => Self::BinaryOld,
            0x03 => Self::UuidOld,
            0x04 => Self::Uuid,
            0x05 => Self::Md5,
            other => Self::UserDefined(other),
        }
    }
}

/// A binary payload with a subtype tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binary {
    /// What the bytes are.
    pub subtype: BinarySubtype,
    /// The payload.
    pub bytes: Vec<u8>,
}

impl Binary {
    /// A payload with the [`BinarySubtype::Generic`] tag.
    #[must_use]
    pub fn generic(bytes: Vec<u8>) -> Self {
        Self {
            subtype: BinarySubtype::Generic,
            bytes,
        }
    }
}

/// A regular expression: a pattern plus its option flags.
///
/// Neither part is interpreted by the writer; the options string travels
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegularExpression {
    /// The pattern source.
    pub pattern: String,
    /// Option flags, e.g. `"imx"`.
    pub options: String,
}

impl RegularExpression {
    /// Builds a regular expression value from a pattern and its options.
    pub fn new(pattern: impl Into<String>, options: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            options: options.into(),
        }
    }
}

/// An internal timestamp: seconds since the epoch plus an ordinal within the
/// second. Distinct from the UTC datetime kind, which is a plain millisecond
/// count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp {
    /// Seconds since the Unix epoch.
    pub time: u32,
    /// Ordinal for operations within the same second.
    pub increment: u32,
}

/// A deprecated pointer to a document in another namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbPointer {
    /// The namespace of the target document.
    pub namespace: String,
    /// The id of the target document.
    pub id: ObjectId,
}

/// Code paired with a document of variable bindings visible to that code.
///
/// Produced by the writer's two-step protocol: the code string first, the
/// scope document immediately after.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeWithScope {
    /// The code string.
    pub code: String,
    /// The variable bindings.
    pub scope: Document,
}
