//! Call-sequence-checked writing of self-describing documents.
//!
//! This crate is the encoding half of a document-oriented serialization
//! layer. The [`BsonWriter`] trait enforces the legal call sequence for
//! producing a document (nested documents, arrays, and a fixed set of
//! scalar and extended kinds); [`DocumentWriter`] is the backend that builds
//! an in-memory [`Document`] tree instead of a byte stream. A byte-emitting
//! backend would share the identical state machine.
//!
//! Any call made out of sequence, such as writing a value where a field name
//! is expected or closing an array that was never opened, fails with
//! [`WriteError`] before anything is mutated.
//!
//! # Examples
//!
//! ```
//! use bsonwrite::{BsonWriter, DocumentWriter, doc};
//!
//! let mut writer = DocumentWriter::new();
//! writer.write_start_document()?;
//! writer.write_name("a")?;
//! writer.write_int32(1)?;
//! writer.write_name("b")?;
//! writer.write_start_array()?;
//! writer.write_int32(2)?;
//! writer.write_int32(3)?;
//! writer.write_end_array()?;
//! writer.write_end_document()?;
//!
//! assert_eq!(writer.into_document(), doc! { "a" => 1, "b" => vec![2, 3] });
//! # Ok::<(), bsonwrite::WriteError>(())
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod document_writer;
mod error;
mod state;
mod types;
mod value;
mod writer;

#[cfg(feature = "serde")]
mod ser;

#[cfg(test)]
mod tests;

pub use document_writer::DocumentWriter;
pub use error::{Result, WriteError};
pub use state::{ContextKind, ContextSet, StateSet, WriterState};
pub use types::{
    Binary, BinarySubtype, CodeWithScope, DbPointer, ObjectId, ParseObjectIdError,
    RegularExpression, Timestamp,
};
pub use value::{Array, Document, Value};
pub use writer::BsonWriter;

/// Builds a [`Document`] from `name => value` pairs.
///
/// Values go through [`Value::from`], so anything with a `From` conversion
/// works on the right-hand side. Field order is the order written here;
/// repeating a name keeps the last value.
///
/// ```
/// use bsonwrite::{Value, doc};
///
/// let d = doc! {
///     "name" => "example",
///     "tags" => vec!["a", "b"],
///     "nested" => doc! { "ok" => true },
/// };
/// assert_eq!(d.get("name"), Some(&Value::String("example".into())));
/// ```
#[macro_export]
macro_rules! doc {
    () => { $crate::Document::new() };
    ( $( $name:expr => $value:expr ),+ $(,)? ) => {{
        let mut document = $crate::Document::new();
        $( document.insert($name, $value); )+
        document
    }};
}
