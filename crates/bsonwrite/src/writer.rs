//! The format-agnostic writer trait.

use crate::{
    error::Result,
    types::{Binary, DbPointer, ObjectId, RegularExpression, Timestamp},
};

/// A writer for a single self-describing document.
///
/// Every implementation enforces the same call grammar through the shared
/// state machine: a document opens with [`write_start_document`], fields are
/// written as a [`write_name`] call followed by exactly one value call, and
/// containers nest through the paired `start`/`end` calls. A call made out of
/// sequence fails with [`WriteError`](crate::WriteError) before any output is
/// produced.
///
/// What "output" means is the backend's business: [`DocumentWriter`] builds an
/// in-memory [`Document`](crate::Document) tree, while a stream backend would
/// emit bytes under the identical legality rules.
///
/// # Examples
///
/// ```
/// use bsonwrite::{BsonWriter, DocumentWriter, doc};
///
/// let mut writer = DocumentWriter::new();
/// writer.write_start_document()?;
/// writer.write_name("title")?;
/// writer.write_string("a document")?;
/// writer.write_end_document()?;
///
/// assert_eq!(writer.into_document(), doc! { "title" => "a document" });
/// # Ok::<(), bsonwrite::WriteError>(())
/// ```
///
/// [`write_start_document`]: Self::write_start_document
/// [`write_name`]: Self::write_name
/// [`DocumentWriter`]: crate::DocumentWriter
pub trait BsonWriter {
    /// Opens a document: the top-level document from the initial state, a
    /// sub-document in value position, or the scope document demanded by a
    /// preceding [`write_javascript_with_scope`](Self::write_javascript_with_scope).
    fn write_start_document(&mut self) -> Result<()>;

    /// Closes the current document. Closing the top-level document finishes
    /// the writer; closing a scope document emits the pending code and the
    /// scope as one combined code-with-scope value.
    ///
    /// Only legal when the document expects a field name; a written name
    /// with no value is a dangling field and fails here.
    fn write_end_document(&mut self) -> Result<()>;

    /// Opens an array in value position. Array elements are written as bare
    /// values, without field names.
    fn write_start_array(&mut self) -> Result<()>;

    /// Closes the current array and appends it to the enclosing container.
    fn write_end_array(&mut self) -> Result<()>;

    /// Writes the name of the next field in the current document.
    fn write_name(&mut self, name: &str) -> Result<()>;

    /// Writes a boolean value.
    fn write_boolean(&mut self, value: bool) -> Result<()>;

    /// Writes a 32-bit integer value.
    fn write_int32(&mut self, value: i32) -> Result<()>;

    /// Writes a 64-bit integer value.
    fn write_int64(&mut self, value: i64) -> Result<()>;

    /// Writes a double value.
    fn write_double(&mut self, value: f64) -> Result<()>;

    /// Writes a UTC datetime value, as milliseconds since the Unix epoch.
    fn write_date_time(&mut self, millis: i64) -> Result<()>;

    /// Writes a string value.
    fn write_string(&mut self, value: &str) -> Result<()>;

    /// Writes a binary value.
    fn write_binary(&mut self, value: Binary) -> Result<()>;

    /// Writes an object id value.
    fn write_object_id(&mut self, value: ObjectId) -> Result<()>;

    /// Writes a regular expression value.
    fn write_regular_expression(&mut self, value: RegularExpression) -> Result<()>;

    /// Writes a code value with no scope.
    fn write_javascript(&mut self, code: &str) -> Result<()>;

    /// Begins a code-with-scope value.
    ///
    /// This is the first half of a two-step protocol: no value is appended
    /// yet, and the very next call must be
    /// [`write_start_document`](Self::write_start_document) to open the scope.
    /// When that scope document is closed, the code string and the scope are
    /// appended as a single combined value.
    fn write_javascript_with_scope(&mut self, code: &str) -> Result<()>;

    /// Writes an internal timestamp value.
    fn write_timestamp(&mut self, value: Timestamp) -> Result<()>;

    /// Writes a deprecated namespace-pointer value.
    fn write_db_pointer(&mut self, value: DbPointer) -> Result<()>;

    /// Writes the minimum-key value.
    fn write_min_key(&mut self) -> Result<()>;

    /// Writes the maximum-key value.
    fn write_max_key(&mut self) -> Result<()>;

    /// Writes a null value.
    fn write_null(&mut self) -> Result<()>;

    /// Writes the deprecated undefined value.
    fn write_undefined(&mut self) -> Result<()>;

    /// Writes a deprecated symbol value.
    fn write_symbol(&mut self, value: &str) -> Result<()>;

    /// Flushes any buffered output. A hook for backends that buffer; the
    /// tree backend has nothing to flush. Never finalizes an open document.
    fn flush(&mut self);
}
