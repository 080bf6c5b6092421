//! A writer backend that materializes an in-memory value tree.

use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use crate::{
    error::{Result, WriteError},
    state::{ContextKind, StateMachine, StateSet, WriterState},
    types::{Binary, CodeWithScope, DbPointer, ObjectId, RegularExpression, Timestamp},
    value::{Array, Document, Value},
    writer::BsonWriter,
};

/// One open container, parallel to an entry on the state machine's context
/// stack. The root document is not a frame; it lives in the writer itself so
/// the caller can observe it mid-sequence.
#[derive(Debug)]
enum Frame {
    Document(Document),
    Array(Array),
    /// Code string held while its scope document is being assembled.
    PendingScope(String),
}

/// A [`BsonWriter`] that builds a [`Document`] tree instead of emitting
/// bytes.
///
/// The writer owns its root document: construct one empty with [`new`], or
/// hand in a pre-populated document with [`with_document`] to have the writer
/// extend it in place. The root can be borrowed at any time through
/// [`document`], complete once [`state`] reports [`Done`](WriterState::Done),
/// or taken out with [`into_document`].
///
/// A sequence that returns an error leaves the writer unusable; discard it
/// along with whatever partial output it holds.
///
/// # Examples
///
/// ```
/// use bsonwrite::{BsonWriter, DocumentWriter, WriterState, doc};
///
/// let mut writer = DocumentWriter::new();
/// writer.write_start_document()?;
/// writer.write_name("a")?;
/// writer.write_int32(1)?;
/// writer.write_name("b")?;
/// writer.write_start_array()?;
/// writer.write_int32(2)?;
/// writer.write_int32(3)?;
/// writer.write_end_array()?;
/// writer.write_end_document()?;
///
/// assert_eq!(writer.state(), WriterState::Done);
/// assert_eq!(writer.into_document(), doc! { "a" => 1, "b" => vec![2, 3] });
/// # Ok::<(), bsonwrite::WriteError>(())
/// ```
///
/// [`new`]: Self::new
/// [`with_document`]: Self::with_document
/// [`document`]: Self::document
/// [`into_document`]: Self::into_document
/// [`state`]: Self::state
#[derive(Debug)]
pub struct DocumentWriter {
    machine: StateMachine,
    frames: Vec<Frame>,
    root: Document,
}

impl Default for DocumentWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentWriter {
    /// A writer over a fresh, empty root document.
    #[must_use]
    pub fn new() -> Self {
        Self::with_document(Document::new())
    }

    /// A writer that extends `document` in place as its top-level container.
    #[must_use]
    pub fn with_document(document: Document) -> Self {
        Self {
            machine: StateMachine::new(),
            frames: Vec::new(),
            root: document,
        }
    }

    /// The current writer state. [`WriterState::Done`] once the top-level
    /// document has been closed.
    #[must_use]
    pub fn state(&self) -> WriterState {
        self.machine.state()
    }

    /// The root document. Top-level fields appear as they are written;
    /// nested containers attach when they close. The document is only
    /// complete, and only valid, once [`state`](Self::state) is
    /// [`WriterState::Done`].
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.root
    }

    /// Consumes the writer and returns the root document.
    #[must_use]
    pub fn into_document(self) -> Document {
        self.root
    }

    #[cfg(test)]
    pub(crate) fn depth(&self) -> usize {
        self.machine.depth()
    }

    /// Appends a value into the current container. The state machine has
    /// already vouched that the position is legal: a frame (or the root) is
    /// open, and document containers have a pending field name.
    fn append(&mut self, value: Value) {
        match self.frames.last_mut() {
            Some(Frame::Array(array)) => array.push(value),
            Some(Frame::Document(document)) => {
                let Some(name) = self.machine.take_name() else {
                    unreachable!("value write without a field name")
                };
                document.insert(name, value);
            }
            None => {
                let Some(name) = self.machine.take_name() else {
                    unreachable!("value write without a field name")
                };
                self.root.insert(name, value);
            }
            Some(Frame::PendingScope(_)) => {
                unreachable!("value write into a pending scope marker")
            }
        }
    }

    /// The shape every scalar write shares: precondition check, append,
    /// state advance.
    fn write_scalar(&mut self, operation: &'static str, value: Value) -> Result<()> {
        self.machine.check(operation, &[WriterState::Value])?;
        self.append(value);
        self.machine.set_state(self.machine.next_state());
        Ok(())
    }
}

impl BsonWriter for DocumentWriter {
    fn write_start_document(&mut self) -> Result<()> {
        self.machine.check(
            "write_start_document",
            &[
                WriterState::Initial,
                WriterState::Value,
                WriterState::ScopeDocument,
                WriterState::Done,
            ],
        )?;

        match self.machine.state() {
            // The root document is already in place; only the context opens.
            WriterState::Initial => self.machine.push(ContextKind::Document),
            WriterState::Value => {
                self.frames.push(Frame::Document(Document::new()));
                self.machine.push(ContextKind::Document);
            }
            WriterState::ScopeDocument => {
                self.frames.push(Frame::Document(Document::new()));
                self.machine.push(ContextKind::ScopeDocument);
            }
            // The precondition set admits `Done` for parity with stream
            // backends that write document sequences; this backend produces
            // exactly one document and is not reusable.
            actual => {
                return Err(WriteError::InvalidState {
                    operation: "write_start_document",
                    expected: StateSet(&[
                        WriterState::Initial,
                        WriterState::Value,
                        WriterState::ScopeDocument,
                    ]),
                    actual,
                });
            }
        }

        self.machine.set_state(WriterState::Name);
        Ok(())
    }

    fn write_end_document(&mut self) -> Result<()> {
        self.machine.check("write_end_document", &[WriterState::Name])?;
        self.machine.check_context(
            "write_end_document",
            &[ContextKind::Document, ContextKind::ScopeDocument],
        )?;

        self.machine.pop();

        if self.machine.current() == ContextKind::TopLevel {
            // The root document was built in place; nothing to append.
            self.machine.set_state(WriterState::Done);
            return Ok(());
        }

        let Some(Frame::Document(document)) = self.frames.pop() else {
            unreachable!("document context without a document frame")
        };

        if self.machine.current() == ContextKind::JavaScriptWithScope {
            // The document just closed was the scope, and the marker context
            // below it holds the code string. Both collapse into a single
            // code-with-scope value in the grandparent container. This keys
            // off the immediate parent only, so ordinary documents nested
            // inside a scope close through the branch below.
            let Some(Frame::PendingScope(code)) = self.frames.pop() else {
                unreachable!("scope marker context without a pending code frame")
            };
            self.machine.pop();
            self.append(Value::JavaScriptCodeWithScope(CodeWithScope {
                code,
                scope: document,
            }));
        } else {
            self.append(Value::Document(document));
        }

        self.machine.set_state(self.machine.next_state());
        Ok(())
    }

    fn write_start_array(&mut self) -> Result<()> {
        self.machine.check("write_start_array", &[WriterState::Value])?;
        self.frames.push(Frame::Array(Array::new()));
        self.machine.push(ContextKind::Array);
        self.machine.set_state(WriterState::Value);
        Ok(())
    }

    fn write_end_array(&mut self) -> Result<()> {
        self.machine.check("write_end_array", &[WriterState::Value])?;
        self.machine.check_context("write_end_array", &[ContextKind::Array])?;

        let Some(Frame::Array(array)) = self.frames.pop() else {
            unreachable!("array context without an array frame")
        };
        self.machine.pop();
        self.append(Value::Array(array));
        self.machine.set_state(self.machine.next_state());
        Ok(())
    }

    fn write_name(&mut self, name: &str) -> Result<()> {
        self.machine.check("write_name", &[WriterState::Name])?;
        self.machine.set_name(name.to_string());
        self.machine.set_state(WriterState::Value);
        Ok(())
    }

    fn write_boolean(&mut self, value: bool) -> Result<()> {
        self.write_scalar("write_boolean", Value::Boolean(value))
    }

    fn write_int32(&mut self, value: i32) -> Result<()> {
        self.write_scalar("write_int32", Value::Int32(value))
    }

    fn write_int64(&mut self, value: i64) -> Result<()> {
        self.write_scalar("write_int64", Value::Int64(value))
    }

    fn write_double(&mut self, value: f64) -> Result<()> {
        self.write_scalar("write_double", Value::Double(value))
    }

    fn write_date_time(&mut self, millis: i64) -> Result<()> {
        self.write_scalar("write_date_time", Value::DateTime(millis))
    }

    fn write_string(&mut self, value: &str) -> Result<()> {
        self.write_scalar("write_string", Value::String(value.to_string()))
    }

    fn write_binary(&mut self, value: Binary) -> Result<()> {
        self.write_scalar("write_binary", Value::Binary(value))
    }

    fn write_object_id(&mut self, value: ObjectId) -> Result<()> {
        self.write_scalar("write_object_id", Value::ObjectId(value))
    }

    fn write_regular_expression(&mut self, value: RegularExpression) -> Result<()> {
        self.write_scalar("write_regular_expression", Value::RegularExpression(value))
    }

    fn write_javascript(&mut self, code: &str) -> Result<()> {
        self.write_scalar("write_javascript", Value::JavaScriptCode(code.to_string()))
    }

    fn write_javascript_with_scope(&mut self, code: &str) -> Result<()> {
        self.machine
            .check("write_javascript_with_scope", &[WriterState::Value])?;

        // Nothing is appended yet. The code waits in a transient marker
        // context until its scope document closes.
        self.frames.push(Frame::PendingScope(code.to_string()));
        self.machine.push(ContextKind::JavaScriptWithScope);
        self.machine.set_state(WriterState::ScopeDocument);
        Ok(())
    }

    fn write_timestamp(&mut self, value: Timestamp) -> Result<()> {
        self.write_scalar("write_timestamp", Value::Timestamp(value))
    }

    fn write_db_pointer(&mut self, value: DbPointer) -> Result<()> {
        self.write_scalar("write_db_pointer", Value::DbPointer(value))
    }

    fn write_min_key(&mut self) -> Result<()> {
        self.write_scalar("write_min_key", Value::MinKey)
    }

    fn write_max_key(&mut self) -> Result<()> {
        self.write_scalar("write_max_key", Value::MaxKey)
    }

    fn write_null(&mut self) -> Result<()> {
        self.write_scalar("write_null", Value::Null)
    }

    fn write_undefined(&mut self) -> Result<()> {
        self.write_scalar("write_undefined", Value::Undefined)
    }

    fn write_symbol(&mut self, value: &str) -> Result<()> {
        self.write_scalar("write_symbol", Value::Symbol(value.to_string()))
    }

    fn flush(&mut self) {
        // Nothing is buffered.
    }
}
