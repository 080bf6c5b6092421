//! The format-agnostic writer state machine.
//!
//! The machine tracks the current [`WriterState`] and an explicit stack of
//! open contexts. It never inspects container payloads, only context *kinds*
//! and the state enum, so the same legality rules drive the tree backend and
//! would drive a byte-emitting backend unchanged.

use alloc::{string::String, vec, vec::Vec};
use core::fmt;

use crate::error::{Result, WriteError};

/// The position of a writer within the grammar of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterState {
    /// Nothing has been written; the only legal call is `write_start_document`.
    Initial,
    /// Inside a document, expecting a field name or the end of the document.
    Name,
    /// Expecting a value: a scalar, an array, or a sub-document.
    Value,
    /// Expecting the scope document that accompanies a code-with-scope value.
    ScopeDocument,
    /// The top-level document has been closed; no further writes are accepted.
    Done,
}

impl fmt::Display for WriterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Initial => "Initial",
            Self::Name => "Name",
            Self::Value => "Value",
            Self::ScopeDocument => "ScopeDocument",
            Self::Done => "Done",
        })
    }
}

/// The flavor of an open context on the writer's stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextKind {
    /// The root context; exactly one per writer, never popped.
    TopLevel,
    /// An open document.
    Document,
    /// An open array.
    Array,
    /// The document that follows a code-with-scope value.
    ScopeDocument,
    /// Transient marker held while a code string waits for its scope document.
    JavaScriptWithScope,
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::TopLevel => "TopLevel",
            Self::Document => "Document",
            Self::Array => "Array",
            Self::ScopeDocument => "ScopeDocument",
            Self::JavaScriptWithScope => "JavaScriptWithScope",
        })
    }
}

/// A legal-state set, as carried by error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateSet(
    /// The states in the set.
    pub &'static [WriterState],
);

impl fmt::Display for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        join(f, self.0.iter())
    }
}

/// A legal context-kind set, as carried by error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextSet(
    /// The kinds in the set.
    pub &'static [ContextKind],
);

impl fmt::Display for ContextSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        join(f, self.0.iter())
    }
}

// "A", "A or B", "A, B or C".
fn join<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: impl ExactSizeIterator<Item = T>,
) -> fmt::Result {
    let last = items.len().saturating_sub(1);
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(if i == last { " or " } else { ", " })?;
        }
        item.fmt(f)?;
    }
    Ok(())
}

/// One open context.
#[derive(Debug)]
struct Context {
    kind: ContextKind,
    /// Field name recorded in `Name` state, consumed when its value lands.
    name: Option<String>,
}

/// Tracks the writer state and the stack of open contexts.
///
/// Invariant: the stack depth is always at least 1; the `TopLevel` context
/// at the bottom is never popped. Backends pair every `push` with a frame of
/// their own and every `pop` with the matching frame removal.
#[derive(Debug)]
pub(crate) struct StateMachine {
    state: WriterState,
    stack: Vec<Context>,
}

impl StateMachine {
    pub(crate) fn new() -> Self {
        Self {
            state: WriterState::Initial,
            stack: vec![Context {
                kind: ContextKind::TopLevel,
                name: None,
            }],
        }
    }

    pub(crate) fn state(&self) -> WriterState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: WriterState) {
        self.state = state;
    }

    /// The precondition check executed before every write operation. Fails
    /// without mutating anything when the current state is outside the
    /// operation's legal-state set.
    pub(crate) fn check(
        &self,
        operation: &'static str,
        expected: &'static [WriterState],
    ) -> Result<()> {
        if expected.contains(&self.state) {
            Ok(())
        } else {
            Err(WriteError::InvalidState {
                operation,
                expected: StateSet(expected),
                actual: self.state,
            })
        }
    }

    /// Companion guard for container-closing operations: the current context
    /// must be of a kind the operation can close.
    pub(crate) fn check_context(
        &self,
        operation: &'static str,
        expected: &'static [ContextKind],
    ) -> Result<()> {
        let actual = self.current();
        if expected.contains(&actual) {
            Ok(())
        } else {
            Err(WriteError::InvalidContext {
                operation,
                expected: ContextSet(expected),
                actual,
            })
        }
    }

    /// The kind of the context currently on top of the stack.
    pub(crate) fn current(&self) -> ContextKind {
        self.stack.last().map_or(ContextKind::TopLevel, |ctx| ctx.kind)
    }

    pub(crate) fn push(&mut self, kind: ContextKind) {
        self.stack.push(Context { kind, name: None });
    }

    /// Pops the current context and returns its kind. The precondition
    /// checks guarantee a close never reaches the top-level context.
    pub(crate) fn pop(&mut self) -> ContextKind {
        match self.stack.pop() {
            Some(ctx) if !self.stack.is_empty() => ctx.kind,
            _ => unreachable!("context stack underflow"),
        }
    }

    /// Number of open contexts, the top-level context included.
    pub(crate) fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Records the field name the next value in the current context lands
    /// under.
    pub(crate) fn set_name(&mut self, name: String) {
        if let Some(ctx) = self.stack.last_mut() {
            ctx.name = Some(name);
        }
    }

    /// Takes the pending field name of the current context.
    pub(crate) fn take_name(&mut self) -> Option<String> {
        self.stack.last_mut().and_then(|ctx| ctx.name.take())
    }

    /// The state that follows a successful value write: arrays keep
    /// expecting values, documents expect the next field name.
    pub(crate) fn next_state(&self) -> WriterState {
        match self.current() {
            ContextKind::Array => WriterState::Value,
            _ => WriterState::Name,
        }
    }
}
