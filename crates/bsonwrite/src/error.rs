//! The single failure mode shared by every writer backend.

use thiserror::Error;

use crate::state::{ContextKind, ContextSet, StateSet, WriterState};

/// Convenience alias for results produced by writer operations.
pub type Result<T> = core::result::Result<T, WriteError>;

/// An invalid write sequence: a call that is illegal at the writer's current
/// position.
///
/// The error is synchronous and fatal to the write sequence. No container is
/// mutated by the failing call, but the writer must not be reused to produce
/// a valid document; callers are expected to discard it along with whatever
/// partial output it holds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WriteError {
    /// The operation was attempted outside its legal-state set.
    #[error("{operation} can only be called when the writer state is {expected}, not when it is {actual}")]
    InvalidState {
        /// The operation that was attempted.
        operation: &'static str,
        /// The states in which the operation is legal.
        expected: StateSet,
        /// The state the writer was actually in.
        actual: WriterState,
    },
    /// A container-closing operation did not match the kind of the currently
    /// open container.
    #[error("{operation} can only be called when the current context is {expected}, not when it is {actual}")]
    InvalidContext {
        /// The operation that was attempted.
        operation: &'static str,
        /// The context kinds in which the operation is legal.
        expected: ContextSet,
        /// The kind of the context that was actually open.
        actual: ContextKind,
    },
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn invalid_state_names_the_call_site() {
        let err = WriteError::InvalidState {
            operation: "write_int32",
            expected: StateSet(&[WriterState::Value]),
            actual: WriterState::Name,
        };
        assert_eq!(
            err.to_string(),
            "write_int32 can only be called when the writer state is Value, not when it is Name"
        );
    }

    #[test]
    fn invalid_state_joins_the_expected_set() {
        let err = WriteError::InvalidState {
            operation: "write_start_document",
            expected: StateSet(&[
                WriterState::Initial,
                WriterState::Value,
                WriterState::ScopeDocument,
            ]),
            actual: WriterState::Name,
        };
        assert_eq!(
            err.to_string(),
            "write_start_document can only be called when the writer state is \
             Initial, Value or ScopeDocument, not when it is Name"
        );
    }

    #[test]
    fn invalid_context_names_both_kinds() {
        let err = WriteError::InvalidContext {
            operation: "write_end_array",
            expected: ContextSet(&[ContextKind::Array]),
            actual: ContextKind::Document,
        };
        assert_eq!(
            err.to_string(),
            "write_end_array can only be called when the current context is Array, not when it is Document"
        );
    }
}
