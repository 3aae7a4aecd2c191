//! The collaborator contract the edit history operates on.

use thiserror::Error;

/// Why a document could not be snapshotted or restored
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("element id must not be empty")]
    EmptyId,
    #[error("duplicate element id: {0}")]
    DuplicateId(String),
    #[error("unknown element id: {0}")]
    UnknownId(String),
    #[error("non-finite coordinates for element {0}")]
    NonFiniteCoordinates(String),
    #[error("base {0} is paired more than once")]
    AlreadyPaired(String),
    #[error("base {0} cannot pair with itself")]
    SelfPair(String),
}

/// Something whose full editable content can be snapshotted and put back.
///
/// Implementations must uphold two laws:
/// - `serialize` has no side effects, also when it fails.
/// - `restore` is atomic: on failure the document is exactly as before the call,
///   on success a following `serialize` yields a value equal to `state`.
pub trait Document {
    /// Structurally comparable snapshot of the document content
    type State: Clone + PartialEq;

    fn serialize(&self) -> Result<Self::State, DocumentError>;

    fn restore(&mut self, state: &Self::State) -> Result<(), DocumentError>;
}
