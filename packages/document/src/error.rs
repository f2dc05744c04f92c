use thiserror::Error;

/// Errors raised by tree operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    #[error("Node not found: {0}")]
    NotFound(String),

    #[error("The root node cannot be removed or moved")]
    RootImmutable,

    #[error("Cannot move {node_id} into {target_id}: target is the node itself or one of its descendants")]
    CycleDetected { node_id: String, target_id: String },

    #[error("Node {0} cannot hold children")]
    NotAContainer(String),

    #[error("Node {id} is not a {expected}")]
    WrongKind { id: String, expected: &'static str },

    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

impl TreeError {
    /// Reference failures the editor absorbs as silent no-ops
    pub fn is_reference_error(&self) -> bool {
        matches!(
            self,
            TreeError::NotFound(_) | TreeError::NotAContainer(_) | TreeError::WrongKind { .. }
        )
    }
}

pub type TreeResult<T> = Result<T, TreeError>;
