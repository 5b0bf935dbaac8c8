//! Error types for port operations.

/// Repository failures. A missing aggregate on `get` is `Ok(None)`, not an error.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// `update` named an aggregate the store does not hold.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// `add` named an id the store already holds.
    #[error("{entity_type} already exists: {id}")]
    Duplicate {
        entity_type: &'static str,
        id: String,
    },

    /// The backing store failed; `operation` names the repository call.
    #[error("Storage error in {operation}: {message}")]
    Storage {
        operation: &'static str,
        message: String,
    },
}

impl RepoError {
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    pub fn duplicate(entity_type: &'static str, id: impl ToString) -> Self {
        Self::Duplicate {
            entity_type,
            id: id.to_string(),
        }
    }

    pub fn storage(operation: &'static str, message: impl ToString) -> Self {
        Self::Storage {
            operation,
            message: message.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
