//! Error types for the clinic tour.

/// Errors raised by the tour planner and its collaborators.
#[derive(Debug, thiserror::Error)]
pub enum TourError {
    #[error("No element matches tour target {target}")]
    UnresolvedTarget { target: String },

    #[error("Tour engine is unavailable")]
    EngineUnavailable,

    #[error("Settings storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("No tour session is active")]
    NoActiveSession,

    #[error("Action {action} is not offered at step {index}")]
    ActionNotOffered { action: String, index: usize },
}

/// Database-related errors.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection pool error: {0}")]
    Pool(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<DatabaseError> for TourError {
    fn from(e: DatabaseError) -> Self {
        Self::StorageUnavailable(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_error_maps_to_storage_unavailable() {
        let err: TourError = DatabaseError::Query("disk I/O error".into()).into();
        match err {
            TourError::StorageUnavailable(msg) => assert!(msg.contains("disk I/O error")),
            other => panic!("Expected StorageUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn action_not_offered_display() {
        let err = TourError::ActionNotOffered {
            action: "next".into(),
            index: 7,
        };
        assert_eq!(err.to_string(), "Action next is not offered at step 7");
    }
}
