use thiserror::Error;

use crate::interner::Name;

/// Errors from the strict data-environment insertion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataEnvError {
    #[error("constructor '{constructor}' of '{incoming}' is already defined by data type '{existing}'")]
    ConstructorCollision {
        constructor: Name,
        existing: Name,
        incoming: Name,
    },

    #[error("data type '{data_type}' declares constructor '{constructor}' more than once")]
    DuplicateConstructor { constructor: Name, data_type: Name },
}

impl DataEnvError {
    pub fn code(&self) -> String {
        match self {
            DataEnvError::ConstructorCollision { .. } => "ConstructorCollision".into(),
            DataEnvError::DuplicateConstructor { .. } => "DuplicateConstructor".into(),
        }
    }
}
