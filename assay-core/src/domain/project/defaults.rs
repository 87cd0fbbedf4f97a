// assay-core/src/domain/project/defaults.rs

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Project-wide values every compilation starts from.
///
/// Passed explicitly to the compiler instead of being read from ambient state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDefaults {
    pub database: String,
    pub schema: String,
    pub location: Option<String>,
}

impl ProjectDefaults {
    pub fn new(
        database: impl Into<String>,
        schema: impl Into<String>,
        location: Option<String>,
    ) -> Result<Self, DomainError> {
        let database = database.into();
        let schema = schema.into();

        if database.trim().is_empty() {
            return Err(DomainError::MissingDefaultProvider(
                "no default database configured".to_string(),
            ));
        }
        if schema.trim().is_empty() {
            return Err(DomainError::MissingDefaultProvider(
                "no assertion schema configured".to_string(),
            ));
        }

        Ok(Self {
            database,
            schema,
            location: location.filter(|l| !l.trim().is_empty()),
        })
    }
}
