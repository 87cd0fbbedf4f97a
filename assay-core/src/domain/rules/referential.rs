// assay-core/src/domain/rules/referential.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A child table column whose values must exist in a key column of the parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ReferenceRule {
    #[serde(alias = "parentKey")]
    #[validate(length(min = 1, message = "parent key cannot be empty"))]
    pub parent_key: String,

    #[serde(alias = "childTable")]
    #[validate(length(min = 1, message = "child table cannot be empty"))]
    pub child_table: String,

    #[serde(alias = "childKey")]
    #[validate(length(min = 1, message = "child key cannot be empty"))]
    pub child_key: String,
}
