// assay-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

use crate::domain::rules::RuleCategory;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Missing project default: {0}")]
    #[diagnostic(
        code(assay::domain::missing_default),
        help("Set 'warehouse.database' and 'warehouse.assertion_schema' in assay.yaml (or ASSAY_DATABASE / ASSAY_SCHEMA).")
    )]
    MissingDefaultProvider(String),

    #[error("Invalid {category} rule for table '{table}': {reason}")]
    #[diagnostic(code(assay::domain::invalid_rule))]
    InvalidRuleDefinition {
        category: RuleCategory,
        table: String,
        reason: String,
    },

    #[error("Table '{table}' is defined more than once for {category} rules")]
    #[diagnostic(
        code(assay::domain::duplicate_rule),
        help("Each table may appear once per rule category across all rule files.")
    )]
    DuplicateRuleDefinition { category: RuleCategory, table: String },

    #[error("Assertion name '{name}' is produced by both {first} and {second}")]
    #[diagnostic(
        code(assay::domain::duplicate_assertion),
        help("Names are built from table and rule names with non [A-Za-z0-9_] characters replaced by '_'. Rename one of the rules.")
    )]
    DuplicateAssertionName {
        name: String,
        first: String,
        second: String,
    },

    #[error("The {category} generator failed: {source}")]
    #[diagnostic(code(assay::domain::generator))]
    GeneratorFailure {
        category: RuleCategory,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

impl DomainError {
    pub fn invalid_rule(
        category: RuleCategory,
        table: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidRuleDefinition {
            category,
            table: table.into(),
            reason: reason.into(),
        }
    }
}
