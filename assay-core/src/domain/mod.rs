// assay-core/src/domain/mod.rs

pub mod assertion;
pub mod compiler;
pub mod error;
pub mod options;
pub mod project;
pub mod rules;

// Re-exports pratiques pour simplifier les imports ailleurs
pub use assertion::{AssertionDefinition, AssertionSet, CompiledRuleSet};
pub use error::DomainError;
pub use options::{GlobalOptions, GlobalOptionsOverrides, SharedConfig};
pub use project::{ProjectConfig, ProjectDefaults, ValidationMode};
pub use rules::{RuleCategory, RuleMap, RuleSetInput};
