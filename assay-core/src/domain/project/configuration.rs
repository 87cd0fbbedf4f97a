// assay-core/src/domain/project/configuration.rs

use serde::{Deserialize, Serialize};

use super::defaults::ProjectDefaults;
use crate::domain::compiler::quoter::SqlDialect;
use crate::domain::error::DomainError;
use crate::domain::rules::RuleCategory;

/// How much the compiler trusts rule payloads before handing them to generators.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Payloads go to the generators as written.
    #[default]
    Permissive,
    /// Every rule map is checked before fan-out.
    Strict,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProjectConfig {
    pub name: String,
    pub version: String,

    #[serde(default)]
    pub warehouse: WarehouseConfig,

    #[serde(default)]
    pub dialect: SqlDialect,

    #[serde(default)]
    pub validation: ValidationMode,

    /// Environment the project is compiled for (matched against `disabled_in_envs`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,

    #[serde(rename = "rule-paths", default = "default_rule_paths")]
    pub rule_paths: Vec<String>,

    #[serde(rename = "target-path", default = "default_target_path")]
    pub target_path: String,

    #[serde(default)]
    pub templates: TemplateOverrides,
}

impl ProjectConfig {
    /// Resolves the project-wide defaults seeding every compilation.
    pub fn defaults(&self) -> Result<ProjectDefaults, DomainError> {
        ProjectDefaults::new(
            self.warehouse.database.as_deref().unwrap_or_default(),
            self.warehouse.assertion_schema.as_deref().unwrap_or_default(),
            self.warehouse.location.clone(),
        )
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct WarehouseConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,

    #[serde(alias = "schema", skip_serializing_if = "Option::is_none")]
    pub assertion_schema: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Per-category replacements for the built-in query templates.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct TemplateOverrides {
    pub row_condition: Option<String>,
    pub unique_key: Option<String>,
    pub data_freshness: Option<String>,
    pub data_completeness: Option<String>,
    pub referential_integrity: Option<String>,
}

impl TemplateOverrides {
    pub fn get(&self, category: RuleCategory) -> Option<&str> {
        match category {
            RuleCategory::RowCondition => self.row_condition.as_deref(),
            RuleCategory::UniqueKey => self.unique_key.as_deref(),
            RuleCategory::DataFreshness => self.data_freshness.as_deref(),
            RuleCategory::DataCompleteness => self.data_completeness.as_deref(),
            RuleCategory::ReferentialIntegrity => self.referential_integrity.as_deref(),
        }
    }
}

fn default_rule_paths() -> Vec<String> {
    vec!["rules".to_string()]
}
fn default_target_path() -> String {
    "target".to_string()
}
