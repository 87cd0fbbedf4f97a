// assay-core/src/domain/assertion.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

use crate::domain::error::DomainError;

use crate::domain::rules::RuleCategory;

/// A single generated check, ready for the downstream assertion runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssertionDefinition {
    pub name: String,
    pub category: RuleCategory,
    pub table: String,
    pub database: String,
    pub schema: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub disabled_in_envs: BTreeSet<String>,
    pub description: String,
    /// Query returning the violating rows; an empty result means the check passes.
    pub query: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub config: Map<String, Value>,
}

impl AssertionDefinition {
    pub fn is_enabled_in(&self, env: &str) -> bool {
        !self.disabled_in_envs.contains(env)
    }

    fn source_label(&self) -> String {
        format!("{} rule on '{}' ({})", self.category, self.table, self.description)
    }

    /// `database.schema.name` as the runner will register it.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}.{}", self.database, self.schema, self.name)
    }
}

pub type AssertionSet = Vec<AssertionDefinition>;

/// Output of one compilation: one assertion set per rule category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledRuleSet {
    pub row_condition_assertions: AssertionSet,
    pub unique_key_assertions: AssertionSet,
    pub data_freshness_assertions: AssertionSet,
    pub data_completeness_assertions: AssertionSet,
    pub referential_integrity_assertions: AssertionSet,
}

impl CompiledRuleSet {
    pub fn get(&self, category: RuleCategory) -> &AssertionSet {
        match category {
            RuleCategory::RowCondition => &self.row_condition_assertions,
            RuleCategory::UniqueKey => &self.unique_key_assertions,
            RuleCategory::DataFreshness => &self.data_freshness_assertions,
            RuleCategory::DataCompleteness => &self.data_completeness_assertions,
            RuleCategory::ReferentialIntegrity => &self.referential_integrity_assertions,
        }
    }

    fn get_mut(&mut self, category: RuleCategory) -> &mut AssertionSet {
        match category {
            RuleCategory::RowCondition => &mut self.row_condition_assertions,
            RuleCategory::UniqueKey => &mut self.unique_key_assertions,
            RuleCategory::DataFreshness => &mut self.data_freshness_assertions,
            RuleCategory::DataCompleteness => &mut self.data_completeness_assertions,
            RuleCategory::ReferentialIntegrity => &mut self.referential_integrity_assertions,
        }
    }

    pub fn len(&self) -> usize {
        RuleCategory::ALL.iter().map(|c| self.get(*c).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssertionDefinition> {
        RuleCategory::ALL.into_iter().flat_map(|c| self.get(c).iter())
    }

    pub fn find(&self, name: &str) -> Option<&AssertionDefinition> {
        self.iter().find(|a| a.name == name)
    }

    /// Fails on the first name shared by two assertions, across all categories.
    pub fn ensure_unique_names(&self) -> Result<(), DomainError> {
        let mut seen: BTreeMap<&str, &AssertionDefinition> = BTreeMap::new();
        for assertion in self.iter() {
            if let Some(first) = seen.insert(assertion.name.as_str(), assertion) {
                return Err(DomainError::DuplicateAssertionName {
                    name: assertion.name.clone(),
                    first: first.source_label(),
                    second: assertion.source_label(),
                });
            }
        }
        Ok(())
    }

    /// Drops every assertion disabled for `env`.
    pub fn retain_enabled_in(&mut self, env: &str) {
        for category in RuleCategory::ALL {
            self.get_mut(category).retain(|a| a.is_enabled_in(env));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assertion(name: &str, category: RuleCategory, disabled: &[&str]) -> AssertionDefinition {
        AssertionDefinition {
            name: name.into(),
            category,
            table: "t".into(),
            database: "db".into(),
            schema: "dq".into(),
            location: None,
            tags: BTreeSet::new(),
            disabled_in_envs: disabled.iter().map(|s| s.to_string()).collect(),
            description: String::new(),
            query: "SELECT 1".into(),
            config: Map::new(),
        }
    }

    #[test]
    fn test_serialized_keys_match_runner_contract() -> anyhow::Result<()> {
        let value = serde_json::to_value(CompiledRuleSet::default())?;
        let object = value
            .as_object()
            .ok_or_else(|| anyhow::anyhow!("expected an object"))?;
        for category in RuleCategory::ALL {
            assert!(object.contains_key(category.output_key()));
        }
        assert_eq!(object.len(), 5);
        Ok(())
    }

    #[test]
    fn test_retain_enabled_in_env() {
        let mut compiled = CompiledRuleSet {
            unique_key_assertions: vec![
                assertion("a", RuleCategory::UniqueKey, &["dev"]),
                assertion("b", RuleCategory::UniqueKey, &[]),
            ],
            ..Default::default()
        };

        compiled.retain_enabled_in("dev");

        assert_eq!(compiled.len(), 1);
        assert!(compiled.find("b").is_some());
        assert!(compiled.find("a").is_none());
    }

    #[test]
    fn test_duplicate_names_across_categories_are_rejected() -> anyhow::Result<()> {
        let compiled = CompiledRuleSet {
            row_condition_assertions: vec![assertion("orders_check", RuleCategory::RowCondition, &[])],
            unique_key_assertions: vec![assertion("orders_check", RuleCategory::UniqueKey, &[])],
            ..Default::default()
        };

        match compiled.ensure_unique_names() {
            Err(DomainError::DuplicateAssertionName { name, first, second }) => {
                assert_eq!(name, "orders_check");
                assert!(first.starts_with("row_condition"));
                assert!(second.starts_with("unique_key"));
                Ok(())
            }
            other => anyhow::bail!("expected DuplicateAssertionName, got {:?}", other),
        }
    }

    #[test]
    fn test_distinct_names_pass() {
        let compiled = CompiledRuleSet {
            unique_key_assertions: vec![
                assertion("a", RuleCategory::UniqueKey, &[]),
                assertion("b", RuleCategory::UniqueKey, &[]),
            ],
            ..Default::default()
        };
        assert!(compiled.ensure_unique_names().is_ok());
    }

    #[test]
    fn test_qualified_name() {
        let a = assertion("users_unique_key", RuleCategory::UniqueKey, &[]);
        assert_eq!(a.qualified_name(), "db.dq.users_unique_key");
    }
}
