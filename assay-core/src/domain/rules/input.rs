// assay-core/src/domain/rules/input.rs

use serde::{Deserialize, Serialize};

use super::{
    CompletenessSpec, FreshnessSpec, ReferentialIntegritySpec, RowConditionSet, RuleCategory,
    RuleMap, UniqueKeySpec,
};
use crate::domain::error::DomainError;
use crate::domain::options::{GlobalOptionsOverrides, SharedConfig};

/// Everything a caller hands to the compiler. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSetInput {
    #[serde(default, alias = "globalAssertionsParams")]
    pub global_options: GlobalOptionsOverrides,

    #[serde(default)]
    pub config: SharedConfig,

    #[serde(default, alias = "rowConditions")]
    pub row_conditions: RuleMap<RowConditionSet>,

    #[serde(default, alias = "uniqueKeyConditions")]
    pub unique_key_conditions: RuleMap<UniqueKeySpec>,

    #[serde(default, alias = "dataFreshnessConditions")]
    pub data_freshness_conditions: RuleMap<FreshnessSpec>,

    #[serde(default, alias = "dataCompletenessConditions")]
    pub data_completeness_conditions: RuleMap<CompletenessSpec>,

    #[serde(default, alias = "referentialIntegrityConditions")]
    pub referential_integrity_conditions: RuleMap<ReferentialIntegritySpec>,
}

impl RuleSetInput {
    pub fn is_empty(&self) -> bool {
        self.row_conditions.is_empty()
            && self.unique_key_conditions.is_empty()
            && self.data_freshness_conditions.is_empty()
            && self.data_completeness_conditions.is_empty()
            && self.referential_integrity_conditions.is_empty()
    }

    /// Number of tables declared for a category.
    pub fn table_count(&self, category: RuleCategory) -> usize {
        match category {
            RuleCategory::RowCondition => self.row_conditions.len(),
            RuleCategory::UniqueKey => self.unique_key_conditions.len(),
            RuleCategory::DataFreshness => self.data_freshness_conditions.len(),
            RuleCategory::DataCompleteness => self.data_completeness_conditions.len(),
            RuleCategory::ReferentialIntegrity => self.referential_integrity_conditions.len(),
        }
    }

    /// Folds a fragment (e.g. another rule file) into this input.
    ///
    /// Global options and shared config layer key by key with the fragment winning.
    /// A table may only be declared once per category.
    pub fn absorb(mut self, fragment: RuleSetInput) -> Result<Self, DomainError> {
        self.global_options = self.global_options.layered(fragment.global_options);
        self.config = self.config.layered(fragment.config);

        union_into(
            &mut self.row_conditions,
            fragment.row_conditions,
            RuleCategory::RowCondition,
        )?;
        union_into(
            &mut self.unique_key_conditions,
            fragment.unique_key_conditions,
            RuleCategory::UniqueKey,
        )?;
        union_into(
            &mut self.data_freshness_conditions,
            fragment.data_freshness_conditions,
            RuleCategory::DataFreshness,
        )?;
        union_into(
            &mut self.data_completeness_conditions,
            fragment.data_completeness_conditions,
            RuleCategory::DataCompleteness,
        )?;
        union_into(
            &mut self.referential_integrity_conditions,
            fragment.referential_integrity_conditions,
            RuleCategory::ReferentialIntegrity,
        )?;

        Ok(self)
    }
}

fn union_into<T>(
    target: &mut RuleMap<T>,
    incoming: RuleMap<T>,
    category: RuleCategory,
) -> Result<(), DomainError> {
    for (table, payload) in incoming {
        if target.contains_key(&table) {
            return Err(DomainError::DuplicateRuleDefinition { category, table });
        }
        target.insert(table, payload);
    }
    Ok(())
}
