// assay-core/src/application/generators/row_condition.rs

use serde_json::json;
use tracing::debug;

use super::{GeneratorBase, assertion_name};
use crate::application::ports::AssertionGenerator;
use crate::domain::assertion::AssertionSet;
use crate::domain::options::{GlobalOptions, SharedConfig};
use crate::domain::rules::{RowConditionSet, RuleMap};
use crate::error::AssayError;

pub const DEFAULT_TEMPLATE: &str = r#"SELECT
  {{ condition_literal }} AS failed_condition,
  *
FROM {{ table_ref }}
WHERE NOT ({{ predicate }})"#;

/// One assertion per (table, condition): rows where the predicate does not hold.
pub struct RowConditionGenerator {
    base: GeneratorBase,
}

impl RowConditionGenerator {
    pub fn new(base: GeneratorBase) -> Self {
        Self { base }
    }
}

impl AssertionGenerator<RowConditionSet> for RowConditionGenerator {
    fn generate(
        &self,
        options: &GlobalOptions,
        shared: &SharedConfig,
        rules: &RuleMap<RowConditionSet>,
    ) -> Result<AssertionSet, AssayError> {
        let mut assertions = AssertionSet::new();

        for (table, conditions) in rules {
            for (condition_name, predicate) in conditions {
                let query = self.base.render(&json!({
                    "table": table,
                    "table_ref": self.base.quoter().table_ref(table),
                    "condition_name": condition_name,
                    "condition_literal": self.base.quoter().literal(condition_name),
                    "predicate": predicate,
                }))?;

                let name = assertion_name(&[table, "row_condition", condition_name]);
                debug!(assertion = %name, "Rendered row condition assertion");

                assertions.push(self.base.definition(
                    options,
                    shared,
                    table,
                    name,
                    format!(
                        "Row condition '{}' on {}: {}",
                        condition_name, table, predicate
                    ),
                    query,
                ));
            }
        }

        Ok(assertions)
    }
}
