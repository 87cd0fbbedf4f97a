// assay-core/src/application/generators/completeness.rs

use serde_json::json;
use tracing::{debug, warn};

use super::{GeneratorBase, assertion_name};
use crate::application::ports::AssertionGenerator;
use crate::domain::assertion::AssertionSet;
use crate::domain::options::{GlobalOptions, SharedConfig};
use crate::domain::rules::{CompletenessSpec, RuleMap};
use crate::error::AssayError;

pub const DEFAULT_TEMPLATE: &str = r#"WITH null_stats AS (
{%- for column in columns %}
  {% if not loop.first %}UNION ALL
  {% endif %}SELECT
    {{ column.literal }} AS column_name,
    {{ column.threshold }} AS allowed_null_percentage,
    100.0 * SUM(CASE WHEN {{ column.name }} IS NULL THEN 1 ELSE 0 END) / NULLIF(COUNT(*), 0) AS null_percentage
  FROM {{ table_ref }}
{%- endfor %}
)
SELECT *
FROM null_stats
WHERE null_percentage > allowed_null_percentage"#;

/// One assertion per table: columns whose share of NULLs exceeds their threshold.
pub struct CompletenessGenerator {
    base: GeneratorBase,
}

impl CompletenessGenerator {
    pub fn new(base: GeneratorBase) -> Self {
        Self { base }
    }
}

impl AssertionGenerator<CompletenessSpec> for CompletenessGenerator {
    fn generate(
        &self,
        options: &GlobalOptions,
        shared: &SharedConfig,
        rules: &RuleMap<CompletenessSpec>,
    ) -> Result<AssertionSet, AssayError> {
        let mut assertions = AssertionSet::new();

        for (table, thresholds) in rules {
            if thresholds.is_empty() {
                warn!(table = %table, "Completeness rule without columns, no assertion generated");
                continue;
            }

            let columns: Vec<_> = thresholds
                .iter()
                .map(|(column, threshold)| {
                    json!({
                        "name": column,
                        "literal": self.base.quoter().literal(column),
                        "threshold": threshold,
                    })
                })
                .collect();

            let query = self.base.render(&json!({
                "table": table,
                "table_ref": self.base.quoter().table_ref(table),
                "columns": columns,
            }))?;

            let name = assertion_name(&[table, "completeness"]);
            debug!(assertion = %name, columns = thresholds.len(), "Rendered completeness assertion");

            let summary = thresholds
                .iter()
                .map(|(column, threshold)| format!("{} <= {}%", column, threshold))
                .collect::<Vec<_>>()
                .join(", ");

            assertions.push(self.base.definition(
                options,
                shared,
                table,
                name,
                format!("Null percentage in {}: {}", table, summary),
                query,
            ));
        }

        Ok(assertions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::generators::test_support::{base, options, shared};
    use crate::domain::rules::RuleCategory;
    use std::collections::BTreeMap;

    fn generator() -> CompletenessGenerator {
        CompletenessGenerator::new(base(RuleCategory::DataCompleteness, DEFAULT_TEMPLATE))
    }

    #[test]
    fn test_one_union_branch_per_column() -> anyhow::Result<()> {
        let rules = BTreeMap::from([(
            "users".to_string(),
            BTreeMap::from([("email".to_string(), 5.0), ("phone".to_string(), 20.5)]),
        )]);

        let assertions = generator().generate(&options(), &shared(), &rules)?;

        assert_eq!(assertions.len(), 1);
        let query = &assertions[0].query;
        assert_eq!(query.matches("UNION ALL").count(), 1);
        assert!(query.contains("'email' AS column_name"));
        assert!(query.contains("20.5 AS allowed_null_percentage"));
        assert!(query.contains("CASE WHEN phone IS NULL"));
        assert!(query.ends_with("WHERE null_percentage > allowed_null_percentage"));
        assert_eq!(
            assertions[0].description,
            "Null percentage in users: email <= 5%, phone <= 20.5%"
        );
        Ok(())
    }

    #[test]
    fn test_table_without_columns_is_skipped() -> anyhow::Result<()> {
        let rules = BTreeMap::from([("users".to_string(), BTreeMap::new())]);
        let assertions = generator().generate(&options(), &shared(), &rules)?;
        assert!(assertions.is_empty());
        Ok(())
    }
}
