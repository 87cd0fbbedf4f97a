// assay-core/src/application/generators/freshness.rs

use serde_json::json;
use tracing::debug;

use super::{GeneratorBase, assertion_name};
use crate::application::ports::AssertionGenerator;
use crate::domain::assertion::AssertionSet;
use crate::domain::options::{GlobalOptions, SharedConfig};
use crate::domain::rules::{FreshnessSpec, RuleMap};
use crate::error::AssayError;

// An empty table has a NULL delay and is reported as stale.
pub const DEFAULT_TEMPLATE: &str = r#"WITH freshness AS (
  SELECT
    {% if intraday -%}
    TIMESTAMP_DIFF(CURRENT_TIMESTAMP(), MAX(CAST({{ date_column }} AS TIMESTAMP)), {{ time_unit }})
    {%- else -%}
    DATE_DIFF(CURRENT_DATE(), MAX(DATE({{ date_column }})), {{ time_unit }})
    {%- endif %} AS delay
  FROM {{ table_ref }}
)
SELECT *
FROM freshness
WHERE delay > {{ delay }} OR delay IS NULL"#;

/// One assertion per table: the newest value of the date column is too old.
pub struct FreshnessGenerator {
    base: GeneratorBase,
}

impl FreshnessGenerator {
    pub fn new(base: GeneratorBase) -> Self {
        Self { base }
    }
}

impl AssertionGenerator<FreshnessSpec> for FreshnessGenerator {
    fn generate(
        &self,
        options: &GlobalOptions,
        shared: &SharedConfig,
        rules: &RuleMap<FreshnessSpec>,
    ) -> Result<AssertionSet, AssayError> {
        let mut assertions = AssertionSet::new();

        for (table, spec) in rules {
            let query = self.base.render(&json!({
                "table": table,
                "table_ref": self.base.quoter().table_ref(table),
                "date_column": spec.date_column,
                "time_unit": spec.time_unit.as_str(),
                "intraday": spec.time_unit.is_intraday(),
                "delay": spec.delay,
            }))?;

            let name = assertion_name(&[table, "freshness"]);
            debug!(assertion = %name, "Rendered freshness assertion");

            assertions.push(self.base.definition(
                options,
                shared,
                table,
                name,
                format!(
                    "Latest {} in {} is at most {} {} old",
                    spec.date_column, table, spec.delay, spec.time_unit
                ),
                query,
            ));
        }

        Ok(assertions)
    }
}
