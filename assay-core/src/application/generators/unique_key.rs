// assay-core/src/application/generators/unique_key.rs

use serde_json::json;
use tracing::{debug, warn};

use super::{GeneratorBase, assertion_name};
use crate::application::ports::AssertionGenerator;
use crate::domain::assertion::AssertionSet;
use crate::domain::options::{GlobalOptions, SharedConfig};
use crate::domain::rules::{RuleMap, UniqueKeySpec};
use crate::error::AssayError;

pub const DEFAULT_TEMPLATE: &str = r#"SELECT
  {{ columns | join(", ") }},
  COUNT(*) AS duplicate_count
FROM {{ table_ref }}
GROUP BY {{ columns | join(", ") }}
HAVING COUNT(*) > 1"#;

/// One assertion per table: key combinations appearing more than once.
pub struct UniqueKeyGenerator {
    base: GeneratorBase,
}

impl UniqueKeyGenerator {
    pub fn new(base: GeneratorBase) -> Self {
        Self { base }
    }
}

impl AssertionGenerator<UniqueKeySpec> for UniqueKeyGenerator {
    fn generate(
        &self,
        options: &GlobalOptions,
        shared: &SharedConfig,
        rules: &RuleMap<UniqueKeySpec>,
    ) -> Result<AssertionSet, AssayError> {
        let mut assertions = AssertionSet::new();

        for (table, columns) in rules {
            if columns.is_empty() {
                warn!(table = %table, "Unique key without columns, no assertion generated");
                continue;
            }

            let query = self.base.render(&json!({
                "table": table,
                "table_ref": self.base.quoter().table_ref(table),
                "columns": columns,
            }))?;

            let name = assertion_name(&[table, "unique_key"]);
            debug!(assertion = %name, "Rendered unique key assertion");

            assertions.push(self.base.definition(
                options,
                shared,
                table,
                name,
                format!("Columns ({}) are unique in {}", columns.join(", "), table),
                query,
            ));
        }

        Ok(assertions)
    }
}
