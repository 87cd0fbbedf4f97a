// assay-core/src/application/generators/referential.rs

use serde_json::json;
use tracing::debug;

use super::{GeneratorBase, assertion_name};
use crate::application::ports::AssertionGenerator;
use crate::domain::assertion::AssertionSet;
use crate::domain::options::{GlobalOptions, SharedConfig};
use crate::domain::rules::{ReferentialIntegritySpec, RuleMap};
use crate::error::AssayError;

pub const DEFAULT_TEMPLATE: &str = r#"SELECT
  child.{{ child_key }} AS orphan_key,
  COUNT(*) AS orphan_rows
FROM {{ child_ref }} AS child
LEFT JOIN {{ parent_ref }} AS parent
  ON child.{{ child_key }} = parent.{{ parent_key }}
WHERE parent.{{ parent_key }} IS NULL
  AND child.{{ child_key }} IS NOT NULL
GROUP BY child.{{ child_key }}"#;

/// One assertion per reference: child keys with no matching parent row.
pub struct ReferentialIntegrityGenerator {
    base: GeneratorBase,
}

impl ReferentialIntegrityGenerator {
    pub fn new(base: GeneratorBase) -> Self {
        Self { base }
    }
}

impl AssertionGenerator<ReferentialIntegritySpec> for ReferentialIntegrityGenerator {
    fn generate(
        &self,
        options: &GlobalOptions,
        shared: &SharedConfig,
        rules: &RuleMap<ReferentialIntegritySpec>,
    ) -> Result<AssertionSet, AssayError> {
        let mut assertions = AssertionSet::new();

        for (parent, references) in rules {
            for reference in references {
                let query = self.base.render(&json!({
                    "parent_table": parent,
                    "parent_ref": self.base.quoter().table_ref(parent),
                    "parent_key": reference.parent_key,
                    "child_table": reference.child_table,
                    "child_ref": self.base.quoter().table_ref(&reference.child_table),
                    "child_key": reference.child_key,
                }))?;

                let name = assertion_name(&[
                    &reference.child_table,
                    &reference.child_key,
                    "references",
                    parent,
                    &reference.parent_key,
                ]);
                debug!(assertion = %name, "Rendered referential integrity assertion");

                assertions.push(self.base.definition(
                    options,
                    shared,
                    &reference.child_table,
                    name,
                    format!(
                        "Every {}.{} exists in {}.{}",
                        reference.child_table, reference.child_key, parent, reference.parent_key
                    ),
                    query,
                ));
            }
        }

        Ok(assertions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::generators::test_support::{base, options, shared};
    use crate::domain::rules::{ReferenceRule, RuleCategory};
    use std::collections::BTreeMap;

    fn generator() -> ReferentialIntegrityGenerator {
        ReferentialIntegrityGenerator::new(base(
            RuleCategory::ReferentialIntegrity,
            DEFAULT_TEMPLATE,
        ))
    }

    #[test]
    fn test_orphan_query_per_reference() -> anyhow::Result<()> {
        let rules = BTreeMap::from([(
            "users".to_string(),
            vec![
                ReferenceRule {
                    parent_key: "id".to_string(),
                    child_table: "orders".to_string(),
                    child_key: "user_id".to_string(),
                },
                ReferenceRule {
                    parent_key: "id".to_string(),
                    child_table: "reviews".to_string(),
                    child_key: "author_id".to_string(),
                },
            ],
        )]);

        let assertions = generator().generate(&options(), &shared(), &rules)?;

        assert_eq!(assertions.len(), 2);
        let orders = &assertions[0];
        assert_eq!(orders.name, "orders_user_id_references_users_id");
        assert_eq!(orders.table, "orders");
        assert!(orders.query.contains("FROM `orders` AS child"));
        assert!(orders.query.contains("LEFT JOIN `users` AS parent"));
        assert!(orders.query.contains("ON child.user_id = parent.id"));
        assert_eq!(assertions[1].name, "reviews_author_id_references_users_id");
        Ok(())
    }

    #[test]
    fn test_empty_map_yields_empty_set() -> anyhow::Result<()> {
        let assertions = generator().generate(&options(), &shared(), &BTreeMap::new())?;
        assert!(assertions.is_empty());
        Ok(())
    }
}
