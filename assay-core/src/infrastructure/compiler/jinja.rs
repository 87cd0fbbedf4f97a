// assay-core/src/infrastructure/compiler/jinja.rs

// Renders assertion query templates. Generators pass a JSON context
// (table reference, columns, thresholds...) and get back plain SQL.

use minijinja::{Environment, UndefinedBehavior};

use crate::application::ports::TemplateEngine;
use crate::domain::compiler::{Quoter, SqlDialect};
use crate::error::AssayError;
use crate::infrastructure::error::InfrastructureError;

pub struct JinjaRenderer {
    env: Environment<'static>,
}

impl JinjaRenderer {
    pub fn new() -> Self {
        Self::with_dialect(SqlDialect::default())
    }

    pub fn with_dialect(dialect: SqlDialect) -> Self {
        let mut env = Environment::new();

        // A typo in a user template must fail loudly rather than render an empty string.
        env.set_undefined_behavior(UndefinedBehavior::Strict);

        let quoter = Quoter::new(dialect);

        // {{ ref('sales.orders') }} -> quoted table path for the dialect
        env.add_function("ref", move |table: String| -> String { quoter.table_ref(&table) });

        // {{ quote('column') }} -> quoted identifier
        env.add_function("quote", move |ident: String| -> String { quoter.quote_ident(&ident) });

        Self { env }
    }
}

impl Default for JinjaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for JinjaRenderer {
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String, AssayError> {
        self.env
            .render_str(template, context)
            .map_err(|e| AssayError::Infrastructure(InfrastructureError::TemplateError(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::json;

    #[test]
    fn test_render_with_context() -> Result<()> {
        let renderer = JinjaRenderer::new();
        let result = renderer.render(
            "SELECT * FROM {{ table_ref }} WHERE NOT ({{ predicate }})",
            &json!({ "table_ref": "`orders`", "predicate": "amount > 0" }),
        )?;
        assert_eq!(result, "SELECT * FROM `orders` WHERE NOT (amount > 0)");
        Ok(())
    }

    #[test]
    fn test_undefined_variable_is_an_error() {
        let renderer = JinjaRenderer::new();
        let result = renderer.render("SELECT * FROM {{ tabel }}", &json!({ "table": "orders" }));
        assert!(matches!(
            result,
            Err(AssayError::Infrastructure(InfrastructureError::TemplateError(_)))
        ));
    }

    #[test]
    fn test_ref_follows_dialect() -> Result<()> {
        let bigquery = JinjaRenderer::with_dialect(SqlDialect::BigQuery);
        assert_eq!(
            bigquery.render("{{ ref('sales.orders') }}", &json!({}))?,
            "`sales.orders`"
        );

        let ansi = JinjaRenderer::with_dialect(SqlDialect::Ansi);
        assert_eq!(
            ansi.render("{{ ref('sales.orders') }} {{ quote('id') }}", &json!({}))?,
            "\"sales\".\"orders\" \"id\""
        );
        Ok(())
    }
}
