// assay-core/src/application/generators/mod.rs

// Built-in generators: each renders one query template per assertion through
// the TemplateEngine port. Any of them can be swapped out in a GeneratorSet.

pub mod completeness;
pub mod freshness;
pub mod referential;
pub mod row_condition;
pub mod unique_key;

pub use completeness::CompletenessGenerator;
pub use freshness::FreshnessGenerator;
pub use referential::ReferentialIntegrityGenerator;
pub use row_condition::RowConditionGenerator;
pub use unique_key::UniqueKeyGenerator;

use regex::Regex;
use std::sync::{Arc, OnceLock};

use crate::application::compiler::GeneratorSet;
use crate::application::ports::TemplateEngine;
use crate::domain::assertion::AssertionDefinition;
use crate::domain::compiler::Quoter;
use crate::domain::options::{GlobalOptions, SharedConfig};
use crate::domain::project::TemplateOverrides;
use crate::domain::rules::RuleCategory;
use crate::error::AssayError;

fn re_unsafe_name_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[^A-Za-z0-9_]+")
            .unwrap_or_else(|_| Regex::new("$^").unwrap_or_else(|_| unreachable!()))
    })
}

/// Joins name parts with `_`, replacing anything outside `[A-Za-z0-9_]`.
pub fn assertion_name(parts: &[&str]) -> String {
    let joined = parts.join("_");
    re_unsafe_name_chars().replace_all(&joined, "_").into_owned()
}

/// State and helpers shared by every built-in generator.
pub struct GeneratorBase {
    category: RuleCategory,
    engine: Arc<dyn TemplateEngine>,
    quoter: Quoter,
    template: String,
}

impl GeneratorBase {
    pub fn new(
        category: RuleCategory,
        engine: Arc<dyn TemplateEngine>,
        quoter: Quoter,
        template: impl Into<String>,
    ) -> Self {
        Self {
            category,
            engine,
            quoter,
            template: template.into(),
        }
    }

    pub fn quoter(&self) -> &Quoter {
        &self.quoter
    }

    pub fn render(&self, context: &serde_json::Value) -> Result<String, AssayError> {
        self.engine.render(&self.template, context)
    }

    /// Stamps the effective options and shared config onto a rendered query.
    pub fn definition(
        &self,
        options: &GlobalOptions,
        shared: &SharedConfig,
        table: &str,
        name: String,
        description: String,
        query: String,
    ) -> AssertionDefinition {
        AssertionDefinition {
            name,
            category: self.category,
            table: table.to_string(),
            database: options.database.clone(),
            schema: options.schema.clone(),
            location: options.location.clone(),
            tags: options.tags.clone(),
            disabled_in_envs: options.disabled_in_envs.clone(),
            description,
            query,
            config: shared.as_map().clone(),
        }
    }
}

impl GeneratorSet {
    /// The five built-in generators, with project template overrides applied.
    pub fn builtin(
        engine: Arc<dyn TemplateEngine>,
        quoter: Quoter,
        overrides: &TemplateOverrides,
    ) -> Self {
        let template = |category: RuleCategory, default: &str| -> String {
            overrides.get(category).unwrap_or(default).to_string()
        };

        Self {
            row_condition: Arc::new(RowConditionGenerator::new(GeneratorBase::new(
                RuleCategory::RowCondition,
                engine.clone(),
                quoter,
                template(RuleCategory::RowCondition, row_condition::DEFAULT_TEMPLATE),
            ))),
            unique_key: Arc::new(UniqueKeyGenerator::new(GeneratorBase::new(
                RuleCategory::UniqueKey,
                engine.clone(),
                quoter,
                template(RuleCategory::UniqueKey, unique_key::DEFAULT_TEMPLATE),
            ))),
            data_freshness: Arc::new(FreshnessGenerator::new(GeneratorBase::new(
                RuleCategory::DataFreshness,
                engine.clone(),
                quoter,
                template(RuleCategory::DataFreshness, freshness::DEFAULT_TEMPLATE),
            ))),
            data_completeness: Arc::new(CompletenessGenerator::new(GeneratorBase::new(
                RuleCategory::DataCompleteness,
                engine.clone(),
                quoter,
                template(RuleCategory::DataCompleteness, completeness::DEFAULT_TEMPLATE),
            ))),
            referential_integrity: Arc::new(ReferentialIntegrityGenerator::new(
                GeneratorBase::new(
                    RuleCategory::ReferentialIntegrity,
                    engine,
                    quoter,
                    template(RuleCategory::ReferentialIntegrity, referential::DEFAULT_TEMPLATE),
                ),
            )),
        }
    }
}
