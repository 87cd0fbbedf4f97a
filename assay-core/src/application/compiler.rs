// assay-core/src/application/compiler.rs

// Rule set compilation: resolve global options against the project defaults,
// then hand each rule map to its category generator.

use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::application::ports::AssertionGenerator;
use crate::domain::assertion::{AssertionSet, CompiledRuleSet};
use crate::domain::compiler::{RuleValidator, SqlDialect};
use crate::domain::error::DomainError;
use crate::domain::options::{GlobalOptions, GlobalOptionsOverrides, SharedConfig};
use crate::domain::project::{ProjectDefaults, ValidationMode};
use crate::domain::rules::{
    CompletenessSpec, FreshnessSpec, ReferentialIntegritySpec, RowConditionSet, RuleCategory,
    RuleMap, RuleSetInput, UniqueKeySpec,
};
use crate::error::AssayError;

/// One generator per rule category.
#[derive(Clone)]
pub struct GeneratorSet {
    pub row_condition: Arc<dyn AssertionGenerator<RowConditionSet>>,
    pub unique_key: Arc<dyn AssertionGenerator<UniqueKeySpec>>,
    pub data_freshness: Arc<dyn AssertionGenerator<FreshnessSpec>>,
    pub data_completeness: Arc<dyn AssertionGenerator<CompletenessSpec>>,
    pub referential_integrity: Arc<dyn AssertionGenerator<ReferentialIntegritySpec>>,
}

pub struct RuleSetCompiler {
    defaults: ProjectDefaults,
    generators: GeneratorSet,
    validation: ValidationMode,
    dialect: SqlDialect,
}

impl RuleSetCompiler {
    pub fn new(defaults: ProjectDefaults, generators: GeneratorSet) -> Self {
        Self {
            defaults,
            generators,
            validation: ValidationMode::default(),
            dialect: SqlDialect::default(),
        }
    }

    pub fn with_validation(mut self, validation: ValidationMode, dialect: SqlDialect) -> Self {
        self.validation = validation;
        self.dialect = dialect;
        self
    }

    pub fn defaults(&self) -> &ProjectDefaults {
        &self.defaults
    }

    /// Defaults overlaid with the caller's keys. Present keys replace, never merge.
    pub fn effective_options(&self, overrides: &GlobalOptionsOverrides) -> GlobalOptions {
        GlobalOptions::defaults(&self.defaults).merged(overrides)
    }

    /// Compiles every category sequentially. Fails on the first generator error.
    #[instrument(skip_all, fields(validation = ?self.validation))]
    pub fn compile(&self, input: &RuleSetInput) -> Result<CompiledRuleSet, AssayError> {
        let options = self.prepare(input)?;
        let shared = &input.config;
        let g = &self.generators;

        let compiled = CompiledRuleSet {
            row_condition_assertions: run(
                RuleCategory::RowCondition,
                g.row_condition.as_ref(),
                &options,
                shared,
                &input.row_conditions,
            )?,
            unique_key_assertions: run(
                RuleCategory::UniqueKey,
                g.unique_key.as_ref(),
                &options,
                shared,
                &input.unique_key_conditions,
            )?,
            data_freshness_assertions: run(
                RuleCategory::DataFreshness,
                g.data_freshness.as_ref(),
                &options,
                shared,
                &input.data_freshness_conditions,
            )?,
            data_completeness_assertions: run(
                RuleCategory::DataCompleteness,
                g.data_completeness.as_ref(),
                &options,
                shared,
                &input.data_completeness_conditions,
            )?,
            referential_integrity_assertions: run(
                RuleCategory::ReferentialIntegrity,
                g.referential_integrity.as_ref(),
                &options,
                shared,
                &input.referential_integrity_conditions,
            )?,
        };

        compiled.ensure_unique_names()?;
        info!(assertions = compiled.len(), "Rule set compiled");
        Ok(compiled)
    }

    /// Same contract as [`compile`](Self::compile), with the five generators
    /// running as independent blocking tasks joined before assembly.
    #[instrument(skip_all, fields(validation = ?self.validation))]
    pub async fn compile_concurrent(
        &self,
        input: Arc<RuleSetInput>,
    ) -> Result<CompiledRuleSet, AssayError> {
        let options = Arc::new(self.prepare(&input)?);
        let g = self.generators.clone();

        let (rows, keys, freshness, completeness, references) = tokio::try_join!(
            spawn_category(
                RuleCategory::RowCondition,
                g.row_condition,
                options.clone(),
                input.clone(),
                |i| &i.row_conditions,
            ),
            spawn_category(
                RuleCategory::UniqueKey,
                g.unique_key,
                options.clone(),
                input.clone(),
                |i| &i.unique_key_conditions,
            ),
            spawn_category(
                RuleCategory::DataFreshness,
                g.data_freshness,
                options.clone(),
                input.clone(),
                |i| &i.data_freshness_conditions,
            ),
            spawn_category(
                RuleCategory::DataCompleteness,
                g.data_completeness,
                options.clone(),
                input.clone(),
                |i| &i.data_completeness_conditions,
            ),
            spawn_category(
                RuleCategory::ReferentialIntegrity,
                g.referential_integrity,
                options,
                input,
                |i| &i.referential_integrity_conditions,
            ),
        )?;

        let compiled = CompiledRuleSet {
            row_condition_assertions: rows,
            unique_key_assertions: keys,
            data_freshness_assertions: freshness,
            data_completeness_assertions: completeness,
            referential_integrity_assertions: references,
        };

        compiled.ensure_unique_names()?;
        info!(assertions = compiled.len(), "Rule set compiled concurrently");
        Ok(compiled)
    }

    /// Validation (when strict) and defaulting, both done before fan-out.
    fn prepare(&self, input: &RuleSetInput) -> Result<GlobalOptions, AssayError> {
        if self.validation == ValidationMode::Strict {
            RuleValidator::new(self.dialect).validate(input)?;
        }

        let options = self.effective_options(&input.global_options);
        debug!(
            database = %options.database,
            schema = %options.schema,
            tags = options.tags.len(),
            "Resolved global options"
        );
        Ok(options)
    }
}

fn run<R>(
    category: RuleCategory,
    generator: &dyn AssertionGenerator<R>,
    options: &GlobalOptions,
    shared: &SharedConfig,
    rules: &RuleMap<R>,
) -> Result<AssertionSet, AssayError> {
    debug!(%category, tables = rules.len(), "Generating assertions");
    generator
        .generate(options, shared, rules)
        .map_err(|e| tag_failure(category, e))
}

async fn spawn_category<R, F>(
    category: RuleCategory,
    generator: Arc<dyn AssertionGenerator<R>>,
    options: Arc<GlobalOptions>,
    input: Arc<RuleSetInput>,
    select: F,
) -> Result<AssertionSet, AssayError>
where
    R: 'static,
    F: Fn(&RuleSetInput) -> &RuleMap<R> + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        run(
            category,
            generator.as_ref(),
            &options,
            &input.config,
            select(input.as_ref()),
        )
    })
    .await
    .map_err(|e| AssayError::InternalError(format!("{} generator task failed: {}", category, e)))?
}

fn tag_failure(category: RuleCategory, error: AssayError) -> AssayError {
    AssayError::Domain(DomainError::GeneratorFailure {
        category,
        source: Box::new(error),
    })
}
