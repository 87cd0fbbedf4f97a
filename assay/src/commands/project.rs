// assay/src/commands/project.rs
//
// Wiring shared by every command that compiles: config -> defaults -> generators -> compiler.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use assay_core::application::{GeneratorSet, RuleSetCompiler};
use assay_core::AssayError;
use assay_core::domain::compiler::Quoter;
use assay_core::domain::{ProjectConfig, RuleSetInput, ValidationMode};
use assay_core::infrastructure::compiler::JinjaRenderer;
use assay_core::infrastructure::config::{load_project_config, load_rule_set};

pub struct LoadedProject {
    pub dir: PathBuf,
    pub config: ProjectConfig,
    pub compiler: RuleSetCompiler,
    pub input: RuleSetInput,
}

impl LoadedProject {
    /// Loads `assay.yaml` and the rule files, and builds a compiler over the built-in generators.
    pub fn load(project_dir: &Path, force_strict: bool) -> anyhow::Result<Self> {
        let config = load_project_config(project_dir).map_err(AssayError::from)?;
        let defaults = config.defaults().map_err(AssayError::from)?;

        let dialect = config.dialect;
        let renderer = Arc::new(JinjaRenderer::with_dialect(dialect));
        let generators = GeneratorSet::builtin(renderer, Quoter::new(dialect), &config.templates);

        let validation = if force_strict {
            ValidationMode::Strict
        } else {
            config.validation
        };
        let compiler = RuleSetCompiler::new(defaults, generators).with_validation(validation, dialect);

        let input = load_rule_set(project_dir, &config.rule_paths)?;

        Ok(Self {
            dir: project_dir.to_path_buf(),
            config,
            compiler,
            input,
        })
    }

    /// Environment used to filter assertions: explicit flag first, then the project setting.
    pub fn environment(&self, flag: Option<String>) -> Option<String> {
        flag.or_else(|| self.config.environment.clone())
    }

    pub fn target_dir(&self) -> PathBuf {
        self.dir.join(&self.config.target_path)
    }
}
