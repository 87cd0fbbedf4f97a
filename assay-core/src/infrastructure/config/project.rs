// assay-core/src/infrastructure/config/project.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::domain::project::ProjectConfig;
use crate::infrastructure::error::InfrastructureError;

const CONFIG_CANDIDATES: [&str; 3] = ["assay.yaml", "assay.yml", "assay_project.yaml"];

#[instrument(skip(project_dir))]
pub fn load_project_config(project_dir: &Path) -> Result<ProjectConfig, InfrastructureError> {
    // 1. Locate the project file
    let config_path = find_main_config(project_dir)?;
    info!(path = ?config_path, "Loading project configuration");

    // 2. Base YAML
    let content = fs::read_to_string(&config_path)?;
    let mut config: ProjectConfig = serde_yaml::from_str(&content)?;

    // 3. Environment layering, e.g. ASSAY_ENV=prod assay compile
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    Ok(config)
}

fn find_main_config(root: &Path) -> Result<PathBuf, InfrastructureError> {
    for filename in CONFIG_CANDIDATES {
        let p = root.join(filename);
        if p.exists() {
            return Ok(p);
        }
    }
    Err(InfrastructureError::ConfigNotFound(format!(
        "No configuration file found in {:?}. Checked: {:?}",
        root, CONFIG_CANDIDATES
    )))
}

fn apply_env_overrides(config: &mut ProjectConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(val) = lookup("ASSAY_DATABASE") {
        info!(new = ?val, "Overriding default database via ENV");
        config.warehouse.database = Some(val);
    }
    if let Some(val) = lookup("ASSAY_SCHEMA") {
        info!(new = ?val, "Overriding assertion schema via ENV");
        config.warehouse.assertion_schema = Some(val);
    }
    if let Some(val) = lookup("ASSAY_LOCATION") {
        info!(new = ?val, "Overriding location via ENV");
        config.warehouse.location = Some(val);
    }
    if let Some(val) = lookup("ASSAY_TARGET_PATH") {
        info!(old = ?config.target_path, new = ?val, "Overriding target path via ENV");
        config.target_path = val;
    }
    if let Some(val) = lookup("ASSAY_ENV") {
        info!(old = ?config.environment, new = ?val, "Overriding environment via ENV");
        config.environment = Some(val);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::collections::HashMap;

    const PROJECT: &str = r#"
name: shop
version: "1.0"
warehouse:
  database: my-project
  assertion_schema: dq
dialect: ansi
rule-paths: [rules, more_rules]
"#;

    #[test]
    fn test_load_project_config() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("assay.yaml"), PROJECT)?;

        let config = load_project_config(dir.path())?;

        assert_eq!(config.name, "shop");
        assert_eq!(config.rule_paths, vec!["rules", "more_rules"]);
        assert_eq!(config.defaults()?.database, "my-project");
        Ok(())
    }

    #[test]
    fn test_missing_config_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        assert!(matches!(
            load_project_config(dir.path()),
            Err(InfrastructureError::ConfigNotFound(_))
        ));
        Ok(())
    }

    #[test]
    fn test_env_overrides_are_layered() -> Result<()> {
        let mut config: ProjectConfig = serde_yaml::from_str(PROJECT)?;
        let env = HashMap::from([
            ("ASSAY_SCHEMA", "dq_ci"),
            ("ASSAY_ENV", "ci"),
            ("ASSAY_TARGET_PATH", "build"),
        ]);

        apply_env_overrides(&mut config, |key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.warehouse.assertion_schema.as_deref(), Some("dq_ci"));
        assert_eq!(config.warehouse.database.as_deref(), Some("my-project"));
        assert_eq!(config.environment.as_deref(), Some("ci"));
        assert_eq!(config.target_path, "build");
        Ok(())
    }
}
