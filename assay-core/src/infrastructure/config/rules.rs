// assay-core/src/infrastructure/config/rules.rs

// Rule files are RuleSetInput fragments (YAML or JSON). Every file found under
// the configured rule paths is folded into one input, in path order.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

use crate::domain::rules::{RuleCategory, RuleSetInput};
use crate::error::AssayError;
use crate::infrastructure::error::InfrastructureError;

const RULE_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

/// Loads and merges every rule file below `rule_paths` (relative to `project_dir`).
#[instrument(skip(project_dir))]
pub fn load_rule_set(project_dir: &Path, rule_paths: &[String]) -> Result<RuleSetInput, AssayError> {
    let mut merged = RuleSetInput::default();
    let mut file_count = 0;

    for rel in rule_paths {
        let root = project_dir.join(rel);
        if !root.exists() {
            warn!(path = ?root, "Rule path does not exist, skipping");
            continue;
        }

        for file in discover_rule_files(&root) {
            let fragment = load_rule_file(&file)?;
            merged = merged.absorb(fragment)?;
            file_count += 1;
        }
    }

    info!(
        files = file_count,
        tables = RuleCategory::ALL
            .iter()
            .map(|c| merged.table_count(*c))
            .sum::<usize>(),
        "Rule files loaded"
    );
    Ok(merged)
}

/// Parses one rule file. JSON files go through serde_json, everything else through YAML.
pub fn load_rule_file(path: &Path) -> Result<RuleSetInput, InfrastructureError> {
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        debug!(path = ?path, "Empty rule file");
        return Ok(RuleSetInput::default());
    }

    let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
    let parsed: Result<RuleSetInput, String> = if is_json {
        serde_json::from_str(&content).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(&content).map_err(|e| e.to_string())
    };

    parsed.map_err(|e| {
        InfrastructureError::ConfigError(format!("Invalid rule file {:?}: {}", path, e))
    })
}

fn discover_rule_files(root: &Path) -> Vec<PathBuf> {
    if root.is_file() {
        return vec![root.to_path_buf()];
    }

    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                warn!(error = %err, "Skipping unreadable entry");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            p.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| RULE_EXTENSIONS.contains(&ext))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use anyhow::Result;

    fn write(dir: &Path, rel: &str, content: &str) -> Result<()> {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    #[test]
    fn test_merges_yaml_and_json_fragments() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write(
            dir.path(),
            "rules/a_orders.yaml",
            "rowConditions:\n  orders:\n    positiveAmount: amount > 0\n",
        )?;
        write(
            dir.path(),
            "rules/nested/b_users.json",
            r#"{"uniqueKeyConditions": {"users": ["id"]}, "globalAssertionsParams": {"tags": ["nightly"]}}"#,
        )?;
        write(dir.path(), "rules/README.md", "ignored")?;

        let input = load_rule_set(dir.path(), &["rules".to_string()])?;

        assert_eq!(input.row_conditions.len(), 1);
        assert_eq!(input.unique_key_conditions.len(), 1);
        assert!(
            input
                .global_options
                .tags
                .as_ref()
                .is_some_and(|t| t.contains("nightly"))
        );
        Ok(())
    }

    #[test]
    fn test_later_file_wins_for_global_options() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write(dir.path(), "rules/01.yaml", "globalAssertionsParams: { schema: first }\n")?;
        write(dir.path(), "rules/02.yaml", "globalAssertionsParams: { schema: second }\n")?;

        let input = load_rule_set(dir.path(), &["rules".to_string()])?;

        assert_eq!(input.global_options.schema.as_deref(), Some("second"));
        Ok(())
    }

    #[test]
    fn test_duplicate_table_across_files() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write(dir.path(), "rules/a.yaml", "uniqueKeyConditions: { users: [id] }\n")?;
        write(dir.path(), "rules/b.yaml", "uniqueKeyConditions: { users: [email] }\n")?;

        let result = load_rule_set(dir.path(), &["rules".to_string()]);

        assert!(matches!(
            result,
            Err(AssayError::Domain(DomainError::DuplicateRuleDefinition { .. }))
        ));
        Ok(())
    }

    #[test]
    fn test_invalid_file_names_the_path() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write(dir.path(), "rules/bad.yaml", "uniqueKeyConditions: [oops]\n")?;

        match load_rule_set(dir.path(), &["rules".to_string()]) {
            Err(AssayError::Infrastructure(InfrastructureError::ConfigError(msg))) => {
                assert!(msg.contains("bad.yaml"));
                Ok(())
            }
            other => anyhow::bail!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_rule_path_and_empty_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write(dir.path(), "rules/empty.yaml", "\n")?;

        let input = load_rule_set(dir.path(), &["rules".to_string(), "absent".to_string()])?;

        assert!(input.is_empty());
        Ok(())
    }

    #[test]
    fn test_single_file_rule_path() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write(dir.path(), "checks.yml", "uniqueKeyConditions: { users: [id] }\n")?;

        let input = load_rule_set(dir.path(), &["checks.yml".to_string()])?;

        assert_eq!(input.unique_key_conditions.len(), 1);
        Ok(())
    }
}
