// assay/src/commands/compile.rs
//
// USE CASE: Compile rule files into target/assertions.json.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use comfy_table::{Table, presets::UTF8_FULL};
use tracing::info;

use assay_core::AssayError;
use assay_core::domain::{CompiledRuleSet, RuleCategory};
use assay_core::infrastructure::fs::save_json;

use super::project::LoadedProject;
use crate::cli::OutputFormat;

pub const ASSERTIONS_FILE: &str = "assertions.json";

pub async fn execute(
    project_dir: &Path,
    env: Option<String>,
    parallel: bool,
    strict: bool,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let start = Instant::now();
    let verbose = format == OutputFormat::Table;

    if verbose {
        println!("⚙️  Loading configuration...");
    }
    let project = LoadedProject::load(project_dir, strict)?;
    if verbose {
        println!(
            "   Project: {} (v{})",
            project.config.name, project.config.version
        );
    }

    let mut compiled = if parallel {
        let input = Arc::new(project.input.clone());
        project.compiler.compile_concurrent(input).await?
    } else {
        project.compiler.compile(&project.input)?
    };

    if let Some(env) = project.environment(env) {
        let before = compiled.len();
        compiled.retain_enabled_in(&env);
        info!(env = %env, dropped = before - compiled.len(), "Environment filter applied");
    }

    let output = project.target_dir().join(ASSERTIONS_FILE);
    save_json(&output, &compiled).map_err(AssayError::from)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&compiled)?),
        OutputFormat::Table => {
            println!("{}", summary_table(&compiled));
            println!(
                "\n✨ {} assertions written to {} in {:.2?}",
                compiled.len(),
                output.display(),
                start.elapsed()
            );
        }
    }

    Ok(())
}

fn summary_table(compiled: &CompiledRuleSet) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Category", "Tables", "Assertions"]);

    for category in RuleCategory::ALL {
        let assertions = compiled.get(category);
        let tables: BTreeSet<&str> = assertions.iter().map(|a| a.table.as_str()).collect();
        table.add_row(vec![
            category.to_string(),
            tables.len().to_string(),
            assertions.len().to_string(),
        ]);
    }
    table
}
