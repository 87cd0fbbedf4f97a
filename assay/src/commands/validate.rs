// assay/src/commands/validate.rs
//
// USE CASE: Check rule files (dry run, nothing written).

use std::path::Path;

use assay_core::AssayError;
use assay_core::domain::RuleCategory;
use assay_core::domain::compiler::RuleValidator;

use super::project::LoadedProject;

pub fn execute(project_dir: &Path) -> anyhow::Result<()> {
    let project = LoadedProject::load(project_dir, false)?;

    RuleValidator::new(project.config.dialect)
        .validate(&project.input)
        .map_err(AssayError::from)?;

    // Generators can still reject what the validator accepts (templates, rendering).
    let compiled = project.compiler.compile(&project.input)?;

    for category in RuleCategory::ALL {
        println!(
            "   {:<24} {} tables",
            category.to_string(),
            project.input.table_count(category)
        );
    }
    println!("✅ Rules are valid ({} assertions).", compiled.len());
    Ok(())
}
