// assay/src/commands/clean.rs
//
// USE CASE: Clean build artifacts.

use std::path::Path;

use assay_core::application::clean_project;

pub fn execute(project_dir: &Path) -> anyhow::Result<()> {
    clean_project(project_dir)?;
    println!("🧹 Build artifacts removed.");
    Ok(())
}
