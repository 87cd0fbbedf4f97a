// assay/src/commands/show.rs
//
// USE CASE: Print the query of one compiled assertion.

use std::path::Path;

use super::project::LoadedProject;

pub fn execute(project_dir: &Path, name: &str) -> anyhow::Result<()> {
    let project = LoadedProject::load(project_dir, false)?;
    let compiled = project.compiler.compile(&project.input)?;

    let Some(assertion) = compiled.find(name) else {
        anyhow::bail!(
            "No assertion named '{}'\n👉 Run 'assay compile' to list the generated assertions.",
            name
        );
    };

    println!("-- {} ({})", assertion.qualified_name(), assertion.category);
    println!("-- {}", assertion.description);
    println!("{}", assertion.query);
    Ok(())
}
