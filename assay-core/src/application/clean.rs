// assay-core/src/application/clean.rs

use std::fs;
use std::path::{Component, Path};

use crate::error::AssayError;
use crate::infrastructure::config::project::load_project_config;

/// Removes the compiled output directory of a project.
pub fn clean_project(project_dir: &Path) -> Result<(), AssayError> {
    tracing::info!("🧹 Cleaning compiled assertions...");

    let config = load_project_config(project_dir)?;
    let target_rel_path = config.target_path;

    let relative = Path::new(&target_rel_path);
    if !is_inside_project(relative) {
        return Err(AssayError::UnsafePath(target_rel_path));
    }

    let full_path = project_dir.join(relative);
    if full_path.is_dir() {
        fs::remove_dir_all(&full_path)?;
        println!("   🗑️  Artifact removed: {}", target_rel_path);
    } else if full_path.exists() {
        fs::remove_file(&full_path)?;
        println!("   🗑️  Artifact removed: {}", target_rel_path);
    }

    Ok(())
}

/// The target must name a directory strictly below the project root:
/// relative, no `..`, and not just `.` or empty.
fn is_inside_project(relative: &Path) -> bool {
    let mut has_normal = false;
    for component in relative.components() {
        match component {
            Component::Normal(_) => has_normal = true,
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return false,
        }
    }
    has_normal
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn project(target: &str) -> Result<tempfile::TempDir> {
        let dir = tempfile::tempdir()?;
        fs::write(
            dir.path().join("assay.yaml"),
            format!(
                "name: demo\nversion: '1'\ntarget-path: '{}'\nwarehouse: {{ database: p, schema: s }}\n",
                target
            ),
        )?;
        Ok(dir)
    }

    #[test]
    fn test_clean_removes_target_dir() -> Result<()> {
        let dir = project("target")?;
        let target = dir.path().join("target");
        fs::create_dir_all(&target)?;
        fs::write(target.join("assertions.json"), "{}")?;

        clean_project(dir.path())?;

        assert!(!target.exists());
        Ok(())
    }

    #[test]
    fn test_clean_is_noop_without_target() -> Result<()> {
        let dir = project("target")?;
        clean_project(dir.path())?;
        Ok(())
    }

    #[test]
    fn test_clean_refuses_project_root_as_target() -> Result<()> {
        for target in [".", "", "./", "./."] {
            let dir = project(target)?;
            fs::create_dir_all(dir.path().join("rules"))?;

            assert!(
                matches!(clean_project(dir.path()), Err(AssayError::UnsafePath(_))),
                "target {:?} must be refused",
                target
            );
            assert!(dir.path().join("assay.yaml").exists());
            assert!(dir.path().join("rules").exists());
        }
        Ok(())
    }

    #[test]
    fn test_clean_accepts_nested_target() -> Result<()> {
        let dir = project("./build/out")?;
        let target = dir.path().join("build/out");
        fs::create_dir_all(&target)?;

        clean_project(dir.path())?;

        assert!(!target.exists());
        assert!(dir.path().join("build").exists());
        Ok(())
    }

    #[test]
    fn test_clean_refuses_escaping_paths() -> Result<()> {
        let dir = project("../outside")?;
        assert!(matches!(
            clean_project(dir.path()),
            Err(AssayError::UnsafePath(_))
        ));
        Ok(())
    }
}
