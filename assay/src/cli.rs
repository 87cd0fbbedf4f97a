// assay/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "assay")]
#[command(about = "Compiles declarative data quality rules into warehouse assertions", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🧪 Compiles the rule files into assertion definitions (target/assertions.json)
    Compile {
        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Drop assertions disabled in this environment (defaults to the project environment)
        #[arg(long, env = "ASSAY_ENV")]
        env: Option<String>,

        /// Run the five category generators concurrently
        #[arg(long)]
        parallel: bool,

        /// Validate every rule before generation, whatever the project says
        #[arg(long)]
        strict: bool,

        /// Summary output: table | json
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// ✅ Checks rule files without writing anything
    Validate {
        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },

    /// 🔎 Prints the query of a single compiled assertion
    Show {
        /// Assertion name (ex: "orders_unique_key")
        name: String,

        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },

    /// 🧹 Cleans build artifacts (target/ folder)
    Clean {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, bail};
    use clap::Parser;

    #[test]
    fn test_cli_parse_compile_defaults() -> Result<()> {
        let args = Cli::try_parse_from(["assay", "compile"])?;
        match args.command {
            Commands::Compile {
                project_dir,
                parallel,
                strict,
                format,
                ..
            } => {
                assert_eq!(project_dir.to_string_lossy(), ".");
                assert!(!parallel);
                assert!(!strict);
                assert_eq!(format, OutputFormat::Table);
                Ok(())
            }
            _ => bail!("Expected Compile command"),
        }
    }

    #[test]
    fn test_cli_parse_compile_flags() -> Result<()> {
        let args = Cli::try_parse_from([
            "assay",
            "compile",
            "--project-dir",
            "/tmp/shop",
            "--env",
            "prod",
            "--parallel",
            "--strict",
            "--format",
            "json",
        ])?;
        match args.command {
            Commands::Compile {
                project_dir,
                env,
                parallel,
                strict,
                format,
            } => {
                assert_eq!(project_dir.to_string_lossy(), "/tmp/shop");
                assert_eq!(env.as_deref(), Some("prod"));
                assert!(parallel && strict);
                assert_eq!(format, OutputFormat::Json);
                Ok(())
            }
            _ => bail!("Expected Compile command"),
        }
    }

    #[test]
    fn test_cli_parse_show() -> Result<()> {
        let args = Cli::try_parse_from(["assay", "show", "orders_unique_key"])?;
        match args.command {
            Commands::Show { name, project_dir } => {
                assert_eq!(name, "orders_unique_key");
                assert_eq!(project_dir.to_string_lossy(), ".");
                Ok(())
            }
            _ => bail!("Expected Show command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["assay", "compile", "--format", "xml"]).is_err());
    }
}
