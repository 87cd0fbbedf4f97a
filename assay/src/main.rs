// assay/src/main.rs

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use assay_core::AssayError;

mod cli;
mod commands;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    // RUST_LOG=debug assay compile ... to see the details.
    // Logs go to stderr so `--format json` stays pipeable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compile {
            project_dir,
            env,
            parallel,
            strict,
            format,
        } => commands::compile::execute(&project_dir, env, parallel, strict, format).await,
        Commands::Validate { project_dir } => commands::validate::execute(&project_dir),
        Commands::Show { name, project_dir } => commands::show::execute(&project_dir, &name),
        Commands::Clean { project_dir } => commands::clean::execute(&project_dir),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(err);
            ExitCode::FAILURE
        }
    }
}

/// Library errors carry miette diagnostics (codes, help); everything else is printed plainly.
fn report(err: anyhow::Error) {
    match err.downcast::<AssayError>() {
        Ok(assay_err) => eprintln!("{:?}", miette::Report::new(assay_err)),
        Err(other) => eprintln!("❌ {:#}", other),
    }
}
