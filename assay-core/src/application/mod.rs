// assay-core/src/application/mod.rs

pub mod clean;
pub mod compiler;
pub mod generators;
pub mod ports;

// --- RE-EXPORTS (FACADE PATTERN) ---
// Lets the CLI write `use assay_core::application::{RuleSetCompiler, clean_project};`
// without knowing the file layout.

pub use clean::clean_project;
pub use compiler::{GeneratorSet, RuleSetCompiler};
