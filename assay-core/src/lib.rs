// assay-core/src/lib.rs

// 1. Mandatory documentation for production code
#![allow(missing_docs)]

// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Domain
// Rule payloads, global options, assertion definitions, validation.
// Depends on nothing else in the crate.
pub mod domain;

// 2. Infrastructure (Adapters)
// Project/rule file loading, Jinja rendering, atomic writes.
pub mod infrastructure;

// 3. Application (Use Cases)
// Rule set compilation, built-in generators, clean.
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use application::{GeneratorSet, RuleSetCompiler};
pub use domain::{CompiledRuleSet, RuleSetInput};
pub use error::AssayError;
