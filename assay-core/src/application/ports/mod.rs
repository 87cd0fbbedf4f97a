// assay-core/src/application/ports/mod.rs

pub mod generator;
pub mod renderer;

pub use generator::AssertionGenerator;
pub use renderer::TemplateEngine;
