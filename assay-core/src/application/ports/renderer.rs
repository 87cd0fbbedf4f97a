// assay-core/src/application/ports/renderer.rs

use crate::error::AssayError;

pub trait TemplateEngine: Send + Sync {
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String, AssayError>;
}
