// assay-core/src/domain/project/mod.rs

pub mod configuration;
pub mod defaults;

pub use configuration::{ProjectConfig, TemplateOverrides, ValidationMode, WarehouseConfig};
pub use defaults::ProjectDefaults;
