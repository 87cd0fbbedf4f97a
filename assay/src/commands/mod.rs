// assay/src/commands/mod.rs

pub mod clean;
pub mod compile;
pub mod project;
pub mod show;
pub mod validate;
