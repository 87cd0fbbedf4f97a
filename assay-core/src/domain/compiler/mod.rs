// assay-core/src/domain/compiler/mod.rs

pub mod quoter;
pub mod validation;

pub use quoter::{Quoter, SqlDialect};
pub use validation::RuleValidator;
