// assay-core/src/application/ports/generator.rs

use crate::domain::assertion::AssertionSet;
use crate::domain::options::{GlobalOptions, SharedConfig};
use crate::domain::rules::RuleMap;
use crate::error::AssayError;

/// Turns one category's rule map into assertion definitions.
///
/// Implementations must be pure: the compiler may call them in any order,
/// concurrently, and more than once with the same input.
pub trait AssertionGenerator<R>: Send + Sync {
    fn generate(
        &self,
        options: &GlobalOptions,
        shared: &SharedConfig,
        rules: &RuleMap<R>,
    ) -> Result<AssertionSet, AssayError>;
}
