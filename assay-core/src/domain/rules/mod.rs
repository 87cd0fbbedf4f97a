// assay-core/src/domain/rules/mod.rs

pub mod freshness;
pub mod input;
pub mod referential;

pub use freshness::{FreshnessSpec, TimeUnit};
pub use input::RuleSetInput;
pub use referential::ReferenceRule;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Table name -> category payload. Ordered so compiled output is stable.
pub type RuleMap<T> = BTreeMap<String, T>;

/// Condition name -> SQL predicate expected to hold for every row.
pub type RowConditionSet = BTreeMap<String, String>;

/// Columns expected to form a unique key, in declaration order.
pub type UniqueKeySpec = Vec<String>;

/// Column name -> maximum allowed percentage of NULL values.
pub type CompletenessSpec = BTreeMap<String, f64>;

/// References declared on a parent table.
pub type ReferentialIntegritySpec = Vec<ReferenceRule>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    RowCondition,
    UniqueKey,
    DataFreshness,
    DataCompleteness,
    ReferentialIntegrity,
}

impl RuleCategory {
    pub const ALL: [RuleCategory; 5] = [
        Self::RowCondition,
        Self::UniqueKey,
        Self::DataFreshness,
        Self::DataCompleteness,
        Self::ReferentialIntegrity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RowCondition => "row_condition",
            Self::UniqueKey => "unique_key",
            Self::DataFreshness => "data_freshness",
            Self::DataCompleteness => "data_completeness",
            Self::ReferentialIntegrity => "referential_integrity",
        }
    }

    /// Key under which the category's assertions appear in a compiled rule set.
    pub fn output_key(&self) -> &'static str {
        match self {
            Self::RowCondition => "rowConditionAssertions",
            Self::UniqueKey => "uniqueKeyAssertions",
            Self::DataFreshness => "dataFreshnessAssertions",
            Self::DataCompleteness => "dataCompletenessAssertions",
            Self::ReferentialIntegrity => "referentialIntegrityAssertions",
        }
    }
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
