// assay-core/src/domain/compiler/validation.rs

// Strict checks run on rule payloads before any generator sees them.
// Only used when the project opts into `validation: strict`.

use regex::Regex;
use sqlparser::parser::Parser;
use sqlparser::tokenizer::Token;
use std::collections::HashSet;
use std::sync::OnceLock;
use tracing::debug;
use validator::Validate;

use super::quoter::SqlDialect;
use crate::domain::error::DomainError;
use crate::domain::rules::{
    CompletenessSpec, FreshnessSpec, ReferentialIntegritySpec, RowConditionSet, RuleCategory,
    RuleMap, RuleSetInput, UniqueKeySpec,
};

fn re_table() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Hyphens appear in BigQuery project ids.
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_-]*(\.[A-Za-z_][A-Za-z0-9_-]*)*$")
            .unwrap_or_else(|_| Regex::new("$^").unwrap_or_else(|_| unreachable!()))
    })
}

fn re_column() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$")
            .unwrap_or_else(|_| Regex::new("$^").unwrap_or_else(|_| unreachable!()))
    })
}

pub struct RuleValidator {
    dialect: SqlDialect,
}

impl RuleValidator {
    pub fn new(dialect: SqlDialect) -> Self {
        Self { dialect }
    }

    /// Validates every rule map, stopping at the first invalid table.
    pub fn validate(&self, input: &RuleSetInput) -> Result<(), DomainError> {
        self.validate_row_conditions(&input.row_conditions)?;
        self.validate_unique_keys(&input.unique_key_conditions)?;
        self.validate_freshness(&input.data_freshness_conditions)?;
        self.validate_completeness(&input.data_completeness_conditions)?;
        self.validate_referential_integrity(&input.referential_integrity_conditions)?;
        debug!("All rule maps passed strict validation");
        Ok(())
    }

    pub fn validate_row_conditions(
        &self,
        rules: &RuleMap<RowConditionSet>,
    ) -> Result<(), DomainError> {
        let category = RuleCategory::RowCondition;
        for (table, conditions) in rules {
            check_table(category, table)?;
            if conditions.is_empty() {
                return Err(DomainError::invalid_rule(category, table, "no conditions declared"));
            }
            for (name, predicate) in conditions {
                if name.trim().is_empty() {
                    return Err(DomainError::invalid_rule(category, table, "empty condition name"));
                }
                self.check_predicate(predicate).map_err(|reason| {
                    DomainError::invalid_rule(
                        category,
                        table,
                        format!("condition '{}' is not a valid SQL expression: {}", name, reason),
                    )
                })?;
            }
        }
        Ok(())
    }

    pub fn validate_unique_keys(&self, rules: &RuleMap<UniqueKeySpec>) -> Result<(), DomainError> {
        let category = RuleCategory::UniqueKey;
        for (table, columns) in rules {
            check_table(category, table)?;
            if columns.is_empty() {
                return Err(DomainError::invalid_rule(category, table, "unique key has no columns"));
            }
            let mut seen = HashSet::new();
            for column in columns {
                check_column(category, table, column)?;
                if !seen.insert(column.to_lowercase()) {
                    return Err(DomainError::invalid_rule(
                        category,
                        table,
                        format!("column '{}' listed twice", column),
                    ));
                }
            }
        }
        Ok(())
    }

    pub fn validate_freshness(&self, rules: &RuleMap<FreshnessSpec>) -> Result<(), DomainError> {
        let category = RuleCategory::DataFreshness;
        for (table, spec) in rules {
            check_table(category, table)?;
            spec.validate()
                .map_err(|e| DomainError::invalid_rule(category, table, e.to_string()))?;
            check_column(category, table, &spec.date_column)?;
        }
        Ok(())
    }

    pub fn validate_completeness(
        &self,
        rules: &RuleMap<CompletenessSpec>,
    ) -> Result<(), DomainError> {
        let category = RuleCategory::DataCompleteness;
        for (table, columns) in rules {
            check_table(category, table)?;
            if columns.is_empty() {
                return Err(DomainError::invalid_rule(category, table, "no columns declared"));
            }
            for (column, threshold) in columns {
                check_column(category, table, column)?;
                if !threshold.is_finite() || !(0.0..=100.0).contains(threshold) {
                    return Err(DomainError::invalid_rule(
                        category,
                        table,
                        format!(
                            "null percentage for '{}' must be between 0 and 100, got {}",
                            column, threshold
                        ),
                    ));
                }
            }
        }
        Ok(())
    }

    pub fn validate_referential_integrity(
        &self,
        rules: &RuleMap<ReferentialIntegritySpec>,
    ) -> Result<(), DomainError> {
        let category = RuleCategory::ReferentialIntegrity;
        for (parent, references) in rules {
            check_table(category, parent)?;
            for reference in references {
                reference
                    .validate()
                    .map_err(|e| DomainError::invalid_rule(category, parent, e.to_string()))?;
                check_table(category, &reference.child_table)?;
                check_column(category, parent, &reference.parent_key)?;
                check_column(category, &reference.child_table, &reference.child_key)?;
            }
        }
        Ok(())
    }

    /// The predicate must parse as exactly one SQL expression.
    fn check_predicate(&self, predicate: &str) -> Result<(), String> {
        let dialect = self.dialect.parser_dialect();
        let mut parser = Parser::new(dialect.as_ref())
            .try_with_sql(predicate)
            .map_err(|e| e.to_string())?;
        parser.parse_expr().map_err(|e| e.to_string())?;

        let next = parser.peek_token();
        if next.token != Token::EOF {
            return Err(format!("unexpected trailing input near '{}'", next.token));
        }
        Ok(())
    }
}

fn check_table(category: RuleCategory, table: &str) -> Result<(), DomainError> {
    if re_table().is_match(table) {
        Ok(())
    } else {
        Err(DomainError::invalid_rule(
            category,
            table,
            "table name is not a valid identifier",
        ))
    }
}

fn check_column(category: RuleCategory, table: &str, column: &str) -> Result<(), DomainError> {
    if re_column().is_match(column) {
        Ok(())
    } else {
        Err(DomainError::invalid_rule(
            category,
            table,
            format!("'{}' is not a valid column name", column),
        ))
    }
}
