// assay-core/src/domain/compiler/quoter.rs

use serde::{Deserialize, Serialize};
use sqlparser::dialect::{BigQueryDialect, Dialect, GenericDialect};

/// SQL flavour the generated assertions target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SqlDialect {
    #[default]
    BigQuery,
    Ansi,
}

impl SqlDialect {
    /// Parser dialect used to check user supplied SQL fragments.
    pub fn parser_dialect(&self) -> Box<dyn Dialect> {
        match self {
            Self::BigQuery => Box::new(BigQueryDialect {}),
            Self::Ansi => Box::new(GenericDialect {}),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Quoter {
    dialect: SqlDialect,
}

impl Quoter {
    pub fn new(dialect: SqlDialect) -> Self {
        Self { dialect }
    }

    /// Quotes a possibly dotted table path (`dataset.table`, `project.dataset.table`).
    pub fn table_ref(&self, table: &str) -> String {
        match self.dialect {
            // BigQuery accepts the whole path inside one pair of backticks.
            SqlDialect::BigQuery => format!("`{}`", table.replace('`', "\\`")),
            SqlDialect::Ansi => table
                .split('.')
                .map(|part| self.quote_ident(part))
                .collect::<Vec<_>>()
                .join("."),
        }
    }

    pub fn quote_ident(&self, ident: &str) -> String {
        match self.dialect {
            SqlDialect::BigQuery => format!("`{}`", ident.replace('`', "\\`")),
            SqlDialect::Ansi => format!("\"{}\"", ident.replace('"', "\"\"")),
        }
    }

    /// Single-quoted SQL string literal.
    pub fn literal(&self, value: &str) -> String {
        match self.dialect {
            SqlDialect::BigQuery => format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'")),
            SqlDialect::Ansi => format!("'{}'", value.replace('\'', "''")),
        }
    }
}
