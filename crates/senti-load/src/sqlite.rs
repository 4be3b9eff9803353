//! SQLite sink for the cleaned table.

use std::fs;
use std::path::{Path, PathBuf};

use polars::prelude::{AnyValue, Column, DataFrame, DataType};
use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags, params_from_iter};
use tracing::{debug, info};

use senti_common::schema::{
    ALL_TITLES, AVG_TITLE_LENGTH, DATE, DAY, DAY_OF_WEEK, FINANCIAL_KEYWORDS, LABEL, MONTH,
    NEGATIVE_KEYWORDS, POSITIVE_KEYWORDS, SENTIMENT, VALID_TITLES, YEAR,
};
use senti_common::{TITLE_SLOTS, any_to_f64, any_to_i64, any_to_string, title_column};

use crate::error::{LoadError, Result};

/// Name of the table replaced on every load.
pub const TABLE_NAME: &str = "sentiment_analysis";

/// SQL storage class of a cleaned column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SqlType {
    Integer,
    Real,
    Text,
}

impl SqlType {
    fn keyword(self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::Real => "REAL",
            Self::Text => "TEXT",
        }
    }
}

/// Cleaned columns written to the table, in order.
fn table_columns() -> Vec<(String, SqlType)> {
    let mut columns: Vec<(String, SqlType)> = [
        (DATE, SqlType::Text),
        (YEAR, SqlType::Integer),
        (MONTH, SqlType::Integer),
        (DAY, SqlType::Integer),
        (DAY_OF_WEEK, SqlType::Text),
        (LABEL, SqlType::Integer),
        (SENTIMENT, SqlType::Text),
        (VALID_TITLES, SqlType::Integer),
        (AVG_TITLE_LENGTH, SqlType::Real),
        (FINANCIAL_KEYWORDS, SqlType::Integer),
        (POSITIVE_KEYWORDS, SqlType::Integer),
        (NEGATIVE_KEYWORDS, SqlType::Integer),
    ]
    .into_iter()
    .map(|(name, ty)| (name.to_string(), ty))
    .collect();
    columns.extend((1..=TITLE_SLOTS).map(|slot| (title_column(slot), SqlType::Text)));
    columns.push((ALL_TITLES.to_string(), SqlType::Text));
    columns
}

fn create_table_sql(columns: &[(String, SqlType)]) -> String {
    let mut sql = format!("CREATE TABLE {TABLE_NAME} (\n    id INTEGER PRIMARY KEY AUTOINCREMENT");
    for (name, ty) in columns {
        sql.push_str(&format!(",\n    {name} {}", ty.keyword()));
    }
    sql.push_str(",\n    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP\n)");
    sql
}

fn insert_sql(columns: &[(String, SqlType)]) -> String {
    let names: Vec<&str> = columns.iter().map(|(name, _)| name.as_str()).collect();
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{i}")).collect();
    format!(
        "INSERT INTO {TABLE_NAME} ({}) VALUES ({})",
        names.join(", "),
        placeholders.join(", ")
    )
}

fn sql_value(value: AnyValue<'_>, ty: SqlType) -> Value {
    if matches!(value, AnyValue::Null) {
        return Value::Null;
    }
    match ty {
        SqlType::Integer => any_to_i64(value).map_or(Value::Null, Value::Integer),
        SqlType::Real => any_to_f64(value).map_or(Value::Null, Value::Real),
        SqlType::Text => Value::Text(any_to_string(value)),
    }
}

/// Result of a full-replace load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    pub path: PathBuf,
    pub table: &'static str,
    pub rows: usize,
}

/// Summary queries over the loaded table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseStats {
    pub total: i64,
    /// Record count per sentiment, most frequent first.
    pub by_sentiment: Vec<(String, i64)>,
    /// Record count for the five most recent years, newest first.
    pub by_year: Vec<(i64, i64)>,
}

/// Connection to the SQLite database holding [`TABLE_NAME`].
pub struct SqliteSink {
    conn: Connection,
    path: PathBuf,
}

impl SqliteSink {
    /// Opens the database for writing, creating the file and its parent
    /// directories when absent.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| LoadError::Io {
                operation: "create directory",
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let conn = Connection::open(path)?;
        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    /// Opens an existing database read-only.
    pub fn open_existing(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(LoadError::DatabaseNotFound {
                path: path.to_path_buf(),
            });
        }
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the table contents with `df` in a single transaction.
    ///
    /// Only the cleaned columns are written; other columns of `df` are ignored.
    /// On error nothing is committed and the previous table is kept.
    pub fn load(&mut self, df: &DataFrame) -> Result<LoadSummary> {
        let columns = table_columns();
        let mut data: Vec<Column> = Vec::with_capacity(columns.len());
        for (name, _) in &columns {
            let column = df.column(name).map_err(|_| LoadError::MissingColumn {
                column: name.clone(),
            })?;
            let column = if column.dtype() == &DataType::Date {
                column.cast(&DataType::String)?
            } else {
                column.clone()
            };
            data.push(column);
        }

        let tx = self.conn.transaction()?;
        tx.execute(&format!("DROP TABLE IF EXISTS {TABLE_NAME}"), [])?;
        tx.execute(&create_table_sql(&columns), [])?;
        debug!(table = TABLE_NAME, "table recreated");
        {
            let mut stmt = tx.prepare(&insert_sql(&columns))?;
            for idx in 0..df.height() {
                let mut values = Vec::with_capacity(columns.len());
                for (column, (_, ty)) in data.iter().zip(&columns) {
                    values.push(sql_value(column.get(idx)?, *ty));
                }
                stmt.execute(params_from_iter(values))?;
            }
        }
        tx.commit()?;

        info!(
            path = %self.path.display(),
            table = TABLE_NAME,
            rows = df.height(),
            "database loaded"
        );
        Ok(LoadSummary {
            path: self.path.clone(),
            table: TABLE_NAME,
            rows: df.height(),
        })
    }

    /// Total count, counts per sentiment and counts for the latest years.
    pub fn stats(&self) -> Result<DatabaseStats> {
        if !self.table_exists()? {
            return Err(LoadError::TableNotFound {
                table: TABLE_NAME,
                path: self.path.clone(),
            });
        }

        let total: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {TABLE_NAME}"),
            [],
            |row| row.get(0),
        )?;

        let mut stmt = self.conn.prepare(&format!(
            "SELECT sentiment, COUNT(*) AS count FROM {TABLE_NAME} \
             GROUP BY sentiment ORDER BY count DESC, sentiment"
        ))?;
        let by_sentiment = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                    row.get(1)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut stmt = self.conn.prepare(&format!(
            "SELECT year, COUNT(*) AS count FROM {TABLE_NAME} \
             GROUP BY year ORDER BY year DESC LIMIT 5"
        ))?;
        let by_year = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(DatabaseStats {
            total,
            by_sentiment,
            by_year,
        })
    }

    fn table_exists(&self) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [TABLE_NAME],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}
