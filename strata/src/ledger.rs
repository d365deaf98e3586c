use chrono::NaiveDateTime;
use strata_conn::{Connection, ToValue};
use strata_ddl::DdlBuilder;

use crate::{catalog::Catalog, catalog::Inspector, error::Result};

pub const DEFAULT_LEDGER_TABLE: &str = "strata_log";

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One applied migration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub version: u64,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

/// Version-tracking table of applied migrations.
pub struct Ledger<'a, D: ?Sized> {
    dialect: &'a D,
    conn: &'a Connection,
    database: Option<&'a str>,
    table: &'a str,
}

impl<'a, D: Catalog + ?Sized> Ledger<'a, D> {
    pub fn new(
        dialect: &'a D,
        conn: &'a Connection,
        database: Option<&'a str>,
        table: &'a str,
    ) -> Self {
        Self {
            dialect,
            conn,
            database,
            table,
        }
    }

    pub fn table(&self) -> &str {
        self.table
    }

    pub async fn exists(&self) -> Result<bool> {
        Inspector::new(self.dialect, self.conn, self.database)
            .table_exists(self.table)
            .await
    }

    /// Create the table unless it is already there
    pub async fn ensure(&self) -> Result<()> {
        if self.exists().await? {
            return Ok(());
        }

        let sql = DdlBuilder::new(self.dialect).create_ledger(self.table);
        log::debug!("{}", sql);
        self.conn.execute(&sql).await?;
        log::info!("Created ledger table `{}`", self.table);

        Ok(())
    }

    /// Applied versions in ascending order
    pub async fn versions(&self) -> Result<Vec<u64>> {
        let sql = format!(
            "SELECT version FROM {} ORDER BY version ASC",
            self.dialect.quote_table_name(self.table)
        );
        log::debug!("{}", sql);

        self.conn
            .query_map(&sql, vec![], |row| row.get::<u64>("version"))
            .await
    }

    pub async fn entries(&self) -> Result<Vec<LedgerEntry>> {
        let sql = format!(
            "SELECT version, start_time, end_time FROM {} ORDER BY version ASC",
            self.dialect.quote_table_name(self.table)
        );
        log::debug!("{}", sql);

        self.conn
            .query_map(&sql, vec![], |row| {
                Ok(LedgerEntry {
                    version: row.get("version")?,
                    start_time: parse_time(&row.get::<String>("start_time")?)?,
                    end_time: parse_time(&row.get::<String>("end_time")?)?,
                })
            })
            .await
    }

    pub async fn record(&self, entry: &LedgerEntry) -> Result<()> {
        let sql = format!(
            "INSERT INTO {} (version, start_time, end_time) VALUES (?, ?, ?)",
            self.dialect.quote_table_name(self.table)
        );
        log::debug!("{}, version: {}", sql, entry.version);

        self.conn
            .execute_with(
                &sql,
                vec![
                    entry.version.to_value(),
                    entry.start_time.format(TIME_FORMAT).to_string().to_value(),
                    entry.end_time.format(TIME_FORMAT).to_string().to_value(),
                ],
            )
            .await?;

        Ok(())
    }

    /// Forget a version, returns whether a row was removed
    pub async fn remove(&self, version: u64) -> Result<bool> {
        let sql = format!(
            "DELETE FROM {} WHERE version = ?",
            self.dialect.quote_table_name(self.table)
        );
        log::debug!("{}, version: {}", sql, version);

        Ok(self.conn.execute_with(&sql, vec![version.to_value()]).await? > 0)
    }
}

fn parse_time(text: &str) -> Result<NaiveDateTime> {
    // Drivers may append fractional seconds
    let text = text.split('.').next().unwrap_or(text);

    NaiveDateTime::parse_from_str(text, TIME_FORMAT)
        .map_err(|e| crate::error::from_value!("Invalid timestamp `{}`: {}", text, e))
}
