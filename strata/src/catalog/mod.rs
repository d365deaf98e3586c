//! Catalog inspection: dialect specific listing queries decoded into typed rows.

mod mysql;
mod sqlite;

use strata_conn::{Connection, Row};
use strata_ddl::{quote::split_qualified_name, ColumnDefinition, Dialect};
use strata_error::Result;

/// Decodes the rows returned by a dialect's catalog queries.
///
/// Each dialect names its catalog columns differently (`Field`/`Null` on
/// mysql, `name`/`notnull` on sqlite); this is the only place that knows.
pub trait Catalog: Dialect {
    fn decode_table(&self, row: &Row) -> Result<String>;

    fn decode_column(&self, row: &Row) -> Result<ColumnDefinition>;

    /// `None` for rows that name no column, e.g. a functional index part
    fn decode_index(&self, row: &Row) -> Result<Option<IndexEntry>>;
}

/// One (index, column) pair of an index listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub index_name: String,
    pub column_name: String,
    pub unique: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDescription {
    pub name: String,
    pub columns: Vec<String>,
    pub unique: bool,
}

impl IndexDescription {
    /// Every requested column is part of this index, order and case ignored
    pub fn covers(&self, columns: &[&str]) -> bool {
        columns
            .iter()
            .all(|col| self.columns.iter().any(|own| same_name(own, col)))
    }

    /// Exactly the requested column set, order and case ignored
    pub fn matches(&self, columns: &[&str]) -> bool {
        self.covers(columns)
            && self
                .columns
                .iter()
                .all(|own| columns.iter().any(|col| same_name(own, col)))
    }
}

/// Fold listing rows into one description per index, first-seen order kept
pub fn group_indexes(entries: Vec<IndexEntry>) -> Vec<IndexDescription> {
    let mut indexes = Vec::<IndexDescription>::new();

    for entry in entries {
        match indexes.iter_mut().find(|idx| idx.name == entry.index_name) {
            Some(idx) => idx.columns.push(entry.column_name),
            None => indexes.push(IndexDescription {
                name: entry.index_name,
                columns: vec![entry.column_name],
                unique: entry.unique,
            }),
        }
    }

    indexes
}

fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

pub struct Inspector<'a, D: ?Sized> {
    dialect: &'a D,
    conn: &'a Connection,
    database: Option<&'a str>,
}

impl<'a, D: Catalog + ?Sized> Inspector<'a, D> {
    pub fn new(dialect: &'a D, conn: &'a Connection, database: Option<&'a str>) -> Self {
        Self {
            dialect,
            conn,
            database,
        }
    }

    pub async fn tables(&self) -> Result<Vec<String>> {
        self.tables_in(self.database).await
    }

    /// A `schema.table` name is looked up in that schema
    pub async fn table_exists(&self, table: &str) -> Result<bool> {
        let (tables, table) = match split_qualified_name(table) {
            (Some(schema), table) => (self.tables_in(Some(schema)).await?, table),
            (None, table) => (self.tables().await?, table),
        };

        Ok(tables.iter().any(|t| same_name(t, table)))
    }

    async fn tables_in(&self, database: Option<&str>) -> Result<Vec<String>> {
        let sql = self.dialect.list_tables(database);
        self.conn
            .query_map(&sql, vec![], |row| self.dialect.decode_table(&row))
            .await
    }

    pub async fn columns(&self, table: &str) -> Result<Vec<ColumnDefinition>> {
        let sql = self.dialect.list_columns(table);
        self.conn
            .query_map(&sql, vec![], |row| self.dialect.decode_column(&row))
            .await
    }

    pub async fn column(&self, table: &str, column: &str) -> Result<Option<ColumnDefinition>> {
        Ok(self
            .columns(table)
            .await?
            .into_iter()
            .find(|c| same_name(&c.name, column)))
    }

    pub async fn column_exists(&self, table: &str, column: &str) -> Result<bool> {
        Ok(self.column(table, column).await?.is_some())
    }

    pub async fn indexes(&self, table: &str) -> Result<Vec<IndexDescription>> {
        let sql = self.dialect.list_indexes(table);
        let entries = self
            .conn
            .query_map(&sql, vec![], |row| self.dialect.decode_index(&row))
            .await?;

        Ok(group_indexes(entries.into_iter().flatten().collect()))
    }

    /// Some index covers at least `columns`
    pub async fn index_exists(&self, table: &str, columns: &[&str]) -> Result<bool> {
        if columns.is_empty() {
            return Err(strata_error::argument!(
                "Index lookup on `{}` without columns",
                table
            ));
        }

        Ok(self
            .indexes(table)
            .await?
            .iter()
            .any(|idx| idx.covers(columns)))
    }
}
