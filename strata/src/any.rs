use strata_conn::Row;
use strata_ddl::{
    Column, ColumnDefinition, ColumnType, DatabaseOptions, Dialect, Index, MysqlDialect, SqlType,
    SqliteDialect, TableOptions,
};

use crate::{
    catalog::{Catalog, IndexEntry},
    error::Result,
    AdapterOptions,
};

macro_rules! dispatch {
    ($self:ident, $d:ident => $body:expr) => {
        match $self {
            AnyDialect::Mysql($d) => $body,
            AnyDialect::Sqlite($d) => $body,
        }
    };
}

/// Dialect picked at runtime from a connection url.
#[derive(Debug, Clone)]
pub enum AnyDialect {
    Mysql(MysqlDialect),
    Sqlite(SqliteDialect),
}

impl AnyDialect {
    pub fn from_url(url: &str) -> Result<Self> {
        Self::from_options(&AdapterOptions::new(url))
    }

    pub fn from_options(options: &AdapterOptions) -> Result<Self> {
        if options.url.starts_with("mysql://") {
            Ok(Self::Mysql(MysqlDialect::new(&options.engine)))
        } else if options.url.starts_with("sqlite://") {
            Ok(Self::Sqlite(SqliteDialect))
        } else {
            Err(crate::error::connection!("Unsupport url `{}`", options.url))
        }
    }
}

impl Dialect for AnyDialect {
    fn name(&self) -> &'static str {
        dispatch!(self, d => d.name())
    }

    fn quote_char(&self) -> char {
        dispatch!(self, d => d.quote_char())
    }

    fn quote_table_name(&self, name: &str) -> String {
        dispatch!(self, d => d.quote_table_name(name))
    }

    fn quote_column_name(&self, name: &str) -> String {
        dispatch!(self, d => d.quote_column_name(name))
    }

    fn sql_type(&self, ty: ColumnType) -> SqlType {
        dispatch!(self, d => d.sql_type(ty))
    }

    fn get_sql_type(&self, ty: &str) -> Result<SqlType> {
        dispatch!(self, d => d.get_sql_type(ty))
    }

    fn auto_increment_keyword(&self) -> &'static str {
        dispatch!(self, d => d.auto_increment_keyword())
    }

    fn inline_auto_increment_key(&self) -> bool {
        dispatch!(self, d => d.inline_auto_increment_key())
    }

    fn supports_inline_index(&self) -> bool {
        dispatch!(self, d => d.supports_inline_index())
    }

    fn table_options(&self, options: &TableOptions) -> Option<String> {
        dispatch!(self, d => d.table_options(options))
    }

    fn column_position(&self, column: &Column) -> Option<String> {
        dispatch!(self, d => d.column_position(column))
    }

    fn rename_table(&self, table: &str, new_name: &str) -> String {
        dispatch!(self, d => d.rename_table(table, new_name))
    }

    fn rename_column(
        &self,
        table: &str,
        column: &str,
        new_name: &str,
        definition: &ColumnDefinition,
    ) -> String {
        dispatch!(self, d => d.rename_column(table, column, new_name, definition))
    }

    fn add_index(&self, table: &str, name: &str, index: &Index) -> String {
        dispatch!(self, d => d.add_index(table, name, index))
    }

    fn drop_index(&self, table: &str, name: &str) -> String {
        dispatch!(self, d => d.drop_index(table, name))
    }

    fn create_database(&self, name: &str, options: &DatabaseOptions) -> Result<String> {
        dispatch!(self, d => d.create_database(name, options))
    }

    fn drop_database(&self, name: &str) -> Result<String> {
        dispatch!(self, d => d.drop_database(name))
    }

    fn list_tables(&self, database: Option<&str>) -> String {
        dispatch!(self, d => d.list_tables(database))
    }

    fn list_columns(&self, table: &str) -> String {
        dispatch!(self, d => d.list_columns(table))
    }

    fn list_indexes(&self, table: &str) -> String {
        dispatch!(self, d => d.list_indexes(table))
    }

    fn quote_column_list(&self, columns: &[String]) -> String {
        dispatch!(self, d => d.quote_column_list(columns))
    }
}

impl Catalog for AnyDialect {
    fn decode_table(&self, row: &Row) -> Result<String> {
        dispatch!(self, d => d.decode_table(row))
    }

    fn decode_column(&self, row: &Row) -> Result<ColumnDefinition> {
        dispatch!(self, d => d.decode_column(row))
    }

    fn decode_index(&self, row: &Row) -> Result<Option<IndexEntry>> {
        dispatch!(self, d => d.decode_index(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_url() {
        let mysql = AnyDialect::from_url("mysql://root@127.0.0.1/app").unwrap();
        assert_eq!(mysql.name(), "mysql");
        assert_eq!(mysql.quote_table_name("users"), "`users`");

        let sqlite = AnyDialect::from_url("sqlite://memory").unwrap();
        assert_eq!(sqlite.name(), "sqlite");
        assert_eq!(sqlite.quote_table_name("users"), "\"users\"");

        assert!(AnyDialect::from_url("postgres://localhost").is_err());
    }

    #[test]
    fn test_engine_from_options() {
        let opts = AdapterOptions::new("mysql://root@127.0.0.1/app").engine("MyISAM");
        match AnyDialect::from_options(&opts).unwrap() {
            AnyDialect::Mysql(d) => assert_eq!(d.engine(), "MyISAM"),
            other => panic!("unexpected dialect {:?}", other),
        }
    }
}
