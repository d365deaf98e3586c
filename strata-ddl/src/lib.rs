mod create_table;
mod dialect;
pub mod quote;
mod schema;

use strata_error::Result;

pub use create_table::{column_definition, CreateTableBuilder};
pub use dialect::{Dialect, MysqlDialect, SqliteDialect, DEFAULT_ENGINE};
pub use schema::{
    Column, ColumnDefinition, ColumnOptions, ColumnType, DatabaseOptions, DefaultValue, Index,
    IndexOptions, PrimaryKey, SqlType, Table, TableOptions, DEFAULT_CHARSET,
};

/// Entry point for every statement the adapter issues.
#[derive(Debug)]
pub struct DdlBuilder<'a, D: ?Sized> {
    dialect: &'a D,
}

impl<'a, D: Dialect + ?Sized> DdlBuilder<'a, D> {
    pub fn new(dialect: &'a D) -> Self {
        Self { dialect }
    }

    pub fn create_table(&self, table: &Table) -> Result<Vec<String>> {
        CreateTableBuilder::new(self.dialect, table).build()
    }

    pub fn rename_table(&self, table: &str, new_name: &str) -> String {
        self.dialect.rename_table(table, new_name)
    }

    /// # Examples
    ///
    /// ```
    /// use strata_ddl::{DdlBuilder, MysqlDialect};
    ///
    /// let sql = DdlBuilder::new(&MysqlDialect::default()).drop_table("app.users");
    ///
    /// assert_eq!(&sql, "DROP TABLE `app`.`users`");
    /// ```
    pub fn drop_table(&self, table: &str) -> String {
        format!("DROP TABLE {}", self.dialect.quote_table_name(table))
    }

    /// # Examples
    ///
    /// ```
    /// use strata_ddl::{Column, ColumnType, DdlBuilder, MysqlDialect};
    ///
    /// let sql = DdlBuilder::new(&MysqlDialect::default())
    ///     .add_column("users", &Column::new("age", ColumnType::Integer).null(true).after("email"))
    ///     .unwrap();
    ///
    /// assert_eq!(&sql, "ALTER TABLE `users` ADD COLUMN `age` INT(11) NULL AFTER `email`");
    /// ```
    pub fn add_column(&self, table: &str, column: &Column) -> Result<String> {
        let mut sql = format!(
            "ALTER TABLE {} ADD COLUMN {}",
            self.dialect.quote_table_name(table),
            column_definition(self.dialect, column, false)?
        );
        if let Some(position) = self.dialect.column_position(column) {
            sql.push(' ');
            sql.push_str(&position);
        }

        Ok(sql)
    }

    pub fn rename_column(
        &self,
        table: &str,
        column: &str,
        new_name: &str,
        definition: &ColumnDefinition,
    ) -> String {
        self.dialect
            .rename_column(table, column, new_name, definition)
    }

    pub fn drop_column(&self, table: &str, column: &str) -> String {
        format!(
            "ALTER TABLE {} DROP COLUMN {}",
            self.dialect.quote_table_name(table),
            self.dialect.quote_column_name(column)
        )
    }

    /// Named index, see [`Index::name_for`]
    pub fn add_index(&self, table: &str, index: &Index) -> Result<String> {
        create_table::validate_index(index)?;

        Ok(self
            .dialect
            .add_index(table, &index.name_for(table), index))
    }

    pub fn drop_index(&self, table: &str, name: &str) -> String {
        self.dialect.drop_index(table, name)
    }

    pub fn create_database(&self, name: &str, options: &DatabaseOptions) -> Result<String> {
        self.dialect.create_database(name, options)
    }

    pub fn drop_database(&self, name: &str) -> Result<String> {
        self.dialect.drop_database(name)
    }

    /// Version-tracking table of applied migrations
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_ddl::{DdlBuilder, MysqlDialect};
    ///
    /// let sql = DdlBuilder::new(&MysqlDialect::default()).create_ledger("strata_log");
    ///
    /// assert_eq!(
    ///     &sql,
    ///     "CREATE TABLE `strata_log` (version BIGINT UNSIGNED NOT NULL, \
    ///      start_time TIMESTAMP NOT NULL, end_time TIMESTAMP NOT NULL);"
    /// );
    /// ```
    pub fn create_ledger(&self, table: &str) -> String {
        format!(
            "CREATE TABLE {} (version BIGINT UNSIGNED NOT NULL, \
             start_time TIMESTAMP NOT NULL, end_time TIMESTAMP NOT NULL);",
            self.dialect.quote_table_name(table)
        )
    }
}
