mod mysql;
mod sqlite;

pub use mysql::{MysqlDialect, DEFAULT_ENGINE};
pub use sqlite::SqliteDialect;

use strata_error::Result;

use crate::{
    quote, Column, ColumnDefinition, ColumnType, DatabaseOptions, Index, SqlType, TableOptions,
};

/// SQL grammar of one database family.
///
/// Methods with a default cover the grammar MySQL and SQLite share; a dialect
/// only overrides where its syntax differs.
pub trait Dialect: Send + Sync {
    fn name(&self) -> &'static str;

    fn quote_char(&self) -> char;

    fn quote_table_name(&self, name: &str) -> String {
        quote::quote_qualified_name(name, self.quote_char())
    }

    fn quote_column_name(&self, name: &str) -> String {
        quote::quote_identifier(name, self.quote_char())
    }

    /// Must resolve every [`ColumnType`].
    fn sql_type(&self, ty: ColumnType) -> SqlType;

    fn get_sql_type(&self, ty: &str) -> Result<SqlType> {
        Ok(self.sql_type(ty.parse()?))
    }

    fn auto_increment_keyword(&self) -> &'static str;

    /// Auto increment only exists on an inline `PRIMARY KEY` column
    fn inline_auto_increment_key(&self) -> bool {
        false
    }

    /// Non-unique indexes may be declared inside `CREATE TABLE`
    fn supports_inline_index(&self) -> bool {
        true
    }

    /// Trailing options of `CREATE TABLE`, e.g. the storage engine
    fn table_options(&self, _options: &TableOptions) -> Option<String> {
        None
    }

    /// Position suffix of `ADD COLUMN`
    fn column_position(&self, _column: &Column) -> Option<String> {
        None
    }

    fn rename_table(&self, table: &str, new_name: &str) -> String {
        format!(
            "ALTER TABLE {} RENAME TO {}",
            self.quote_table_name(table),
            self.quote_table_name(new_name)
        )
    }

    fn rename_column(
        &self,
        table: &str,
        column: &str,
        new_name: &str,
        definition: &ColumnDefinition,
    ) -> String;

    fn add_index(&self, table: &str, name: &str, index: &Index) -> String {
        format!(
            "CREATE {}INDEX {} ON {} ({})",
            if index.options.unique { "UNIQUE " } else { "" },
            self.quote_column_name(name),
            self.quote_table_name(table),
            self.quote_column_list(&index.columns)
        )
    }

    fn drop_index(&self, table: &str, name: &str) -> String;

    fn create_database(&self, name: &str, options: &DatabaseOptions) -> Result<String>;

    fn drop_database(&self, name: &str) -> Result<String>;

    /// Catalog query listing table names, `database` narrows the schema
    fn list_tables(&self, database: Option<&str>) -> String;

    fn list_columns(&self, table: &str) -> String;

    fn list_indexes(&self, table: &str) -> String;

    fn quote_column_list(&self, columns: &[String]) -> String {
        columns
            .iter()
            .map(|c| self.quote_column_name(c))
            .collect::<Vec<_>>()
            .join(",")
    }
}
