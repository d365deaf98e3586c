use strata_error::Result;

use crate::{
    quote::{quote_string, split_qualified_name},
    ColumnDefinition, ColumnType, DatabaseOptions, Dialect, Index, SqlType,
};

#[derive(Debug, Clone, Default)]
pub struct SqliteDialect;

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn quote_char(&self) -> char {
        '"'
    }

    fn sql_type(&self, ty: ColumnType) -> SqlType {
        match ty {
            // Only `INTEGER PRIMARY KEY` aliases the rowid
            ColumnType::PrimaryKey => SqlType::new("integer"),
            ColumnType::String => SqlType::with_limit("varchar", 255),
            ColumnType::Text => SqlType::new("text"),
            ColumnType::Integer => SqlType::new("integer"),
            ColumnType::Float => SqlType::new("float"),
            ColumnType::Decimal => SqlType::new("decimal"),
            ColumnType::DateTime => SqlType::new("datetime"),
            ColumnType::Timestamp => SqlType::new("datetime"),
            ColumnType::Time => SqlType::new("time"),
            ColumnType::Date => SqlType::new("date"),
            ColumnType::Binary => SqlType::new("blob"),
            ColumnType::Boolean => SqlType::new("boolean"),
        }
    }

    fn auto_increment_keyword(&self) -> &'static str {
        "AUTOINCREMENT"
    }

    fn inline_auto_increment_key(&self) -> bool {
        true
    }

    fn supports_inline_index(&self) -> bool {
        false
    }

    // The new name is always in the schema of the old one
    fn rename_table(&self, table: &str, new_name: &str) -> String {
        format!(
            "ALTER TABLE {} RENAME TO {}",
            self.quote_table_name(table),
            self.quote_column_name(split_qualified_name(new_name).1)
        )
    }

    fn rename_column(
        &self,
        table: &str,
        column: &str,
        new_name: &str,
        _definition: &ColumnDefinition,
    ) -> String {
        format!(
            "ALTER TABLE {} RENAME COLUMN {} TO {}",
            self.quote_table_name(table),
            self.quote_column_name(column),
            self.quote_column_name(new_name)
        )
    }

    // Indexes live in the schema of their table, which is named on the index
    fn add_index(&self, table: &str, name: &str, index: &Index) -> String {
        let (schema, table) = split_qualified_name(table);

        format!(
            "CREATE {}INDEX {} ON {} ({})",
            if index.options.unique { "UNIQUE " } else { "" },
            self.qualified_index_name(schema, name),
            self.quote_column_name(table),
            self.quote_column_list(&index.columns)
        )
    }

    fn drop_index(&self, table: &str, name: &str) -> String {
        let (schema, _) = split_qualified_name(table);

        format!("DROP INDEX {}", self.qualified_index_name(schema, name))
    }

    fn create_database(&self, name: &str, _options: &DatabaseOptions) -> Result<String> {
        Err(strata_error::unsupported!(
            "Sqlite has no CREATE DATABASE, open a new file instead of `{}`",
            name
        ))
    }

    fn drop_database(&self, name: &str) -> Result<String> {
        Err(strata_error::unsupported!(
            "Sqlite has no DROP DATABASE, remove the file of `{}` instead",
            name
        ))
    }

    fn list_tables(&self, database: Option<&str>) -> String {
        let master = match database {
            Some(db) => format!("{}.sqlite_master", self.quote_column_name(db)),
            None => "sqlite_master".into(),
        };

        format!(
            "SELECT name FROM {} WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
            master
        )
    }

    fn list_columns(&self, table: &str) -> String {
        format!(
            "SELECT name, type, \"notnull\", dflt_value, pk FROM pragma_table_info({})",
            pragma_args(table)
        )
    }

    fn list_indexes(&self, table: &str) -> String {
        let info_args = match split_qualified_name(table).0 {
            Some(schema) => format!("il.name, {}", quote_string(schema)),
            None => "il.name".into(),
        };

        format!(
            "SELECT il.name AS index_name, il.\"unique\" AS is_unique, ii.name AS column_name \
             FROM pragma_index_list({}) AS il, pragma_index_info({}) AS ii \
             ORDER BY il.seq, ii.seqno",
            pragma_args(table),
            info_args
        )
    }
}

impl SqliteDialect {
    fn qualified_index_name(&self, schema: Option<&str>, name: &str) -> String {
        match schema {
            Some(schema) => format!(
                "{}.{}",
                self.quote_column_name(schema),
                self.quote_column_name(name)
            ),
            None => self.quote_column_name(name),
        }
    }
}

/// Arguments of a table-valued pragma, the schema goes last
fn pragma_args(table: &str) -> String {
    match split_qualified_name(table) {
        (Some(schema), table) => format!("{}, {}", quote_string(table), quote_string(schema)),
        (None, table) => quote_string(table),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Index;

    #[test]
    fn test_quote() {
        let d = SqliteDialect;
        assert_eq!(d.quote_table_name("main.users"), "\"main\".\"users\"");
        assert_eq!(d.quote_column_name("a\"b"), "\"a\"\"b\"");
    }

    #[test]
    fn test_statements() {
        let d = SqliteDialect;
        assert_eq!(d.rename_table("a", "b"), "ALTER TABLE \"a\" RENAME TO \"b\"");
        assert_eq!(
            d.add_index("t", "t_a_index", &Index::new(["a"])),
            "CREATE INDEX \"t_a_index\" ON \"t\" (\"a\")"
        );
        assert_eq!(d.drop_index("t", "t_a_index"), "DROP INDEX \"t_a_index\"");
        assert!(matches!(
            d.create_database("app", &DatabaseOptions::default()),
            Err(strata_error::Error::Unsupported(_))
        ));
        assert!(matches!(
            d.drop_database("app"),
            Err(strata_error::Error::Unsupported(_))
        ));
    }

    #[test]
    fn test_catalog_queries_escape_table_literal() {
        let d = SqliteDialect;
        assert_eq!(
            d.list_columns("o'brien"),
            "SELECT name, type, \"notnull\", dflt_value, pk FROM pragma_table_info('o''brien')"
        );
        assert!(d.list_indexes("t").contains("pragma_index_list('t')"));
        assert_eq!(
            d.list_tables(None),
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'"
        );
    }

    #[test]
    fn test_schema_qualified_tables() {
        let d = SqliteDialect;
        assert_eq!(
            d.rename_table("main.users", "main.people"),
            "ALTER TABLE \"main\".\"users\" RENAME TO \"people\""
        );
        assert_eq!(
            d.add_index("main.users", "users_email_index", &Index::new(["email"]).unique()),
            "CREATE UNIQUE INDEX \"main\".\"users_email_index\" ON \"users\" (\"email\")"
        );
        assert_eq!(
            d.drop_index("main.users", "users_email_index"),
            "DROP INDEX \"main\".\"users_email_index\""
        );
        assert_eq!(
            d.list_columns("main.users"),
            "SELECT name, type, \"notnull\", dflt_value, pk FROM pragma_table_info('users', 'main')"
        );
        let sql = d.list_indexes("main.users");
        assert!(sql.contains("pragma_index_list('users', 'main')"));
        assert!(sql.contains("pragma_index_info(il.name, 'main')"));
    }
}
