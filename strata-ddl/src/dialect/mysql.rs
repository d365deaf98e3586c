use strata_error::Result;

use crate::{
    quote::quote_string, Column, ColumnDefinition, ColumnType, DatabaseOptions, Dialect, SqlType,
    TableOptions, DEFAULT_CHARSET,
};

pub const DEFAULT_ENGINE: &str = "InnoDB";

#[derive(Debug, Clone)]
pub struct MysqlDialect {
    engine: String, // Used when the table does not name one
}

impl MysqlDialect {
    pub fn new(engine: &str) -> Self {
        Self {
            engine: engine.into(),
        }
    }

    pub fn engine(&self) -> &str {
        &self.engine
    }
}

impl Default for MysqlDialect {
    fn default() -> Self {
        Self::new(DEFAULT_ENGINE)
    }
}

impl Dialect for MysqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn quote_char(&self) -> char {
        '`'
    }

    fn sql_type(&self, ty: ColumnType) -> SqlType {
        match ty {
            ColumnType::PrimaryKey => SqlType::with_limit("int", 11),
            ColumnType::String => SqlType::with_limit("varchar", 255),
            ColumnType::Text => SqlType::new("text"),
            ColumnType::Integer => SqlType::with_limit("int", 11),
            ColumnType::Float => SqlType::new("float"),
            ColumnType::Decimal => SqlType::new("decimal"),
            ColumnType::DateTime => SqlType::new("datetime"),
            ColumnType::Timestamp => SqlType::new("datetime"),
            ColumnType::Time => SqlType::new("time"),
            ColumnType::Date => SqlType::new("date"),
            ColumnType::Binary => SqlType::new("blob"),
            ColumnType::Boolean => SqlType::with_limit("tinyint", 1),
        }
    }

    fn auto_increment_keyword(&self) -> &'static str {
        "AUTO_INCREMENT"
    }

    fn table_options(&self, options: &TableOptions) -> Option<String> {
        let mut opts = format!(
            "ENGINE = {}",
            options.engine.as_deref().unwrap_or(&self.engine)
        );
        if let Some(collation) = &options.collation {
            opts.push_str(&format!(" COLLATE = {}", collation));
        }

        Some(opts)
    }

    fn column_position(&self, column: &Column) -> Option<String> {
        column
            .options
            .after
            .as_ref()
            .map(|after| format!("AFTER {}", self.quote_column_name(after)))
    }

    fn rename_table(&self, table: &str, new_name: &str) -> String {
        format!(
            "RENAME TABLE {} TO {}",
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
    ) -> String {
        let mut sql = format!(
            "ALTER TABLE {} CHANGE COLUMN {} {} {} {}",
            self.quote_table_name(table),
            self.quote_column_name(column),
            self.quote_column_name(new_name),
            definition.ty,
            if definition.nullable {
                "NULL"
            } else {
                "NOT NULL"
            }
        );

        let mut words = definition.extra.split_whitespace().collect::<Vec<_>>();
        // `DEFAULT_GENERATED` marks an expression default and is not valid in a column definition
        let generated = words
            .iter()
            .any(|word| word.eq_ignore_ascii_case("DEFAULT_GENERATED"));
        words.retain(|word| !word.eq_ignore_ascii_case("DEFAULT_GENERATED"));

        if let Some(default) = &definition.default {
            sql.push_str(" DEFAULT ");
            if is_current_timestamp(default) {
                sql.push_str(default);
            } else if generated {
                sql.push_str(&format!("({})", default));
            } else {
                sql.push_str(&quote_string(default));
            }
        }

        let extra = words.join(" ");
        if !extra.is_empty() {
            sql.push(' ');
            sql.push_str(&extra.to_uppercase());
        }

        sql
    }

    fn add_index(&self, table: &str, name: &str, index: &crate::Index) -> String {
        format!(
            "ALTER TABLE {} ADD {}INDEX {} ({})",
            self.quote_table_name(table),
            if index.options.unique { "UNIQUE " } else { "" },
            self.quote_column_name(name),
            self.quote_column_list(&index.columns)
        )
    }

    fn drop_index(&self, table: &str, name: &str) -> String {
        format!(
            "ALTER TABLE {} DROP INDEX {}",
            self.quote_table_name(table),
            self.quote_column_name(name)
        )
    }

    fn create_database(&self, name: &str, options: &DatabaseOptions) -> Result<String> {
        let charset = options.charset.as_deref().unwrap_or(DEFAULT_CHARSET);
        let mut sql = format!(
            "CREATE DATABASE {} DEFAULT CHARACTER SET {}",
            self.quote_column_name(name),
            self.quote_column_name(charset)
        );
        if let Some(collation) = &options.collation {
            sql.push_str(&format!(" COLLATE {}", self.quote_column_name(collation)));
        }

        Ok(sql)
    }

    fn drop_database(&self, name: &str) -> Result<String> {
        Ok(format!(
            "DROP DATABASE IF EXISTS {}",
            self.quote_column_name(name)
        ))
    }

    fn list_tables(&self, database: Option<&str>) -> String {
        match database {
            Some(db) => format!("SHOW TABLES IN {}", self.quote_column_name(db)),
            None => "SHOW TABLES".into(),
        }
    }

    fn list_columns(&self, table: &str) -> String {
        format!("SHOW COLUMNS FROM {}", self.quote_table_name(table))
    }

    fn list_indexes(&self, table: &str) -> String {
        format!("SHOW INDEXES FROM {}", self.quote_table_name(table))
    }
}

fn is_current_timestamp(default: &str) -> bool {
    let upper = default.to_uppercase();
    upper == "CURRENT_TIMESTAMP" || upper.starts_with("CURRENT_TIMESTAMP(")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Index;

    #[test]
    fn test_sql_types() {
        let d = MysqlDialect::default();
        assert_eq!(d.sql_type(ColumnType::String), SqlType::with_limit("varchar", 255));
        assert_eq!(d.sql_type(ColumnType::Integer), SqlType::with_limit("int", 11));
        assert_eq!(d.sql_type(ColumnType::Boolean), SqlType::with_limit("tinyint", 1));
        assert_eq!(d.sql_type(ColumnType::Timestamp), SqlType::new("datetime"));
        assert_eq!(d.sql_type(ColumnType::Binary), SqlType::new("blob"));
        assert_eq!(d.sql_type(ColumnType::Text).limit, None);
    }

    #[test]
    fn test_quote_table_name() {
        let d = MysqlDialect::default();
        assert_eq!(d.quote_table_name("app.users"), "`app`.`users`");
        assert_eq!(d.quote_column_name("a`b"), "`a``b`");
    }

    #[test]
    fn test_rename_column_restates_definition() {
        let d = MysqlDialect::default();
        let def = ColumnDefinition {
            name: "id".into(),
            ty: "int(11)".into(),
            nullable: false,
            default: None,
            extra: "auto_increment".into(),
        };
        assert_eq!(
            d.rename_column("t", "id", "uid", &def),
            "ALTER TABLE `t` CHANGE COLUMN `id` `uid` int(11) NOT NULL AUTO_INCREMENT"
        );

        let def = ColumnDefinition {
            name: "created".into(),
            ty: "timestamp".into(),
            nullable: true,
            default: Some("CURRENT_TIMESTAMP".into()),
            extra: "DEFAULT_GENERATED on update CURRENT_TIMESTAMP".into(),
        };
        assert_eq!(
            d.rename_column("t", "created", "created_at", &def),
            "ALTER TABLE `t` CHANGE COLUMN `created` `created_at` timestamp NULL \
             DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP"
        );

        let def = ColumnDefinition {
            name: "state".into(),
            ty: "varchar(10)".into(),
            nullable: false,
            default: Some("new".into()),
            extra: "".into(),
        };
        assert_eq!(
            d.rename_column("t", "state", "status", &def),
            "ALTER TABLE `t` CHANGE COLUMN `state` `status` varchar(10) NOT NULL DEFAULT 'new'"
        );

        // Expression defaults stay expressions
        let def = ColumnDefinition {
            name: "token".into(),
            ty: "char(36)".into(),
            nullable: false,
            default: Some("uuid()".into()),
            extra: "DEFAULT_GENERATED".into(),
        };
        assert_eq!(
            d.rename_column("t", "token", "tok", &def),
            "ALTER TABLE `t` CHANGE COLUMN `token` `tok` char(36) NOT NULL DEFAULT (uuid())"
        );

        // A literal that only looks like a call is still a literal
        let def = ColumnDefinition {
            name: "label".into(),
            ty: "varchar(16)".into(),
            nullable: false,
            default: Some("uuid()".into()),
            extra: "".into(),
        };
        assert_eq!(
            d.rename_column("t", "label", "tag", &def),
            "ALTER TABLE `t` CHANGE COLUMN `label` `tag` varchar(16) NOT NULL DEFAULT 'uuid()'"
        );
    }

    #[test]
    fn test_index_statements() {
        let d = MysqlDialect::default();
        assert_eq!(
            d.add_index("t", "t_a_b_index", &Index::new(["a", "b"]).unique()),
            "ALTER TABLE `t` ADD UNIQUE INDEX `t_a_b_index` (`a`,`b`)"
        );
        assert_eq!(
            d.drop_index("t", "t_a_index"),
            "ALTER TABLE `t` DROP INDEX `t_a_index`"
        );
    }

    #[test]
    fn test_database_statements() {
        let d = MysqlDialect::default();
        assert_eq!(
            d.create_database("app", &DatabaseOptions::default()).unwrap(),
            "CREATE DATABASE `app` DEFAULT CHARACTER SET `utf8`"
        );
        assert_eq!(
            d.create_database(
                "app",
                &DatabaseOptions::default()
                    .charset("utf8mb4")
                    .collation("utf8mb4_unicode_ci")
            )
            .unwrap(),
            "CREATE DATABASE `app` DEFAULT CHARACTER SET `utf8mb4` COLLATE `utf8mb4_unicode_ci`"
        );
        assert_eq!(
            d.drop_database("app").unwrap(),
            "DROP DATABASE IF EXISTS `app`"
        );
    }

    #[test]
    fn test_catalog_queries() {
        let d = MysqlDialect::default();
        assert_eq!(d.list_tables(Some("app")), "SHOW TABLES IN `app`");
        assert_eq!(d.list_tables(None), "SHOW TABLES");
        assert_eq!(d.list_columns("users"), "SHOW COLUMNS FROM `users`");
        assert_eq!(d.list_indexes("users"), "SHOW INDEXES FROM `users`");
    }
}
