use strata_error::Result;

use crate::{quote::quote_string, Column, ColumnType, Dialect, Index, PrimaryKey, Table};

#[derive(Debug)]
pub struct CreateTableBuilder<'a, D: ?Sized> {
    dialect: &'a D,
    table: &'a Table,
}

impl<'a, D: Dialect + ?Sized> CreateTableBuilder<'a, D> {
    pub fn new(dialect: &'a D, table: &'a Table) -> Self {
        Self { dialect, table }
    }

    /// Build sql
    ///
    /// The first statement is always the `CREATE TABLE`; dialects that cannot
    /// declare plain indexes inline get one `CREATE INDEX` per index after it.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_ddl::{Column, ColumnType, DdlBuilder, Index, MysqlDialect, Table};
    ///
    /// let table = Table::new("users")
    ///     .column(Column::new("email", ColumnType::String))
    ///     .index(Index::new(["email"]).unique());
    /// let sqls = DdlBuilder::new(&MysqlDialect::default())
    ///     .create_table(&table)
    ///     .unwrap();
    ///
    /// assert_eq!(
    ///     sqls,
    ///     vec![
    ///         "CREATE TABLE `users` (`id` INT(11) NOT NULL AUTO_INCREMENT, \
    ///          `email` VARCHAR(255) NOT NULL, PRIMARY KEY (`id`), UNIQUE (`email`)) \
    ///          ENGINE = InnoDB;"
    ///     ]
    /// );
    /// ```
    pub fn build(&self) -> Result<Vec<String>> {
        // Validate builder
        self.validate()?;

        let mut columns = Vec::with_capacity(self.table.columns.len() + 1);
        let mut primary_key = self.table.options.primary_key.clone();

        // Implicit id always wins over a caller supplied primary key
        if self.table.options.id {
            columns.push(
                Column::new("id", ColumnType::PrimaryKey)
                    .null(false)
                    .auto_increment(),
            );
            primary_key = Some(PrimaryKey::Single("id".into()));
        }
        columns.extend(self.table.columns.iter().cloned());

        let inline_key = self.inline_primary_key(&columns, primary_key.as_ref());

        let mut parts = Vec::<String>::new();

        // Build columns
        for col in &columns {
            let inline = inline_key.map_or(false, |key| key == col.name);
            parts.push(column_definition(self.dialect, col, inline)?);
        }

        // Build primary key
        if let Some(key) = &primary_key {
            if inline_key.is_none() {
                parts.push(format!(
                    "PRIMARY KEY ({})",
                    key.columns()
                        .iter()
                        .map(|c| self.dialect.quote_column_name(c))
                        .collect::<Vec<_>>()
                        .join(",")
                ));
            }
        }

        // Build indexes, one clause per kind
        let (unique, plain): (Vec<&Index>, Vec<&Index>) = self
            .table
            .indexes
            .iter()
            .partition(|idx| idx.options.unique);
        if !plain.is_empty() && self.dialect.supports_inline_index() {
            parts.push(format!("INDEX ({})", self.group_columns(&plain)));
        }
        if !unique.is_empty() {
            parts.push(format!("UNIQUE ({})", self.group_columns(&unique)));
        }

        let mut sql = format!(
            "CREATE TABLE {} ({})",
            self.dialect.quote_table_name(&self.table.name),
            parts.join(", ")
        );
        if let Some(opts) = self.dialect.table_options(&self.table.options) {
            sql.push(' ');
            sql.push_str(&opts);
        }
        sql.push(';');

        let mut sqls = vec![sql];
        if !self.dialect.supports_inline_index() {
            for idx in plain {
                sqls.push(self.dialect.add_index(
                    &self.table.name,
                    &idx.name_for(&self.table.name),
                    idx,
                ));
            }
        }

        Ok(sqls)
    }

    /// Single auto increment key column the dialect wants declared inline
    fn inline_primary_key<'c>(
        &self,
        columns: &'c [Column],
        primary_key: Option<&PrimaryKey>,
    ) -> Option<&'c str> {
        if !self.dialect.inline_auto_increment_key() {
            return None;
        }

        match primary_key {
            Some(PrimaryKey::Single(key)) => columns
                .iter()
                .find(|c| &c.name == key && c.options.auto_increment)
                .map(|c| c.name.as_str()),
            _ => None,
        }
    }

    fn group_columns(&self, indexes: &[&Index]) -> String {
        indexes
            .iter()
            .map(|idx| self.dialect.quote_column_list(&idx.columns))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Validate builder
    fn validate(&self) -> Result<()> {
        if self.table.name.is_empty() {
            return Err(strata_error::argument!("Create table with empty name"));
        }

        for col in &self.table.columns {
            validate_column(col)?;
        }

        for idx in &self.table.indexes {
            validate_index(idx)?;
        }

        if let Some(PrimaryKey::Composite(cols)) = &self.table.options.primary_key {
            if cols.is_empty() {
                return Err(strata_error::argument!(
                    "Empty primary key list on table `{}`",
                    self.table.name
                ));
            }
        }

        Ok(())
    }
}

/// `<name> <TYPE>[(<limit>)] <NOT NULL|NULL>[ PRIMARY KEY][ <auto increment>][ DEFAULT '<value>']`
pub fn column_definition<D: Dialect + ?Sized>(
    dialect: &D,
    column: &Column,
    inline_primary_key: bool,
) -> Result<String> {
    validate_column(column)?;

    let sql_type = dialect.sql_type(column.ty);
    let mut sql = format!(
        "{} {}",
        dialect.quote_column_name(&column.name),
        sql_type.name.to_uppercase()
    );

    if let Some(limit) = column.options.limit.or(sql_type.limit) {
        sql.push_str(&format!("({})", limit));
    }

    if column.options.null == Some(true) {
        sql.push_str(" NULL");
    } else {
        sql.push_str(" NOT NULL");
    }

    if inline_primary_key {
        sql.push_str(" PRIMARY KEY");
    }

    if column.options.auto_increment {
        sql.push(' ');
        sql.push_str(dialect.auto_increment_keyword());
    }

    if let Some(default) = &column.options.default {
        sql.push_str(" DEFAULT ");
        sql.push_str(&quote_string(&default.to_string()));
    }

    Ok(sql)
}

pub(crate) fn validate_column(column: &Column) -> Result<()> {
    if column.name.is_empty() {
        return Err(strata_error::argument!(
            "Column of type `{}` has an empty name",
            column.ty
        ));
    }

    Ok(())
}

pub(crate) fn validate_index(index: &Index) -> Result<()> {
    if index.columns.is_empty() {
        return Err(strata_error::argument!("Index without columns"));
    }

    if index.columns.iter().any(|c| c.is_empty()) {
        return Err(strata_error::argument!(
            "Index over {:?} has an empty column name",
            index.columns
        ));
    }

    Ok(())
}
