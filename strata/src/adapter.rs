use strata_conn::Connection;
use strata_ddl::{Column, DatabaseOptions, DdlBuilder, Index, SqlType, Table};

use crate::{
    catalog::{Catalog, Inspector},
    error::Result,
    ledger::Ledger,
    AdapterOptions, AnyDialect,
};

/// Schema operations of one database connection.
///
/// The ledger table is ensured once, when the adapter is built; every later
/// call runs its statements in order and returns the first failure as is.
#[derive(Debug)]
pub struct Adapter<D> {
    dialect: D,
    conn: Connection,
    options: AdapterOptions,
}

impl Adapter<AnyDialect> {
    /// Open `options.url` with the dialect its scheme names
    pub async fn connect(options: AdapterOptions) -> Result<Self> {
        let dialect = AnyDialect::from_options(&options)?;

        Self::open(dialect, options).await
    }
}

impl<D: Catalog> Adapter<D> {
    pub async fn open(dialect: D, options: AdapterOptions) -> Result<Self> {
        let conn = Connection::connect(&options.url).await?;

        Self::with_connection(dialect, conn, options).await
    }

    pub async fn with_connection(
        dialect: D,
        conn: Connection,
        options: AdapterOptions,
    ) -> Result<Self> {
        let adapter = Self {
            dialect,
            conn,
            options,
        };
        adapter.ledger().ensure().await?;

        Ok(adapter)
    }

    /// Release the connection
    pub fn disconnect(self) {
        log::debug!("Disconnect from `{}`", self.dialect.name());
    }

    pub fn dialect(&self) -> &D {
        &self.dialect
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn options(&self) -> &AdapterOptions {
        &self.options
    }

    pub fn ledger(&self) -> Ledger<'_, D> {
        Ledger::new(
            &self.dialect,
            &self.conn,
            self.options.database.as_deref(),
            &self.options.ledger_table,
        )
    }

    pub fn inspector(&self) -> Inspector<'_, D> {
        Inspector::new(&self.dialect, &self.conn, self.options.database.as_deref())
    }

    pub fn quote_table_name(&self, name: &str) -> String {
        self.dialect.quote_table_name(name)
    }

    pub fn quote_column_name(&self, name: &str) -> String {
        self.dialect.quote_column_name(name)
    }

    pub fn get_sql_type(&self, ty: &str) -> Result<SqlType> {
        self.dialect.get_sql_type(ty)
    }

    pub async fn has_table(&self, table: &str) -> Result<bool> {
        self.inspector().table_exists(table).await
    }

    pub async fn create_table(&self, table: &Table) -> Result<()> {
        for sql in self.ddl().create_table(table)? {
            self.execute(&sql).await?;
        }

        Ok(())
    }

    pub async fn rename_table(&self, table: &str, new_name: &str) -> Result<()> {
        self.execute(&self.ddl().rename_table(table, new_name)).await
    }

    pub async fn drop_table(&self, table: &str) -> Result<()> {
        self.execute(&self.ddl().drop_table(table)).await
    }

    pub async fn has_column(&self, table: &str, column: &str) -> Result<bool> {
        self.inspector().column_exists(table, column).await
    }

    pub async fn add_column(&self, table: &str, column: &Column) -> Result<()> {
        self.execute(&self.ddl().add_column(table, column)?).await
    }

    /// The current definition is read back so the rename keeps type and nullability
    pub async fn rename_column(&self, table: &str, column: &str, new_name: &str) -> Result<()> {
        let definition = self
            .inspector()
            .column(table, column)
            .await?
            .ok_or_else(|| {
                crate::error::column_not_found!(
                    "The specified column doesn't exist: {}.{}",
                    table,
                    column
                )
            })?;

        self.execute(&self.ddl().rename_column(table, column, new_name, &definition))
            .await
    }

    pub async fn drop_column(&self, table: &str, column: &str) -> Result<()> {
        self.execute(&self.ddl().drop_column(table, column)).await
    }

    /// Some index covers at least `columns`
    pub async fn has_index(&self, table: &str, columns: &[&str]) -> Result<bool> {
        self.inspector().index_exists(table, columns).await
    }

    pub async fn add_index(&self, table: &str, index: &Index) -> Result<()> {
        self.execute(&self.ddl().add_index(table, index)?).await
    }

    /// Drop every index made of exactly `columns`
    pub async fn drop_index(&self, table: &str, columns: &[&str]) -> Result<()> {
        let names = self
            .inspector()
            .indexes(table)
            .await?
            .into_iter()
            .filter(|idx| idx.matches(columns))
            .map(|idx| idx.name)
            .collect::<Vec<_>>();

        if names.is_empty() {
            return Err(crate::error::index_not_found!(
                "No index on {} with columns {:?}",
                table,
                columns
            ));
        }

        for name in names {
            self.drop_index_by_name(table, &name).await?;
        }

        Ok(())
    }

    pub async fn drop_index_by_name(&self, table: &str, name: &str) -> Result<()> {
        self.execute(&self.ddl().drop_index(table, name)).await
    }

    /// A missing charset falls back to [`AdapterOptions::charset`]
    pub async fn create_database(&self, name: &str, options: &DatabaseOptions) -> Result<()> {
        let mut options = options.clone();
        if options.charset.is_none() {
            options.charset = Some(self.options.charset.clone());
        }

        self.execute(&self.ddl().create_database(name, &options)?)
            .await
    }

    pub async fn drop_database(&self, name: &str) -> Result<()> {
        self.execute(&self.ddl().drop_database(name)?).await
    }

    fn ddl(&self) -> DdlBuilder<'_, D> {
        DdlBuilder::new(&self.dialect)
    }

    async fn execute(&self, sql: &str) -> Result<()> {
        log::debug!("{}", sql);
        self.conn.execute(sql).await?;

        Ok(())
    }
}
