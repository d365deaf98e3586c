//! # Sqlite driver
//!
//! Table-valued pragma functions (`pragma_table_info` and friends) used by the
//! catalog queries need sqlite 3.16 or newer, the bundled build satisfies that.

use std::sync::{Arc, Mutex};

use strata_error::Result;
use tokio::task::spawn_blocking;

use crate::{Driver, Row, Value};

#[derive(Clone)]
pub struct SqliteConnProxy {
    conn: Arc<Mutex<rusqlite::Connection>>,
}

impl SqliteConnProxy {
    pub fn new(conn: rusqlite::Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }
}

#[async_trait::async_trait]
impl Driver for SqliteConnProxy {
    async fn execute(&self, sql: &str, params: Vec<Value>) -> Result<u64> {
        let sql_string = sql.to_string();
        let proxy = self.clone();
        let affected = spawn_blocking(move || {
            let conn = proxy
                .conn
                .lock()
                .map_err(|e| strata_error::connection!("SqliteConnProxy lock error: {}", e))?;

            log::trace!("Execute `{}` {:?}", sql_string, params);
            let affected = conn
                .execute(&sql_string, &strata_param_to_rusqlite_param(&params)[..])
                .map_err(|e| strata_error::execution!("{}, sql: `{}`", e, sql_string))?;

            Result::Ok(affected as u64)
        })
        .await
        .map_err(|e| strata_error::runtime!("Tokio join error: {}", e))??;

        Ok(affected)
    }

    async fn query(&self, sql: &str, params: Vec<Value>) -> Result<Vec<Row>> {
        let sql_string = sql.to_string();
        let proxy = self.clone();
        let rows = spawn_blocking(move || {
            let conn = proxy
                .conn
                .lock()
                .map_err(|e| strata_error::connection!("SqliteConnProxy lock error: {}", e))?;

            log::trace!("Prepare query `{}`", sql_string);
            let mut stmt = conn
                .prepare(&sql_string)
                .map_err(|e| strata_error::execution!("{}, sql: `{}`", e, sql_string))?;

            log::trace!("Query {:?}", params);
            let mut sql_rows = stmt
                .query(&strata_param_to_rusqlite_param(&params)[..])
                .map_err(|e| strata_error::execution!("{}, sql: `{}`", e, sql_string))?;
            let mut rows = Vec::<Row>::new();
            while let Some(row) = sql_rows
                .next()
                .map_err(|e| strata_error::execution!("Get row error: {}", e))?
            {
                let row = rusqlite_row_to_strata_row(row)?;
                log::trace!("Append row: {:?}", row);
                rows.push(row);
            }

            Result::Ok(rows)
        })
        .await
        .map_err(|e| strata_error::runtime!("Tokio join error: {}", e))??;

        Ok(rows)
    }
}

fn strata_param_to_rusqlite_param(params: &[Value]) -> Vec<&'_ dyn rusqlite::ToSql> {
    params.iter().map(|v| v as &dyn rusqlite::ToSql).collect()
}

fn rusqlite_row_to_strata_row(src: &rusqlite::Row<'_>) -> Result<Row> {
    use rusqlite::types::ValueRef;

    let stmt = src.as_ref();

    let mut values = Vec::with_capacity(stmt.column_count());
    for i in 0..stmt.column_count() {
        let column_name = stmt
            .column_name(i)
            .map_err(|e| strata_error::execution!("Get column name error: {}", e))?
            .to_string();

        let value = match src
            .get_ref(i)
            .map_err(|e| strata_error::execution!("Get column value error: {}", e))?
        {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(v) => Value::I64(v),
            ValueRef::Real(v) => Value::F64(v),
            ValueRef::Text(v) => Value::Str(String::from_utf8_lossy(v).into_owned()),
            ValueRef::Blob(v) => Value::Bytes(v.to_vec()),
        };
        values.push((column_name, value));
    }

    Ok(Row::new(values))
}

impl rusqlite::ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<rusqlite::types::ToSqlOutput<'_>> {
        match &self {
            Value::Null => <Option<u8> as rusqlite::ToSql>::to_sql(&None),
            Value::Bool(v) => <bool as rusqlite::ToSql>::to_sql(v),
            Value::I64(v) => <i64 as rusqlite::ToSql>::to_sql(v),
            Value::U64(v) => {
                let v = i64::try_from(*v)
                    .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
                Ok(rusqlite::types::ToSqlOutput::from(v))
            }
            Value::F64(v) => <f64 as rusqlite::ToSql>::to_sql(v),
            Value::Str(v) => <String as rusqlite::ToSql>::to_sql(v),
            Value::Bytes(v) => <Vec<u8> as rusqlite::ToSql>::to_sql(v),
        }
    }
}
