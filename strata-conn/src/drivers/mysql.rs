use std::sync::{Arc, Mutex};

use mysql_lib::prelude::Queryable;
use strata_error::Result;
use tokio::task::spawn_blocking;

use crate::{Driver, Row, Value};

pub struct MysqlConnProxy {
    conn: Arc<Mutex<mysql_lib::Conn>>,
}

impl MysqlConnProxy {
    pub fn new(conn: mysql_lib::Conn) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }
}

#[async_trait::async_trait]
impl Driver for MysqlConnProxy {
    async fn execute(&self, sql: &str, params: Vec<Value>) -> Result<u64> {
        let sql_string = sql.to_string();
        let conn = self.conn.clone();
        let affected = spawn_blocking(move || {
            let mut conn = conn
                .lock()
                .map_err(|e| strata_error::connection!("MysqlConnProxy lock error: {}", e))?;

            log::trace!("Execute `{}` {:?}", sql_string, params);
            if params.is_empty() {
                // DDL goes through the text protocol, not every statement can be prepared
                conn.query_drop(&sql_string).map_err(|e| {
                    strata_error::execution!("{}, sql: `{}`", e, sql_string)
                })?;
            } else {
                conn.exec_drop(&sql_string, params).map_err(|e| {
                    strata_error::execution!("{}, sql: `{}`", e, sql_string)
                })?;
            }

            Result::Ok(conn.affected_rows())
        })
        .await
        .map_err(|e| strata_error::runtime!("Tokio join error: {}", e))??;

        Ok(affected)
    }

    async fn query(&self, sql: &str, params: Vec<Value>) -> Result<Vec<Row>> {
        let sql_string = sql.to_string();
        let conn = self.conn.clone();
        let rows = spawn_blocking(move || {
            let mut conn = conn
                .lock()
                .map_err(|e| strata_error::connection!("MysqlConnProxy lock error: {}", e))?;

            log::trace!("Query `{}` {:?}", sql_string, params);
            let mysql_rows: Vec<mysql_lib::Row> = if params.is_empty() {
                conn.query(&sql_string)
            } else {
                conn.exec(&sql_string, params)
            }
            .map_err(|e| strata_error::execution!("{}, sql: `{}`", e, sql_string))?;

            let mut rows = Vec::<Row>::with_capacity(mysql_rows.len());
            for mysql_row in mysql_rows {
                let row = mysql_row_to_strata_row(mysql_row)?;
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

fn mysql_row_to_strata_row(src: mysql_lib::Row) -> Result<Row> {
    let mut values = Vec::with_capacity(src.len());
    let cols = src.columns_ref();
    for i in 0..src.len() {
        let column_name = cols
            .get(i)
            .ok_or(strata_error::execution!(
                "Cannot get column name of index {}",
                i
            ))?
            .name_str()
            .to_string();

        if let Some(mysql_value) = src.as_ref(i) {
            let value = match mysql_value {
                mysql_lib::Value::NULL => Value::Null,
                mysql_lib::Value::Bytes(v) => Value::Bytes(v.clone()),
                mysql_lib::Value::Int(v) => Value::I64(*v),
                mysql_lib::Value::UInt(v) => Value::U64(*v),
                mysql_lib::Value::Float(v) => Value::F64(*v as f64),
                mysql_lib::Value::Double(v) => Value::F64(*v),
                mysql_lib::Value::Date(year, month, day, hour, minute, second, _) => {
                    Value::Str(format!(
                        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
                        year, month, day, hour, minute, second
                    ))
                }
                mysql_lib::Value::Time(neg, days, hours, minutes, seconds, _) => {
                    Value::Str(format!(
                        "{}{:02}:{:02}:{:02}",
                        if *neg { "-" } else { "" },
                        *days * 24 + *hours as u32,
                        minutes,
                        seconds
                    ))
                }
            };

            values.push((column_name, value));
        }
    }

    Ok(Row::new(values))
}

impl From<Value> for mysql_lib::Value {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => Self::NULL,
            Value::Bool(v) => Self::Int(v as _),
            Value::I64(v) => Self::Int(v),
            Value::U64(v) => Self::UInt(v),
            Value::F64(v) => Self::Double(v),
            Value::Str(v) => Self::Bytes(v.into_bytes()),
            Value::Bytes(v) => Self::Bytes(v),
        }
    }
}
