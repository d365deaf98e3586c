use std::{
    future::Future,
    sync::{Arc, Mutex},
};

use strata::{
    conn::{Connection, Driver, Row, Value},
    ddl::{MysqlDialect, SqliteDialect},
    error::Result,
    Adapter, AdapterOptions,
};

/// Run `f` against a fresh in-memory sqlite adapter
pub async fn run_test<Fn, Fut>(f: Fn)
where
    Fn: FnOnce(Adapter<SqliteDialect>) -> Fut,
    Fut: Future<Output = ()>,
{
    env_logger::try_init().ok();

    let adapter = Adapter::open(SqliteDialect, AdapterOptions::new("sqlite://memory"))
        .await
        .unwrap();

    f(adapter).await;
}

/// Mysql adapter over a [`RecordingDriver`], nothing reaches a server
pub async fn mysql_adapter(driver: RecordingDriver) -> Adapter<MysqlDialect> {
    env_logger::try_init().ok();

    Adapter::with_connection(
        MysqlDialect::default(),
        Connection::new(Arc::new(driver)),
        AdapterOptions::new("mysql://root@127.0.0.1:3306/app"),
    )
    .await
    .unwrap()
}

/// Driver that keeps every statement it is given and answers queries from a script.
///
/// A query gets the rows of the first scripted prefix it starts with, or no rows.
#[derive(Clone, Default)]
pub struct RecordingDriver {
    executed: Arc<Mutex<Vec<String>>>,
    queried: Arc<Mutex<Vec<String>>>,
    script: Arc<Mutex<Vec<(String, Vec<Row>)>>>,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(self, sql_prefix: &str, rows: Vec<Row>) -> Self {
        self.script.lock().unwrap().push((sql_prefix.into(), rows));
        self
    }

    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }

    pub fn queried(&self) -> Vec<String> {
        self.queried.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Driver for RecordingDriver {
    async fn execute(&self, sql: &str, _params: Vec<Value>) -> Result<u64> {
        self.executed.lock().unwrap().push(sql.into());

        Ok(0)
    }

    async fn query(&self, sql: &str, _params: Vec<Value>) -> Result<Vec<Row>> {
        self.queried.lock().unwrap().push(sql.into());

        Ok(self
            .script
            .lock()
            .unwrap()
            .iter()
            .find(|(prefix, _)| sql.starts_with(prefix.as_str()))
            .map(|(_, rows)| rows.clone())
            .unwrap_or_default())
    }
}

/// Row the way mysql's text protocol returns it, every value as bytes
pub fn text_row(values: &[(&str, Option<&str>)]) -> Row {
    Row::new(
        values
            .iter()
            .map(|(name, value)| {
                let value = match value {
                    Some(v) => Value::Bytes(v.as_bytes().to_vec()),
                    None => Value::Null,
                };
                (name.to_string(), value)
            })
            .collect(),
    )
}
