mod connection;
mod drivers;
mod value;

pub use connection::Connection;
pub use value::{FromValue, ToValue, Value};

pub mod driver {
    #[cfg(feature = "sqlite")]
    pub use rusqlite;

    #[cfg(feature = "mysql")]
    pub use mysql_lib as mysql;
}

use strata_error::Result;

/// Execution capability every backend provides.
///
/// Both calls block until the server has answered; a rejected statement comes
/// back as `Error::Execution` carrying the driver message and the statement.
#[async_trait::async_trait]
pub trait Driver: Sync + Send {
    async fn execute(&self, sql: &str, params: Vec<Value>) -> Result<u64>; // Affected rows
    async fn query(&self, sql: &str, params: Vec<Value>) -> Result<Vec<Row>>;
}

/// One result row, columns kept in the order the server returned them.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub(crate) values: Vec<(String, Value)>,
}

impl Row {
    pub fn new(values: Vec<(String, Value)>) -> Self {
        Self { values }
    }

    pub fn get<T: FromValue<Output = T>>(&self, column: &str) -> Result<T> {
        if let Some((_, v)) = self.values.iter().find(|(name, _)| name == column) {
            Ok(T::from_value(v)?)
        } else {
            Err(strata_error::out_of_range!(
                "Column `{}` not found, columns: {:?}",
                column,
                self.columns()
            ))
        }
    }

    pub fn get_at<T: FromValue<Output = T>>(&self, index: usize) -> Result<T> {
        if let Some((_, v)) = self.values.get(index) {
            Ok(T::from_value(v)?)
        } else {
            Err(strata_error::out_of_range!(
                "Index out of range: index: {}, values length: {}",
                index,
                self.values.len()
            ))
        }
    }

    pub fn columns(&self) -> Vec<&str> {
        self.values.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> Row {
        Row::new(vec![
            ("Field".into(), Value::Bytes(b"email".to_vec())),
            ("Null".into(), Value::Str("NO".into())),
            ("Non_unique".into(), Value::I64(1)),
        ])
    }

    #[test]
    fn test_get_by_name() {
        let row = row();
        assert_eq!(row.get::<String>("Field").unwrap(), "email");
        assert_eq!(row.get::<String>("Null").unwrap(), "NO");
        assert_eq!(row.get::<u64>("Non_unique").unwrap(), 1);
        assert!(matches!(
            row.get::<String>("Extra"),
            Err(strata_error::Error::OutOfRange(_))
        ));
    }

    #[test]
    fn test_get_by_position() {
        let row = row();
        assert_eq!(row.get_at::<String>(0).unwrap(), "email");
        assert!(row.get_at::<String>(3).is_err());
        assert_eq!(row.columns(), vec!["Field", "Null", "Non_unique"]);
    }
}
