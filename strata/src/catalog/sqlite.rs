use strata_conn::Row;
use strata_ddl::{ColumnDefinition, SqliteDialect};
use strata_error::Result;

use super::{Catalog, IndexEntry};

impl Catalog for SqliteDialect {
    fn decode_table(&self, row: &Row) -> Result<String> {
        row.get("name")
    }

    fn decode_column(&self, row: &Row) -> Result<ColumnDefinition> {
        Ok(ColumnDefinition {
            name: row.get("name")?,
            ty: row.get("type")?,
            nullable: !row.get::<bool>("notnull")?,
            default: row.get::<Option<String>>("dflt_value")?,
            extra: if row.get::<i64>("pk")? > 0 {
                "primary key".into()
            } else {
                String::new()
            },
        })
    }

    fn decode_index(&self, row: &Row) -> Result<Option<IndexEntry>> {
        // Expression index parts have no column name
        let column_name = match row.get::<Option<String>>("column_name")? {
            Some(column_name) => column_name,
            None => return Ok(None),
        };

        Ok(Some(IndexEntry {
            index_name: row.get("index_name")?,
            column_name,
            unique: row.get("is_unique")?,
        }))
    }
}

#[cfg(test)]
mod tests {
    use strata_conn::Value;

    use super::*;

    #[test]
    fn test_decode_table_info() {
        let row = Row::new(vec![
            ("name".into(), Value::Str("email".into())),
            ("type".into(), Value::Str("VARCHAR(255)".into())),
            ("notnull".into(), Value::I64(1)),
            ("dflt_value".into(), Value::Str("'x'".into())),
            ("pk".into(), Value::I64(0)),
        ]);
        assert_eq!(
            SqliteDialect.decode_column(&row).unwrap(),
            ColumnDefinition {
                name: "email".into(),
                ty: "VARCHAR(255)".into(),
                nullable: false,
                default: Some("'x'".into()),
                extra: String::new(),
            }
        );
    }

    #[test]
    fn test_decode_index_row() {
        let row = Row::new(vec![
            ("index_name".into(), Value::Str("users_age_index".into())),
            ("is_unique".into(), Value::I64(0)),
            ("column_name".into(), Value::Str("age".into())),
        ]);
        let entry = SqliteDialect.decode_index(&row).unwrap().unwrap();
        assert_eq!(entry.index_name, "users_age_index");
        assert!(!entry.unique);

        let row = Row::new(vec![
            ("index_name".into(), Value::Str("users_lower_email".into())),
            ("is_unique".into(), Value::I64(0)),
            ("column_name".into(), Value::Null),
        ]);
        assert_eq!(SqliteDialect.decode_index(&row).unwrap(), None);
    }
}
