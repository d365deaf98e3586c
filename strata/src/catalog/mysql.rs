use strata_conn::Row;
use strata_ddl::{ColumnDefinition, MysqlDialect};
use strata_error::Result;

use super::{Catalog, IndexEntry};

impl Catalog for MysqlDialect {
    // `SHOW TABLES` names its only column after the schema, read it by position
    fn decode_table(&self, row: &Row) -> Result<String> {
        row.get_at(0)
    }

    fn decode_column(&self, row: &Row) -> Result<ColumnDefinition> {
        Ok(ColumnDefinition {
            name: row.get("Field")?,
            ty: row.get("Type")?,
            nullable: row.get::<String>("Null")?.eq_ignore_ascii_case("YES"),
            default: row.get::<Option<String>>("Default")?,
            extra: row.get::<Option<String>>("Extra")?.unwrap_or_default(),
        })
    }

    // Functional key parts report a NULL `Column_name`
    fn decode_index(&self, row: &Row) -> Result<Option<IndexEntry>> {
        let column_name = match row.get::<Option<String>>("Column_name")? {
            Some(column_name) => column_name,
            None => return Ok(None),
        };

        Ok(Some(IndexEntry {
            index_name: row.get("Key_name")?,
            column_name,
            unique: row.get::<u64>("Non_unique")? == 0,
        }))
    }
}
