use std::{fmt, str::FromStr};

use strata_error::{Error, Result};

/// Charset used by `CREATE DATABASE` when none is given.
pub const DEFAULT_CHARSET: &str = "utf8";

/// Abstract column types a migration can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    PrimaryKey,
    String,
    Text,
    Integer,
    Float,
    Decimal,
    DateTime,
    Timestamp,
    Time,
    Date,
    Binary,
    Boolean,
}

impl ColumnType {
    pub const ALL: [ColumnType; 12] = [
        ColumnType::PrimaryKey,
        ColumnType::String,
        ColumnType::Text,
        ColumnType::Integer,
        ColumnType::Float,
        ColumnType::Decimal,
        ColumnType::DateTime,
        ColumnType::Timestamp,
        ColumnType::Time,
        ColumnType::Date,
        ColumnType::Binary,
        ColumnType::Boolean,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PrimaryKey => "primary_key",
            Self::String => "string",
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Decimal => "decimal",
            Self::DateTime => "datetime",
            Self::Timestamp => "timestamp",
            Self::Time => "time",
            Self::Date => "date",
            Self::Binary => "binary",
            Self::Boolean => "boolean",
        }
    }
}

impl FromStr for ColumnType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .find(|ty| ty.as_str() == s)
            .copied()
            .ok_or_else(|| strata_error::unsupported_type!("The type: \"{}\" is not supported", s))
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dialect-resolved column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SqlType {
    pub name: &'static str,
    pub limit: Option<u32>,
}

impl SqlType {
    pub const fn new(name: &'static str) -> Self {
        Self { name, limit: None }
    }

    pub const fn with_limit(name: &'static str, limit: u32) -> Self {
        Self {
            name,
            limit: Some(limit),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(v) => f.write_str(v),
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Bool(v) => f.write_str(if *v { "1" } else { "0" }),
        }
    }
}

impl From<&str> for DefaultValue {
    fn from(v: &str) -> Self {
        Self::Str(v.into())
    }
}

impl From<String> for DefaultValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<i32> for DefaultValue {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<i64> for DefaultValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for DefaultValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for DefaultValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnOptions {
    pub limit: Option<u32>,            // Overrides the dialect's type limit
    pub null: Option<bool>,            // Only `Some(true)` renders NULL
    pub default: Option<DefaultValue>, // Rendered as a string literal
    pub auto_increment: bool,
    pub after: Option<String>, // Column position, honoured by `ADD COLUMN` on mysql
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub ty: ColumnType,
    pub options: ColumnOptions,
}

impl Column {
    pub fn new(name: &str, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
            options: ColumnOptions::default(),
        }
    }

    /// Build a column from a type name, e.g. as written in a migration file
    pub fn parse(name: &str, ty: &str) -> Result<Self> {
        Ok(Self::new(name, ty.parse()?))
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.options.limit = Some(limit);
        self
    }

    pub fn null(mut self, null: bool) -> Self {
        self.options.null = Some(null);
        self
    }

    pub fn default_value(mut self, value: impl Into<DefaultValue>) -> Self {
        self.options.default = Some(value.into());
        self
    }

    pub fn auto_increment(mut self) -> Self {
        self.options.auto_increment = true;
        self
    }

    pub fn after(mut self, column: &str) -> Self {
        self.options.after = Some(column.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexOptions {
    pub unique: bool,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    pub columns: Vec<String>,
    pub options: IndexOptions,
}

impl Index {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            options: IndexOptions::default(),
        }
    }

    pub fn unique(mut self) -> Self {
        self.options.unique = true;
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.options.name = Some(name.into());
        self
    }

    /// Explicit name, or `<table>_<col1>_<col2>..._index`
    pub fn name_for(&self, table: &str) -> String {
        if let Some(name) = &self.options.name {
            return name.clone();
        }

        let table = table.rsplit('.').next().unwrap_or(table);
        format!("{}_{}_index", table, self.columns.join("_"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimaryKey {
    Single(String),
    Composite(Vec<String>),
}

impl PrimaryKey {
    pub fn columns(&self) -> Vec<&str> {
        match self {
            Self::Single(col) => vec![col.as_str()],
            Self::Composite(cols) => cols.iter().map(|c| c.as_str()).collect(),
        }
    }
}

impl From<&str> for PrimaryKey {
    fn from(v: &str) -> Self {
        Self::Single(v.into())
    }
}

impl From<String> for PrimaryKey {
    fn from(v: String) -> Self {
        Self::Single(v)
    }
}

impl From<Vec<&str>> for PrimaryKey {
    fn from(v: Vec<&str>) -> Self {
        Self::Composite(v.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<String>> for PrimaryKey {
    fn from(v: Vec<String>) -> Self {
        Self::Composite(v)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    pub id: bool, // Default is true, adds an auto increment `id` primary key
    pub primary_key: Option<PrimaryKey>, // Replaced by `id` when `id` is set
    pub engine: Option<String>,          // Falls back to the dialect's engine
    pub collation: Option<String>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            id: true,
            primary_key: None,
            engine: None,
            collation: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
    pub indexes: Vec<Index>,
    pub options: TableOptions,
}

impl Table {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            columns: vec![],
            indexes: vec![],
            options: TableOptions::default(),
        }
    }

    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn index(mut self, index: Index) -> Self {
        self.indexes.push(index);
        self
    }

    /// Skip the implicit `id` column
    pub fn without_id(mut self) -> Self {
        self.options.id = false;
        self
    }

    pub fn primary_key(mut self, key: impl Into<PrimaryKey>) -> Self {
        self.options.primary_key = Some(key.into());
        self
    }

    pub fn engine(mut self, engine: &str) -> Self {
        self.options.engine = Some(engine.into());
        self
    }

    pub fn collation(mut self, collation: &str) -> Self {
        self.options.collation = Some(collation.into());
        self
    }
}

/// Column shape as reported by the database catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    pub name: String,
    pub ty: String,
    pub nullable: bool,
    pub default: Option<String>,
    pub extra: String, // e.g. `auto_increment`
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatabaseOptions {
    pub charset: Option<String>,
    pub collation: Option<String>,
}

impl DatabaseOptions {
    pub fn charset(mut self, charset: &str) -> Self {
        self.charset = Some(charset.into());
        self
    }

    pub fn collation(mut self, collation: &str) -> Self {
        self.collation = Some(collation.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_column_type() {
        for ty in ColumnType::ALL {
            assert_eq!(ty.as_str().parse::<ColumnType>().unwrap(), ty);
        }

        assert!(matches!(
            "geometry".parse::<ColumnType>(),
            Err(Error::UnsupportedType(_))
        ));
        assert!(Column::parse("a", "String").is_err());
    }

    #[test]
    fn test_index_name() {
        assert_eq!(Index::new(["a", "b"]).name_for("t"), "t_a_b_index");
        assert_eq!(Index::new(["a"]).name_for("app.users"), "users_a_index");
        assert_eq!(Index::new(["a"]).name("uniq_a").name_for("t"), "uniq_a");
    }

    #[test]
    fn test_default_value_text() {
        assert_eq!(DefaultValue::from(true).to_string(), "1");
        assert_eq!(DefaultValue::from(12).to_string(), "12");
        assert_eq!(DefaultValue::from("x").to_string(), "x");
    }
}
