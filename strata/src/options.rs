use serde::Deserialize;

use crate::{
    ddl::{DEFAULT_CHARSET, DEFAULT_ENGINE},
    ledger::DEFAULT_LEDGER_TABLE,
};

/// Connection and naming settings of an [`Adapter`](crate::Adapter).
///
/// Missing keys fall back to the defaults, so a config file may carry only
/// the `url`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AdapterOptions {
    pub url: String,
    pub database: Option<String>, // Narrows table listings to one schema
    pub ledger_table: String,
    pub engine: String,
    pub charset: String,
}

impl Default for AdapterOptions {
    fn default() -> Self {
        Self {
            url: "sqlite://memory".into(),
            database: None,
            ledger_table: DEFAULT_LEDGER_TABLE.into(),
            engine: DEFAULT_ENGINE.into(),
            charset: DEFAULT_CHARSET.into(),
        }
    }
}

impl AdapterOptions {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn database(mut self, database: &str) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn ledger_table(mut self, table: &str) -> Self {
        self.ledger_table = table.into();
        self
    }

    pub fn engine(mut self, engine: &str) -> Self {
        self.engine = engine.into();
        self
    }

    pub fn charset(mut self, charset: &str) -> Self {
        self.charset = charset.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config() {
        let opts: AdapterOptions =
            serde_json::from_str(r#"{"url": "mysql://root@localhost/app", "database": "app"}"#)
                .unwrap();
        assert_eq!(opts.url, "mysql://root@localhost/app");
        assert_eq!(opts.database.as_deref(), Some("app"));
        assert_eq!(opts.ledger_table, "strata_log");
        assert_eq!(opts.engine, "InnoDB");
        assert_eq!(opts.charset, "utf8");
    }

    #[test]
    fn test_builder() {
        let opts = AdapterOptions::new("sqlite:///tmp/app.db")
            .ledger_table("phinxlog")
            .charset("utf8mb4");
        assert_eq!(opts.ledger_table, "phinxlog");
        assert_eq!(opts.charset, "utf8mb4");
        assert_eq!(opts.database, None);
    }
}
