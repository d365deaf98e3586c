mod adapter;
mod any;
pub mod catalog;
mod ledger;
mod options;

pub use strata_conn as conn;
pub use strata_ddl as ddl;
pub use strata_error as error;

pub use adapter::Adapter;
pub use any::AnyDialect;
pub use catalog::{Catalog, IndexDescription, Inspector};
pub use ledger::{Ledger, LedgerEntry, DEFAULT_LEDGER_TABLE};
pub use options::AdapterOptions;
