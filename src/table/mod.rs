pub mod loader;

pub use loader::{DEFAULT_SITE_LABEL, LoadedTable, load_table, parse_table};
