pub mod csv;
pub mod record;
pub mod store;
pub mod table;
pub mod validate;

pub use csv::parse_csv;
pub use record::Record;
pub use store::{Database, LoadError, Store, TableCount, TableSpec, UnitBundle, TABLE_SPECS};
pub use table::Table;
pub use validate::{validate_database, ValidationReport, ValidationSeverity};
