mod versioned_schema;

pub use versioned_schema::{open_versioned_db, Column, SqlType, Table, VersionedSchema};

/// Offset added to schema versions when stored in `PRAGMA user_version`, so a
/// database created by something else is never mistaken for one of ours.
pub const BASE_DB_VERSION: usize = 77000;
