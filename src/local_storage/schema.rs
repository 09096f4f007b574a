//! SQLite schema for the local storage database.

use crate::sqlite_column;
use crate::sqlite_persistence::{SqlType, Table, VersionedSchema};

// =============================================================================
// Version 1 - Key-value items
// =============================================================================

const LOCAL_STORAGE_TABLE_V1: Table = Table {
    name: "local_storage",
    columns: &[
        sqlite_column!("key", &SqlType::Text, is_primary_key = true),
        sqlite_column!("value", &SqlType::Text, non_null = true),
        sqlite_column!(
            "updated_at",
            &SqlType::Text,
            non_null = true,
            default_value = Some("(datetime('now'))")
        ),
    ],
};

pub const LOCAL_STORAGE_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 1,
    tables: &[LOCAL_STORAGE_TABLE_V1],
    migration: None,
}];

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_v1_schema_creates_successfully() {
        let conn = Connection::open_in_memory().unwrap();
        let schema = &LOCAL_STORAGE_VERSIONED_SCHEMAS[0];
        schema.create(&conn).unwrap();
        schema.validate(&conn).unwrap();
    }

    #[test]
    fn test_updated_at_has_default() {
        let conn = Connection::open_in_memory().unwrap();
        LOCAL_STORAGE_VERSIONED_SCHEMAS[0].create(&conn).unwrap();

        conn.execute(
            "INSERT INTO local_storage (key, value) VALUES ('readlist', '[]')",
            [],
        )
        .unwrap();
        let updated_at: String = conn
            .query_row(
                "SELECT updated_at FROM local_storage WHERE key = 'readlist'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert!(!updated_at.is_empty());
    }
}
