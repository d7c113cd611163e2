//! Database initialization and table definitions
//!
//! This module handles the setup of the embedded redb database and provides
//! small typed helpers over its tables. Every table maps a string key to a
//! JSON-serialized record.

use redb::{
    CommitError, Database, DatabaseError, ReadableDatabase, ReadableTable, ReadableTableMetadata,
    StorageError, TableDefinition, TableError, TransactionError,
};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

use crate::config::Config;

type JsonTable = TableDefinition<'static, &'static str, &'static str>;

/// Station catalogue
///
/// Key: zero-padded catalogue position (e.g. "0042"), so iteration follows
/// the order stations were seeded in
pub const TABLE_PORTS: JsonTable = TableDefinition::new("ports_v1");

/// Key: container type id
pub const TABLE_CONTAINER_TYPES: JsonTable = TableDefinition::new("container_types_v1");

/// Key: cargo type id
pub const TABLE_CARGO_TYPES: JsonTable = TableDefinition::new("cargo_types_v1");

/// Key: route id
pub const TABLE_ROUTES: JsonTable = TableDefinition::new("routes_v1");

/// Key: normalized (trimmed, lowercase) email
pub const TABLE_USERS: JsonTable = TableDefinition::new("users_v1");

/// Key: booking id
pub const TABLE_BOOKINGS: JsonTable = TableDefinition::new("bookings_v1");

/// Singleton settings records, see `SETTINGS_WEBHOOK`
pub const TABLE_SETTINGS: JsonTable = TableDefinition::new("settings_v1");

pub const SETTINGS_WEBHOOK: &str = "webhook";

const ALL_TABLES: [JsonTable; 7] = [
    TABLE_PORTS,
    TABLE_CONTAINER_TYPES,
    TABLE_CARGO_TYPES,
    TABLE_ROUTES,
    TABLE_USERS,
    TABLE_BOOKINGS,
    TABLE_SETTINGS,
];

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),
    #[error("transaction error: {0}")]
    Transaction(#[from] TransactionError),
    #[error("table error: {0}")]
    Table(#[from] TableError),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("commit error: {0}")]
    Commit(#[from] CommitError),
    #[error("corrupt record: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe reference to the embedded database
    pub db: Arc<Database>,
    pub config: Arc<Config>,

    /// Outbound client for the search webhook
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(db: Database, config: Config) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.webhook_timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            db: Arc::new(db),
            config: Arc::new(config),
            http,
        }
    }
}

/// Creates or opens the database file and makes sure every table exists
///
/// # Example
///
/// ```no_run
/// # use cargosearch::database::init_db;
/// let db = init_db("data.db").expect("Failed to initialize database");
/// ```
pub fn init_db(db_path: &str) -> Result<Database, StoreError> {
    let db = Database::create(db_path)?;

    let write_txn = db.begin_write()?;
    for table in ALL_TABLES {
        write_txn.open_table(table)?;
    }
    write_txn.commit()?;

    Ok(db)
}

/// Returns every record of a table in key order
pub fn list<T: DeserializeOwned>(db: &Database, table: JsonTable) -> Result<Vec<T>, StoreError> {
    let read_txn = db.begin_read()?;
    let table = read_txn.open_table(table)?;

    let mut records = Vec::new();
    for entry in table.iter()? {
        let (_, value) = entry?;
        records.push(serde_json::from_str(value.value())?);
    }
    Ok(records)
}

pub fn get<T: DeserializeOwned>(
    db: &Database,
    table: JsonTable,
    key: &str,
) -> Result<Option<T>, StoreError> {
    let read_txn = db.begin_read()?;
    let table = read_txn.open_table(table)?;

    let record = match table.get(key)? {
        Some(value) => Some(serde_json::from_str(value.value())?),
        None => None,
    };
    Ok(record)
}

pub fn count(db: &Database, table: JsonTable) -> Result<u64, StoreError> {
    let read_txn = db.begin_read()?;
    let table = read_txn.open_table(table)?;
    Ok(table.len()?)
}

/// Inserts or overwrites a record
pub fn put<T: Serialize>(
    db: &Database,
    table: JsonTable,
    key: &str,
    record: &T,
) -> Result<(), StoreError> {
    let json = serde_json::to_string(record)?;

    let write_txn = db.begin_write()?;
    {
        let mut table = write_txn.open_table(table)?;
        table.insert(key, json.as_str())?;
    }
    write_txn.commit()?;
    Ok(())
}

/// Inserts a record only if the key is free
///
/// Returns `false` without writing when the key is already taken. The check
/// and the insert share one write transaction.
pub fn insert_new<T: Serialize>(
    db: &Database,
    table: JsonTable,
    key: &str,
    record: &T,
) -> Result<bool, StoreError> {
    let json = serde_json::to_string(record)?;

    let write_txn = db.begin_write()?;
    {
        let mut table = write_txn.open_table(table)?;
        if table.get(key)?.is_some() {
            return Ok(false);
        }
        table.insert(key, json.as_str())?;
    }
    write_txn.commit()?;
    Ok(true)
}

/// Overwrites an existing record; returns `false` if the key is absent
pub fn update<T: Serialize>(
    db: &Database,
    table: JsonTable,
    key: &str,
    record: &T,
) -> Result<bool, StoreError> {
    let json = serde_json::to_string(record)?;

    let write_txn = db.begin_write()?;
    {
        let mut table = write_txn.open_table(table)?;
        if table.get(key)?.is_none() {
            return Ok(false);
        }
        table.insert(key, json.as_str())?;
    }
    write_txn.commit()?;
    Ok(true)
}

/// Deletes a record; returns `false` if the key is absent
pub fn remove(db: &Database, table: JsonTable, key: &str) -> Result<bool, StoreError> {
    let write_txn = db.begin_write()?;
    let removed = {
        let mut table = write_txn.open_table(table)?;
        let existing = table.remove(key)?;
        existing.is_some()
    };
    write_txn.commit()?;
    Ok(removed)
}

/// Drops all records of a table and writes `records` in one transaction
pub fn replace_all<T: Serialize>(
    db: &Database,
    table: JsonTable,
    records: &[(String, T)],
) -> Result<(), StoreError> {
    let encoded = records
        .iter()
        .map(|(key, record)| serde_json::to_string(record).map(|json| (key.as_str(), json)))
        .collect::<Result<Vec<_>, _>>()?;

    let write_txn = db.begin_write()?;
    write_txn.delete_table(table)?;
    {
        let mut table = write_txn.open_table(table)?;
        for (key, json) in &encoded {
            table.insert(*key, json.as_str())?;
        }
    }
    write_txn.commit()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::NamedTempFile;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Item {
        name: String,
    }

    fn item(name: &str) -> Item {
        Item {
            name: name.to_string(),
        }
    }

    fn temp_db() -> (Database, NamedTempFile) {
        let file = NamedTempFile::new().unwrap();
        let db = init_db(file.path().to_str().unwrap()).unwrap();
        (db, file)
    }

    #[test]
    fn insert_new_refuses_taken_key() {
        let (db, _file) = temp_db();

        assert!(insert_new(&db, TABLE_USERS, "a@b.cd", &item("first")).unwrap());
        assert!(!insert_new(&db, TABLE_USERS, "a@b.cd", &item("second")).unwrap());

        let stored: Option<Item> = get(&db, TABLE_USERS, "a@b.cd").unwrap();
        assert_eq!(stored, Some(item("first")));
    }

    #[test]
    fn update_and_remove_report_missing_keys() {
        let (db, _file) = temp_db();

        assert!(!update(&db, TABLE_ROUTES, "missing", &item("x")).unwrap());
        assert!(!remove(&db, TABLE_ROUTES, "missing").unwrap());

        put(&db, TABLE_ROUTES, "r1", &item("x")).unwrap();
        assert!(update(&db, TABLE_ROUTES, "r1", &item("y")).unwrap());
        assert_eq!(get::<Item>(&db, TABLE_ROUTES, "r1").unwrap(), Some(item("y")));
        assert!(remove(&db, TABLE_ROUTES, "r1").unwrap());
        assert_eq!(count(&db, TABLE_ROUTES).unwrap(), 0);
    }

    #[test]
    fn replace_all_drops_previous_records_and_keeps_key_order() {
        let (db, _file) = temp_db();
        put(&db, TABLE_PORTS, "zzz", &item("stale")).unwrap();

        let records = vec![
            ("0001".to_string(), item("second")),
            ("0000".to_string(), item("first")),
        ];
        replace_all(&db, TABLE_PORTS, &records).unwrap();

        let listed: Vec<Item> = list(&db, TABLE_PORTS).unwrap();
        assert_eq!(listed, vec![item("first"), item("second")]);
    }
}
