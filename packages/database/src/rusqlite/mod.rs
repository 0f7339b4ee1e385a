//! `SQLite` record store backend using rusqlite.
//!
//! Synchronous `rusqlite` access wrapped in the async `Database` interface. A small
//! pool of connections is used in round-robin fashion, each protected by a mutex.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use rusqlite::{Connection, types::Value};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::{Database, DatabaseError, DatabaseValue, Row};

#[derive(Debug, Error)]
pub enum RusqliteDatabaseError {
    #[error(transparent)]
    Rusqlite(#[from] ::rusqlite::Error),
    #[error("No row returned")]
    NoRow,
}

impl From<::rusqlite::Error> for DatabaseError {
    fn from(value: ::rusqlite::Error) -> Self {
        Self::Rusqlite(value.into())
    }
}

#[derive(Debug)]
pub struct RusqliteDatabase {
    connections: Vec<Arc<Mutex<Connection>>>,
    next_connection: AtomicUsize,
}

impl RusqliteDatabase {
    /// Creates a new `SQLite` store from a vector of connections.
    ///
    /// The connections are used in round-robin fashion to distribute load.
    #[must_use]
    pub const fn new(connections: Vec<Arc<Mutex<Connection>>>) -> Self {
        Self {
            connections,
            next_connection: AtomicUsize::new(0),
        }
    }

    /// Opens a single-connection store backed by the `SQLite` file at `path`.
    ///
    /// # Errors
    ///
    /// * If the database file fails to open
    pub fn open(path: &str) -> Result<Self, DatabaseError> {
        let connection = Connection::open(path)?;
        Ok(Self::new(vec![Arc::new(Mutex::new(connection))]))
    }

    fn get_connection(&self) -> Arc<Mutex<Connection>> {
        let index = self.next_connection.fetch_add(1, Ordering::Relaxed) % self.connections.len();
        self.connections[index].clone()
    }
}

fn to_sql_value(value: &DatabaseValue) -> Value {
    match value {
        DatabaseValue::Null => Value::Null,
        DatabaseValue::String(value) => Value::Text(value.clone()),
        DatabaseValue::Bool(value) => Value::Integer(i64::from(*value)),
        DatabaseValue::Number(value) => Value::Integer(*value),
        DatabaseValue::Real(value) => Value::Real(*value),
    }
}

impl From<Value> for DatabaseValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Integer(value) => Self::Number(value),
            Value::Real(value) => Self::Real(value),
            Value::Text(value) => Self::String(value),
            Value::Blob(_) => Self::Null,
        }
    }
}

fn from_row(column_names: &[String], row: &rusqlite::Row<'_>) -> Result<Row, RusqliteDatabaseError> {
    let mut columns = vec![];

    for column in column_names {
        columns.push((column.clone(), row.get::<_, Value>(column.as_str())?.into()));
    }

    Ok(Row { columns })
}

fn select_all(
    connection: &Connection,
    collection: &str,
) -> Result<Vec<Row>, RusqliteDatabaseError> {
    let query = format!("SELECT * FROM {collection} ORDER BY rowid");
    let mut statement = connection.prepare_cached(&query)?;
    let column_names: Vec<String> = statement
        .column_names()
        .iter()
        .map(|&s| s.to_string())
        .collect();

    let mut rows = statement.query([])?;
    let mut results = vec![];

    while let Some(row) = rows.next()? {
        results.push(from_row(&column_names, row)?);
    }

    Ok(results)
}

fn select_by_id(
    connection: &Connection,
    collection: &str,
    id: &str,
) -> Result<Option<Row>, RusqliteDatabaseError> {
    let query = format!("SELECT * FROM {collection} WHERE id = ?1");
    let mut statement = connection.prepare_cached(&query)?;
    let column_names: Vec<String> = statement
        .column_names()
        .iter()
        .map(|&s| s.to_string())
        .collect();

    let mut rows = statement.query([id])?;

    rows.next()?.map(|row| from_row(&column_names, row)).transpose()
}

fn insert_and_get_row(
    connection: &Connection,
    collection: &str,
    id: &str,
    values: &[(&str, DatabaseValue)],
) -> Result<Row, RusqliteDatabaseError> {
    let column_names = values
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = (0..=values.len())
        .map(|i| format!("?{}", i + 1))
        .collect::<Vec<_>>()
        .join(", ");

    let query = format!("INSERT INTO {collection} (id, {column_names}) VALUES ({placeholders})");

    let mut params: Vec<Value> = vec![Value::Text(id.to_string())];
    params.extend(values.iter().map(|(_, value)| to_sql_value(value)));

    connection
        .prepare_cached(&query)?
        .execute(rusqlite::params_from_iter(params))?;

    select_by_id(connection, collection, id)?.ok_or(RusqliteDatabaseError::NoRow)
}

fn update_and_get_row(
    connection: &Connection,
    collection: &str,
    id: &str,
    values: &[(&str, DatabaseValue)],
) -> Result<Option<Row>, RusqliteDatabaseError> {
    let assignments = values
        .iter()
        .enumerate()
        .map(|(i, (name, _))| format!("{name} = ?{}", i + 1))
        .collect::<Vec<_>>()
        .join(", ");

    let query = format!(
        "UPDATE {collection} SET {assignments} WHERE id = ?{}",
        values.len() + 1
    );

    let mut params: Vec<Value> = values.iter().map(|(_, value)| to_sql_value(value)).collect();
    params.push(Value::Text(id.to_string()));

    let updated = connection
        .prepare_cached(&query)?
        .execute(rusqlite::params_from_iter(params))?;

    if updated == 0 {
        return Ok(None);
    }

    select_by_id(connection, collection, id)
}

fn delete_and_get_row(
    connection: &Connection,
    collection: &str,
    id: &str,
) -> Result<Option<Row>, RusqliteDatabaseError> {
    let Some(row) = select_by_id(connection, collection, id)? else {
        return Ok(None);
    };

    let query = format!("DELETE FROM {collection} WHERE id = ?1");
    connection.prepare_cached(&query)?.execute([id])?;

    Ok(Some(row))
}

#[async_trait]
impl Database for RusqliteDatabase {
    async fn insert(
        &self,
        collection: &str,
        values: &[(&str, DatabaseValue)],
    ) -> Result<Row, DatabaseError> {
        let id = uuid::Uuid::new_v4().to_string();
        log::trace!("insert: collection={collection} id={id}");

        let connection = self.get_connection();
        let connection = connection.lock().await;

        Ok(insert_and_get_row(&connection, collection, &id, values)
            .map_err(DatabaseError::Rusqlite)?)
    }

    async fn find_all(&self, collection: &str) -> Result<Vec<Row>, DatabaseError> {
        log::trace!("find_all: collection={collection}");

        let connection = self.get_connection();
        let connection = connection.lock().await;

        Ok(select_all(&connection, collection).map_err(DatabaseError::Rusqlite)?)
    }

    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Row>, DatabaseError> {
        log::trace!("find_by_id: collection={collection} id={id}");

        let connection = self.get_connection();
        let connection = connection.lock().await;

        Ok(select_by_id(&connection, collection, id).map_err(DatabaseError::Rusqlite)?)
    }

    async fn replace_by_id(
        &self,
        collection: &str,
        id: &str,
        values: &[(&str, DatabaseValue)],
    ) -> Result<Option<Row>, DatabaseError> {
        log::trace!("replace_by_id: collection={collection} id={id}");

        let connection = self.get_connection();
        let connection = connection.lock().await;

        Ok(update_and_get_row(&connection, collection, id, values)
            .map_err(DatabaseError::Rusqlite)?)
    }

    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<Option<Row>, DatabaseError> {
        log::trace!("delete_by_id: collection={collection} id={id}");

        let connection = self.get_connection();
        let connection = connection.lock().await;

        Ok(delete_and_get_row(&connection, collection, id).map_err(DatabaseError::Rusqlite)?)
    }

    async fn exec_raw(&self, statement: &str) -> Result<(), DatabaseError> {
        log::trace!("exec_raw: {statement}");

        let connection = self.get_connection();
        let connection = connection.lock().await;

        connection
            .execute_batch(statement)
            .map_err(|e| DatabaseError::Rusqlite(e.into()))?;

        Ok(())
    }
}
