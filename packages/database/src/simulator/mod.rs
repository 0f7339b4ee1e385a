use async_trait::async_trait;

use crate::{Database, DatabaseError, DatabaseValue, Row, rusqlite::RusqliteDatabase};

/// In-memory record store for tests, backed by a shared-cache `SQLite`
/// memory database so every pooled connection sees the same data.
#[derive(Debug)]
pub struct SimulationDatabase {
    inner: RusqliteDatabase,
}

impl SimulationDatabase {
    /// # Errors
    ///
    /// * If the database connection fails to open in memory
    ///
    /// # Panics
    ///
    /// * If time goes backwards
    pub fn new() -> Result<Self, DatabaseError> {
        use std::sync::atomic::AtomicU64;

        static ID: AtomicU64 = AtomicU64::new(0);

        let id = ID.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let db_url = format!("file:rosterbox_memdb_{id}_{timestamp}:?mode=memory&cache=shared&uri=true");

        let mut connections = Vec::new();
        for _ in 0..5 {
            let conn = ::rusqlite::Connection::open(&db_url)
                .map_err(|e| DatabaseError::Rusqlite(e.into()))?;
            conn.busy_timeout(std::time::Duration::from_millis(10))
                .map_err(|e| DatabaseError::Rusqlite(e.into()))?;
            connections.push(std::sync::Arc::new(tokio::sync::Mutex::new(conn)));
        }

        Ok(Self {
            inner: RusqliteDatabase::new(connections),
        })
    }
}

#[async_trait]
impl Database for SimulationDatabase {
    async fn insert(
        &self,
        collection: &str,
        values: &[(&str, DatabaseValue)],
    ) -> Result<Row, DatabaseError> {
        self.inner.insert(collection, values).await
    }

    async fn find_all(&self, collection: &str) -> Result<Vec<Row>, DatabaseError> {
        self.inner.find_all(collection).await
    }

    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Row>, DatabaseError> {
        self.inner.find_by_id(collection, id).await
    }

    async fn replace_by_id(
        &self,
        collection: &str,
        id: &str,
        values: &[(&str, DatabaseValue)],
    ) -> Result<Option<Row>, DatabaseError> {
        self.inner.replace_by_id(collection, id, values).await
    }

    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<Option<Row>, DatabaseError> {
        self.inner.delete_by_id(collection, id).await
    }

    async fn exec_raw(&self, statement: &str) -> Result<(), DatabaseError> {
        self.inner.exec_raw(statement).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ToValue;

    async fn new_store() -> SimulationDatabase {
        let db = SimulationDatabase::new().unwrap();

        db.exec_raw("CREATE TABLE test_docs (id TEXT PRIMARY KEY, name TEXT NOT NULL)")
            .await
            .unwrap();

        db
    }

    #[test_log::test(tokio::test)]
    async fn insert_assigns_unique_ids_and_returns_stored_row() {
        let db = new_store().await;

        let first = db
            .insert("test_docs", &[("name", "Ana".into())])
            .await
            .unwrap();
        let second = db
            .insert("test_docs", &[("name", "Ben".into())])
            .await
            .unwrap();

        assert_eq!(first.to_value::<String>("name").unwrap(), "Ana");
        assert_ne!(first.id().unwrap(), second.id().unwrap());
    }

    #[test_log::test(tokio::test)]
    async fn non_string_columns_round_trip_through_database_values() {
        let db = SimulationDatabase::new().unwrap();

        db.exec_raw(
            "CREATE TABLE test_enrollments (id TEXT PRIMARY KEY, name TEXT NOT NULL, \
             credits INTEGER NOT NULL, gpa REAL NOT NULL, active INTEGER NOT NULL, note TEXT)",
        )
        .await
        .unwrap();

        let row = db
            .insert(
                "test_enrollments",
                &[
                    ("name", "Ana".into()),
                    ("credits", 12_i64.into()),
                    ("gpa", 3.5_f64.into()),
                    ("active", true.into()),
                    ("note", Option::<String>::None.into()),
                ],
            )
            .await
            .unwrap();

        assert_eq!(row.to_value::<i64>("credits").unwrap(), 12);
        assert!(row.to_value::<bool>("active").unwrap());
        assert_eq!(row.get("gpa"), Some(&DatabaseValue::Real(3.5)));
        assert_eq!(row.get("note"), Some(&DatabaseValue::Null));
    }

    #[test_log::test(tokio::test)]
    async fn find_all_returns_documents_in_storage_order() {
        let db = new_store().await;

        for name in ["one", "two", "three"] {
            db.insert("test_docs", &[("name", name.into())])
                .await
                .unwrap();
        }

        let rows = db.find_all("test_docs").await.unwrap();
        let names = rows
            .iter()
            .map(|row| row.to_value::<String>("name").unwrap())
            .collect::<Vec<_>>();

        assert_eq!(names, vec!["one", "two", "three"]);
    }

    #[test_log::test(tokio::test)]
    async fn replace_by_id_overwrites_whole_document() {
        let db = new_store().await;

        let row = db
            .insert("test_docs", &[("name", "before".into())])
            .await
            .unwrap();
        let id = row.id().unwrap().to_string();

        let replaced = db
            .replace_by_id("test_docs", &id, &[("name", "after".into())])
            .await
            .unwrap()
            .unwrap();

        assert_eq!(replaced.id().unwrap(), id);
        assert_eq!(replaced.to_value::<String>("name").unwrap(), "after");
    }

    #[test_log::test(tokio::test)]
    async fn replace_by_id_missing_id_writes_nothing() {
        let db = new_store().await;

        let replaced = db
            .replace_by_id("test_docs", "nope", &[("name", "after".into())])
            .await
            .unwrap();

        assert_eq!(replaced, None);
        assert_eq!(db.find_all("test_docs").await.unwrap().len(), 0);
    }

    #[test_log::test(tokio::test)]
    async fn delete_by_id_removes_and_reports_absence() {
        let db = new_store().await;

        let row = db
            .insert("test_docs", &[("name", "Ana".into())])
            .await
            .unwrap();
        let id = row.id().unwrap().to_string();

        let deleted = db.delete_by_id("test_docs", &id).await.unwrap();
        assert!(deleted.is_some());

        let deleted_again = db.delete_by_id("test_docs", &id).await.unwrap();
        assert_eq!(deleted_again, None);

        assert_eq!(db.find_by_id("test_docs", &id).await.unwrap(), None);
    }
}
