//! Record store operations for student records.

use rosterbox_database::{Database, DatabaseError, DatabaseFetchError, ToValueType as _};

use crate::models::{CreateStudent, Student, UpdateStudent};

pub(crate) const COLLECTION: &str = "students";

/// Initializes the schema backing the students collection.
///
/// # Errors
///
/// * If there is a database error
pub async fn init(db: &dyn Database) -> Result<(), DatabaseError> {
    db.exec_raw(
        "CREATE TABLE IF NOT EXISTS students (
            id TEXT NOT NULL PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            course TEXT NOT NULL
        )",
    )
    .await
}

/// Retrieves every student record, in storage order.
///
/// # Errors
///
/// * If there is a database error
pub async fn get_students(db: &dyn Database) -> Result<Vec<Student>, DatabaseFetchError> {
    Ok(db.find_all(COLLECTION).await?.to_value_type()?)
}

/// Retrieves a single student record by its identifier.
///
/// Returns `None` if no record has the given identifier.
///
/// # Errors
///
/// * If there is a database error
pub async fn get_student(db: &dyn Database, id: &str) -> Result<Option<Student>, DatabaseFetchError> {
    Ok(db
        .find_by_id(COLLECTION, id)
        .await?
        .as_ref()
        .map(|x| x.to_value_type())
        .transpose()?)
}

/// Persists a new student record, returning the stored record including the
/// store-assigned identifier.
///
/// # Errors
///
/// * If there is a database error
pub async fn create_student(
    db: &dyn Database,
    student: &CreateStudent,
) -> Result<Student, DatabaseFetchError> {
    let row = db
        .insert(
            COLLECTION,
            &[
                ("name", student.name.as_str().into()),
                ("email", student.email.as_str().into()),
                ("course", student.course.as_str().into()),
            ],
        )
        .await?;

    Ok((&row).to_value_type()?)
}

/// Replaces the full record body for the given identifier, leaving the
/// identifier unchanged. Returns `None`, with no write performed, if no record
/// has that identifier.
///
/// # Errors
///
/// * If there is a database error
pub async fn update_student(
    db: &dyn Database,
    id: &str,
    student: &UpdateStudent,
) -> Result<Option<Student>, DatabaseFetchError> {
    Ok(db
        .replace_by_id(
            COLLECTION,
            id,
            &[
                ("name", student.name.as_str().into()),
                ("email", student.email.as_str().into()),
                ("course", student.course.as_str().into()),
            ],
        )
        .await?
        .as_ref()
        .map(|x| x.to_value_type())
        .transpose()?)
}

/// Removes the record with the given identifier, returning it, or `None` if it
/// was already absent.
///
/// # Errors
///
/// * If there is a database error
pub async fn delete_student(
    db: &dyn Database,
    id: &str,
) -> Result<Option<Student>, DatabaseFetchError> {
    Ok(db
        .delete_by_id(COLLECTION, id)
        .await?
        .as_ref()
        .map(|x| x.to_value_type())
        .transpose()?)
}
