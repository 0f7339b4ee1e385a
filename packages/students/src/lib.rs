//! Student record management for `RosterBox`.
//!
//! The five operations of the students resource: list, get, create, update,
//! delete. Create and update re-validate server-side before any write reaches
//! the record store, regardless of what the client already checked.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

use rosterbox_database::{Database, DatabaseFetchError};
use thiserror::Error;

use models::{CreateStudent, Student, UpdateStudent};
use validate::{ValidationError, validate_student};

#[cfg(feature = "api")]
pub mod api;

pub mod db;
pub mod models;
pub mod validate;

#[derive(Debug, Error)]
pub enum StudentsError {
    #[error(transparent)]
    Db(#[from] DatabaseFetchError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Student not found with ID {0}")]
    NotFound(String),
}

/// Returns every student record, in storage order.
///
/// # Errors
///
/// * If there is a database error
pub async fn students(db: &dyn Database) -> Result<Vec<Student>, StudentsError> {
    Ok(db::get_students(db).await?)
}

/// Returns the student with the given identifier, or `None` if absent.
///
/// # Errors
///
/// * If there is a database error
pub async fn student(db: &dyn Database, id: &str) -> Result<Option<Student>, StudentsError> {
    Ok(db::get_student(db, id).await?)
}

/// Validates and persists a new student record.
///
/// # Errors
///
/// * If the fields fail validation (nothing is written)
/// * If there is a database error
pub async fn create_student(
    db: &dyn Database,
    student: &CreateStudent,
) -> Result<Student, StudentsError> {
    validate_student(&student.name, &student.email, &student.course)?;

    Ok(db::create_student(db, student).await?)
}

/// Validates and replaces the full record body for the given identifier.
///
/// # Errors
///
/// * If the fields fail validation (nothing is written)
/// * If no record has the given identifier
/// * If there is a database error
pub async fn update_student(
    db: &dyn Database,
    id: &str,
    student: &UpdateStudent,
) -> Result<Student, StudentsError> {
    validate_student(&student.name, &student.email, &student.course)?;

    db::update_student(db, id, student)
        .await?
        .ok_or_else(|| StudentsError::NotFound(id.to_string()))
}

/// Removes the student with the given identifier. Deleting an identifier that
/// is already absent is still a success.
///
/// # Errors
///
/// * If there is a database error
pub async fn delete_student(db: &dyn Database, id: &str) -> Result<(), StudentsError> {
    let deleted = db::delete_student(db, id).await?;

    if deleted.is_none() {
        log::debug!("delete_student: no record with ID {id}");
    }

    Ok(())
}
