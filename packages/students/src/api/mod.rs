//! HTTP API endpoints for the students resource.
//!
//! # Endpoints
//!
//! * `GET    /students`      - List every student record
//! * `GET    /students/{id}` - Get a single student record
//! * `POST   /students`      - Create a student record
//! * `PUT    /students/{id}` - Replace a student record
//! * `DELETE /students/{id}` - Delete a student record
//!
//! Every failure body is JSON shaped `{"message": "..."}`. Storage faults are
//! logged server-side and surface as a generic 500.
//!
//! # Example
//!
//! ```rust,no_run
//! use actix_web::App;
//! use rosterbox_students::api::bind_services;
//!
//! let app = App::new().service(bind_services(actix_web::web::scope("/api")));
//! ```

use actix_web::{
    HttpResponse, Scope,
    dev::{ServiceFactory, ServiceRequest},
    http::StatusCode,
    route,
    web::{self, Json},
};
use serde::Serialize;
use thiserror::Error;

use rosterbox_core::app::AppState;

use crate::{StudentsError, models::{CreateStudent, UpdateStudent}};

use self::models::ApiStudent;

pub mod models;

/// Binds the students API endpoints to an Actix-Web scope.
#[must_use]
pub fn bind_services<
    T: ServiceFactory<ServiceRequest, Config = (), Error = actix_web::Error, InitError = ()>,
>(
    scope: Scope<T>,
) -> Scope<T> {
    scope
        .service(get_students_endpoint)
        .service(get_student_endpoint)
        .service(create_student_endpoint)
        .service(update_student_endpoint)
        .service(delete_student_endpoint)
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Internal server error")]
    InternalServerError,
}

impl From<StudentsError> for ApiError {
    fn from(value: StudentsError) -> Self {
        match value {
            StudentsError::Validation(e) => Self::BadRequest(e.to_string()),
            StudentsError::NotFound(_) => Self::NotFound(value.to_string()),
            StudentsError::Db(e) => {
                log::error!("Record store error: {e:?}");
                Self::InternalServerError
            }
        }
    }
}

#[derive(Serialize)]
struct ApiErrorBody {
    message: String,
}

impl actix_web::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ApiErrorBody {
            message: self.to_string(),
        })
    }
}

/// API endpoint to list every student record, in storage order.
///
/// # Errors
///
/// * If a database error occurs while listing students
#[route("/students", method = "GET")]
pub async fn get_students_endpoint(
    data: web::Data<AppState>,
) -> Result<Json<Vec<ApiStudent>>, ApiError> {
    Ok(Json(
        crate::students(&**data.database)
            .await?
            .into_iter()
            .map(Into::into)
            .collect::<Vec<ApiStudent>>(),
    ))
}

/// API endpoint to get a single student record by its identifier.
///
/// # Errors
///
/// * If no record has the given identifier
/// * If a database error occurs
#[route("/students/{id}", method = "GET")]
pub async fn get_student_endpoint(
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<Json<ApiStudent>, ApiError> {
    let id = path.into_inner();

    crate::student(&**data.database, &id)
        .await?
        .map(|student| Json(student.into()))
        .ok_or_else(|| ApiError::NotFound(format!("Student not found with ID {id}")))
}

/// API endpoint to create a student record. Returns 201 with the stored
/// record, including its store-assigned identifier.
///
/// # Errors
///
/// * If the fields fail validation
/// * If a database error occurs
#[route("/students", method = "POST")]
pub async fn create_student_endpoint(
    body: Json<CreateStudent>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let created = crate::create_student(&**data.database, &body).await?;

    Ok(HttpResponse::Created().json(ApiStudent::from(created)))
}

/// API endpoint to replace the full record body for the given identifier.
///
/// # Errors
///
/// * If the fields fail validation
/// * If no record has the given identifier
/// * If a database error occurs
#[route("/students/{id}", method = "PUT")]
pub async fn update_student_endpoint(
    path: web::Path<String>,
    body: Json<UpdateStudent>,
    data: web::Data<AppState>,
) -> Result<Json<ApiStudent>, ApiError> {
    let id = path.into_inner();

    Ok(Json(
        crate::update_student(&**data.database, &id, &body)
            .await?
            .into(),
    ))
}

/// API endpoint to delete a student record. Returns 204 whether or not the
/// identifier was present.
///
/// # Errors
///
/// * If a database error occurs
#[route("/students/{id}", method = "DELETE")]
pub async fn delete_student_endpoint(
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    crate::delete_student(&**data.database, &path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}
