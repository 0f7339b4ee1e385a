use std::sync::Arc;

use actix_web::{App, test, web};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use rosterbox_core::app::AppState;
use rosterbox_database::{Database, simulator::SimulationDatabase};
use rosterbox_students::{api::bind_services, api::models::ApiStudent, db};

async fn new_state() -> AppState {
    let database: Arc<Box<dyn Database>> = Arc::new(Box::new(SimulationDatabase::new().unwrap()));
    db::init(&**database).await.unwrap();
    AppState { database }
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .service(bind_services(web::scope("/api"))),
        )
        .await
    };
}

#[test_log::test(actix_web::test)]
async fn list_starts_empty() {
    let app = test_app!(new_state().await);

    let req = test::TestRequest::get().uri("/api/students").to_request();
    let students: Vec<ApiStudent> = test::call_and_read_body_json(&app, req).await;

    assert_eq!(students, vec![]);
}

#[test_log::test(actix_web::test)]
async fn create_update_delete_lifecycle() {
    let app = test_app!(new_state().await);

    // Create
    let req = test::TestRequest::post()
        .uri("/api/students")
        .set_json(json!({"name": "Ana", "email": "ana@x.com", "course": "CS101"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status().as_u16(), 201);
    let created: ApiStudent = test::read_body_json(res).await;
    assert!(!created.id.is_empty());
    assert_eq!(created.name, "Ana");

    // Get by the returned identifier
    let req = test::TestRequest::get()
        .uri(&format!("/api/students/{}", created.id))
        .to_request();
    let fetched: ApiStudent = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched, created);

    // Update (full replace, identifier unchanged)
    let req = test::TestRequest::put()
        .uri(&format!("/api/students/{}", created.id))
        .set_json(json!({"name": "Ana B.", "email": "ana@x.com", "course": "CS102"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status().as_u16(), 200);
    let updated: ApiStudent = test::read_body_json(res).await;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Ana B.");
    assert_eq!(updated.course, "CS102");

    let req = test::TestRequest::get()
        .uri(&format!("/api/students/{}", created.id))
        .to_request();
    let fetched: ApiStudent = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched, updated);

    // Delete
    let req = test::TestRequest::delete()
        .uri(&format!("/api/students/{}", created.id))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status().as_u16(), 204);

    // Gone
    let req = test::TestRequest::get()
        .uri(&format!("/api/students/{}", created.id))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status().as_u16(), 404);
}

#[test_log::test(actix_web::test)]
async fn storage_fault_surfaces_as_generic_500() {
    // no schema init, so the students table is missing
    let database: Arc<Box<dyn Database>> = Arc::new(Box::new(SimulationDatabase::new().unwrap()));
    let app = test_app!(AppState { database });

    let req = test::TestRequest::get().uri("/api/students").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status().as_u16(), 500);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "Internal server error");
}

#[test_log::test(actix_web::test)]
async fn create_rejects_malformed_email_with_message_body() {
    let app = test_app!(new_state().await);

    let req = test::TestRequest::post()
        .uri("/api/students")
        .set_json(json!({"name": "Ana", "email": "not-an-email", "course": "CS101"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status().as_u16(), 400);
    let body: Value = test::read_body_json(res).await;
    assert!(body["message"].as_str().unwrap().contains("local@domain.tld"));

    // no partial write
    let req = test::TestRequest::get().uri("/api/students").to_request();
    let students: Vec<ApiStudent> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(students, vec![]);
}

#[test_log::test(actix_web::test)]
async fn create_rejects_empty_fields() {
    let app = test_app!(new_state().await);

    for body in [
        json!({"name": "", "email": "ana@x.com", "course": "CS101"}),
        json!({"name": "Ana", "email": "ana@x.com", "course": ""}),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/students")
            .set_json(body)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status().as_u16(), 400);
        let body: Value = test::read_body_json(res).await;
        assert!(body["message"].is_string());
    }
}

#[test_log::test(actix_web::test)]
async fn get_and_update_missing_id_report_not_found() {
    let app = test_app!(new_state().await);

    let req = test::TestRequest::get()
        .uri("/api/students/missing")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status().as_u16(), 404);
    let body: Value = test::read_body_json(res).await;
    assert!(body["message"].is_string());

    let req = test::TestRequest::put()
        .uri("/api/students/missing")
        .set_json(json!({"name": "Ana", "email": "ana@x.com", "course": "CS101"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status().as_u16(), 404);
}

#[test_log::test(actix_web::test)]
async fn update_with_invalid_body_is_400_before_404() {
    let app = test_app!(new_state().await);

    let req = test::TestRequest::put()
        .uri("/api/students/missing")
        .set_json(json!({"name": "Ana", "email": "broken", "course": "CS101"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status().as_u16(), 400);
}

#[test_log::test(actix_web::test)]
async fn delete_missing_id_is_idempotent_success() {
    let app = test_app!(new_state().await);

    let req = test::TestRequest::delete()
        .uri("/api/students/missing")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status().as_u16(), 204);
}

#[test_log::test(actix_web::test)]
async fn list_preserves_creation_order() {
    let app = test_app!(new_state().await);

    for i in 0..3 {
        let req = test::TestRequest::post()
            .uri("/api/students")
            .set_json(json!({
                "name": format!("Student {i}"),
                "email": format!("student{i}@x.com"),
                "course": "CS101",
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status().as_u16(), 201);
    }

    let req = test::TestRequest::get().uri("/api/students").to_request();
    let students: Vec<ApiStudent> = test::call_and_read_body_json(&app, req).await;

    assert_eq!(
        students.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
        vec!["Student 0", "Student 1", "Student 2"]
    );
}
