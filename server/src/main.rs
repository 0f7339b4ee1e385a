#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

mod api;

use std::{env, sync::Arc};

use actix_cors::Cors;
use actix_web::{App, HttpServer, http, middleware, web};
use rosterbox_core::app::AppState;
use rosterbox_database::{Database, rusqlite::RusqliteDatabase};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let service_port = env::var("ROSTERBOX_PORT")
        .ok()
        .and_then(|port| port.parse::<u16>().ok())
        .unwrap_or(8000);
    let db_path = env::var("ROSTERBOX_DB").unwrap_or_else(|_| String::from("rosterbox.db"));

    let database: Arc<Box<dyn Database>> = Arc::new(Box::new(
        RusqliteDatabase::open(&db_path).map_err(std::io::Error::other)?,
    ));

    rosterbox_students::db::init(&**database)
        .await
        .map_err(std::io::Error::other)?;

    let app = move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec![http::header::AUTHORIZATION, http::header::ACCEPT])
            .allowed_header(http::header::CONTENT_TYPE)
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(middleware::Compress::default())
            .app_data(web::Data::new(AppState {
                database: database.clone(),
            }))
            .service(api::health_endpoint)
            .service(rosterbox_students::api::bind_services(web::scope("/api")))
    };

    log::info!("Server running on port {service_port}");

    HttpServer::new(app).bind(("0.0.0.0", service_port))?.run().await
}
