mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::database::{DocumentStore, MongoDB};
use crate::services::auth_service::TokenSigner;

/// Browser access policy: listed origins only, JSON bodies and bearer tokens.
fn cors(origins: &[String]) -> Cors {
    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("❌ Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    log::info!("🚀 Starting Bistro Service...");
    log::info!("📊 Database: {}", config.database_name);

    // One store handle for the whole process, shared by every worker
    let db = match MongoDB::new(&config.database_url, &config.database_name).await {
        Ok(db) => db,
        Err(e) => {
            log::error!("❌ Failed to connect to MongoDB: {}", e);
            std::process::exit(1);
        }
    };
    log::info!("✅ MongoDB connected successfully");

    let store: web::Data<dyn DocumentStore> = web::Data::from(Arc::new(db) as Arc<dyn DocumentStore>);
    let signer = web::Data::new(TokenSigner::new(&config.token_secret, chrono::Duration::hours(1)));

    let allowed_origins = config.allowed_origins.clone();
    let bind_address = (config.host.clone(), config.port);

    log::info!("🌐 Server starting on {}:{}", config.host, config.port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", config.host, config.port);

    let server = HttpServer::new(move || {
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(store.clone())
            .app_data(signer.clone())
            .wrap(cors(&allowed_origins))
            .wrap(Logger::default())
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi))
            .configure(api::configure)
    })
    .bind(bind_address)?
    .run();

    log::info!("🍽️  Bistro boss is sitting on port {}", config.port);
    server.await
}
