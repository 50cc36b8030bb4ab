//! # Calico Backend
//!
//! Record-keeping backend for pet vaccination certificates: lists pets,
//! lists and records vaccine entries per pet, and extracts certificate
//! fields from uploaded images through the Gemini API.

#![recursion_limit = "256"]

pub mod api;
pub mod config;
pub mod consts;
pub mod front;
pub mod logger;
pub mod models;
pub mod repo;
pub mod services;
pub mod utils;

use anyhow::Context;
use envconfig::Envconfig;
use ntex::web;
use ntex_cors::Cors;

#[ntex::main]
async fn main() -> anyhow::Result<()> {
    let app_config =
        config::AppConfig::init_from_env().context("failed to load app config")?;

    logger::setup_simple_logger()?;

    // Database provisioning failures are unrecoverable at this point
    let sqlite_repo = repo::sqlite::SqlxSqliteRepo {
        db_pool: utils::setup_sqlite_db_pool(&app_config.db_host).await?,
    };
    utils::provision_database(&sqlite_repo.db_pool)
        .await
        .context("database provisioning failed")?;

    tokio::fs::create_dir_all(&app_config.uploads_dir)
        .await
        .context("uploads directory couldnt be created")?;

    let storage_service = services::storage::LocalStorageHandler {
        uploads_dir: app_config.uploads_dir.clone().into(),
    };
    let extraction_service = services::extraction::GeminiClient::new(&app_config)?;

    configure_and_run_server(app_config, sqlite_repo, storage_service, extraction_service).await
}

/// Creates application state from the provided services
fn create_app_state(
    sqlite_repo: repo::sqlite::SqlxSqliteRepo,
    storage_service: services::storage::LocalStorageHandler,
    extraction_service: services::extraction::GeminiClient,
) -> front::AppState {
    front::AppState {
        repo: Box::new(sqlite_repo),
        storage_service: Box::new(storage_service),
        extraction_service: Box::new(extraction_service),
    }
}

/// Configures and starts the web server
async fn configure_and_run_server(
    app_config: config::AppConfig,
    sqlite_repo: repo::sqlite::SqlxSqliteRepo,
    storage_service: services::storage::LocalStorageHandler,
    extraction_service: services::extraction::GeminiClient,
) -> anyhow::Result<()> {
    let server_addr = (
        app_config.wep_server_host.clone(),
        u16::try_from(app_config.wep_server_port).unwrap_or(3000),
    );
    let uploads_dir = app_config.uploads_dir.clone();

    log::info!(
        "server listening on {host}:{port}",
        host = server_addr.0,
        port = server_addr.1
    );

    let server = web::server(move || {
        web::App::new()
            .wrap(
                Cors::new()
                    .allowed_methods(vec!["GET", "HEAD", "POST", "OPTIONS"])
                    .finish(),
            )
            .wrap(web::middleware::Logger::default())
            .wrap(web::middleware::Compress::default())
            .state(create_app_state(
                sqlite_repo.clone(),
                storage_service.clone(),
                extraction_service.clone(),
            ))
            .configure(front::routes::api)
            .service((
                ntex_files::Files::new(consts::UPLOADS_URL_PREFIX, uploads_dir.clone()),
                front::server::index,
            ))
            .default_service(web::route().to(front::server::serve_not_found))
    });

    server
        .bind(server_addr)?
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
