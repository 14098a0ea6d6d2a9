use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use shared::config::Settings;
use shared::db::{InteractionLog, MemoryInteractionLog, PgInteractionLog};
use text_extraction::upload::{configure, UploadLimit};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let subscriber = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env());
    if std::env::var("LOG_FORMAT").is_ok_and(|f| f == "json") {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
    info!("starting text-extraction service");

    let settings = Settings::new().map_err(|e| {
        error!(%e, "configuration error");
        std::io::Error::new(std::io::ErrorKind::Other, "config")
    })?;

    let log: Arc<dyn InteractionLog> = if settings.persistence_enabled() {
        let store = PgInteractionLog::open(&settings.database_url).await.map_err(|e| {
            error!(%e, "db connect failed");
            std::io::Error::new(std::io::ErrorKind::Other, "db")
        })?;
        Arc::new(store)
    } else {
        warn!("DATABASE_URL not set, uploads are only kept in memory");
        Arc::new(MemoryInteractionLog::default())
    };
    let log = web::Data::from(log);
    let limit = web::Data::new(UploadLimit(settings.max_upload_bytes));

    info!(port = settings.extraction_port, "starting http server");
    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(log.clone())
            .app_data(limit.clone())
            .configure(configure)
    })
    .bind((settings.http_bind.as_str(), settings.extraction_port))?
    .run()
    .await
}
