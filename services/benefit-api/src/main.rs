use actix_web::{App, HttpServer};
use benefit_api::{configure, cors};
use shared::config::Settings;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let subscriber = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env());
    if std::env::var("LOG_FORMAT").is_ok_and(|f| f == "json") {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let settings = Settings::new().map_err(|e| {
        error!(%e, "configuration error");
        std::io::Error::new(std::io::ErrorKind::Other, "config")
    })?;

    info!(bind = %settings.http_bind, port = settings.benefit_api_port, "starting benefit-api");
    HttpServer::new(|| App::new().wrap(cors()).configure(configure))
        .bind((settings.http_bind.as_str(), settings.benefit_api_port))?
        .run()
        .await
}
