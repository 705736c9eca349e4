use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, App, HttpServer};
use taskgate::{auth::TokenService, store::PgTaskStore, ApiContext, Config};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| {
        log::error!("invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    let store = PgTaskStore::connect(&config.database_url)
        .await
        .map_err(|e| {
            log::error!("could not open the task store: {}", e);
            io::Error::new(io::ErrorKind::Other, e)
        })?;

    let context = ApiContext::new(
        Arc::new(store),
        config.credentials.clone(),
        TokenService::new(&config.jwt_secret),
    );

    log::info!("Starting taskgate server at {}", config.server_url());
    HttpServer::new(move || {
        let context = context.clone();
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(move |cfg| context.configure(cfg))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
