use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use employee_service::config::Config;
use employee_service::db::Store;
use employee_service::handlers;
use log::info;
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err.to_string()))?;

    // Built once and shared read-only by every worker.
    let store = web::Data::new(Store::connect(&config).await);

    info!("Starting server at {}", config.bind_address);

    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .configure(handlers::configure::<Store>)
    })
    .bind(&config.bind_address)?
    .run()
    .await
}
