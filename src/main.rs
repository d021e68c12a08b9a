use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;

use pushkind_catalog::bootstrap::setup_database;
use pushkind_catalog::config::ServerConfig;
use pushkind_catalog::repository::DieselRepository;
use pushkind_catalog::routes::configure;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let config = ServerConfig::from_env();

    let pool = match setup_database(&config) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to prepare database: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    log::info!("Listening on {}:{}", config.address, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(repo.clone()))
            .configure(configure)
    })
    .bind((config.address.clone(), config.port))?
    .run()
    .await
}
