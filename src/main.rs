use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use sqlx::PgPool;
use std::sync::Arc;

use tasknest::auth::{PasswordHasher, TokenService};
use tasknest::config::Config;
use tasknest::email::LogEmailSender;
use tasknest::routes;
use tasknest::state::AppState;
use tasknest::store::{PgTaskStore, PgUserStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let pool = PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    let tokens = TokenService::new(
        &config.jwt_secret,
        config.session_ttl_secs,
        config.verification_ttl_secs,
    );

    let state = web::Data::new(AppState {
        users: Arc::new(PgUserStore::new(pool.clone())),
        tasks: Arc::new(PgTaskStore::new(pool)),
        email: Arc::new(LogEmailSender::new(config.email_from_name.clone())),
        tokens: tokens.clone(),
        hasher: PasswordHasher::new(config.bcrypt_cost),
        public_base_url: config.public_base_url.clone(),
    });

    log::info!("Starting TaskNest server at {}", config.server_url());

    let bind_addr = (config.server_host.clone(), config.server_port);
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(routes::health::health)
            .service(web::scope("/api").configure(routes::config(tokens.clone())))
    })
    .bind(bind_addr)?
    .run()
    .await
}
