pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::web;

use crate::auth::{AuthMiddleware, TokenService};

/// Builds the `/api` route tree.
///
/// The account lifecycle endpoints stay outside the authentication gate (they
/// are how a client obtains a token); only the task scope is wrapped with
/// `AuthMiddleware`.
pub fn config(tokens: TokenService) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.service(
            web::scope("/auth")
                .service(auth::register)
                .service(auth::verify)
                .service(auth::login),
        )
        .service(
            web::scope("/tasks")
                .wrap(AuthMiddleware::new(tokens))
                .service(tasks::get_tasks)
                .service(tasks::create_task)
                .service(tasks::get_task)
                .service(tasks::update_task)
                .service(tasks::delete_task),
        );
    }
}
