use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::error::AppError;

/// The authenticated identity attached to a request by `AuthMiddleware`.
///
/// This is a per-request derived fact, constructed once by the middleware
/// after token verification and read-only thereafter. Handlers receive it as
/// an extractor; if it is absent the middleware did not run (or did not pass),
/// and the request is rejected as unauthorized.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub id: i32,
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>().copied() {
            Some(user) => ready(Ok(user)),
            None => ready(Err(AppError::TokenMissing.into())),
        }
    }
}
