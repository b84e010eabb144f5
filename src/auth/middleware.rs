use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::extractors::AuthenticatedUser;
use crate::auth::token::{TokenPurpose, TokenService};
use crate::error::AppError;

/// Authentication gate for task routes.
///
/// Wrapped around the scopes that require a session credential; the account
/// lifecycle endpoints (register, login, verify) stay outside it because they
/// are the means of obtaining a token in the first place.
///
/// Extracts `Authorization: Bearer <token>`, verifies it against the session
/// purpose, and attaches [`AuthenticatedUser`] to the request extensions.
/// Anything else is rejected before the handler runs.
pub struct AuthMiddleware {
    tokens: TokenService,
}

impl AuthMiddleware {
    pub fn new(tokens: TokenService) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            tokens: self.tokens.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    tokens: TokenService,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let bearer = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty());

        let token = match bearer {
            Some(token) => token,
            None => {
                let app_err = AppError::TokenMissing;
                return Box::pin(async move { Err(app_err.into()) });
            }
        };

        match self.tokens.verify(token, TokenPurpose::Session) {
            Ok(user_id) => {
                req.extensions_mut().insert(AuthenticatedUser { id: user_id });
                let fut = self.service.call(req);
                Box::pin(fut)
            }
            Err(token_err) => {
                let app_err: AppError = token_err.into();
                Box::pin(async move { Err(app_err.into()) })
            }
        }
    }
}
