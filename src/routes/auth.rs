use crate::{
    auth::{AuthResponse, LoginRequest, RegisterRequest, RegisterResponse, TokenPurpose},
    email::verification_email,
    error::AppError,
    state::AppState,
};
use actix_web::{get, post, web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

/// Register a new user
///
/// Creates an unverified account and emails a verification link. If the
/// email cannot be delivered the account is deleted again and registration
/// fails; a user record must never persist without a delivered verification
/// path.
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    let email = register_data.email.trim().to_lowercase();

    if state.users.find_by_email(&email).await?.is_some() {
        return Err(AppError::DuplicateEmail);
    }

    let password_hash = state.hasher.hash(&register_data.password)?;

    let user = state
        .users
        .create(crate::models::NewUser {
            name: register_data.name.trim().to_string(),
            email: email.clone(),
            password_hash,
        })
        .await?;

    let token = state.tokens.issue_verification(user.id)?;
    let link = format!(
        "{}/api/auth/verify?token={}",
        state.public_base_url.trim_end_matches('/'),
        token
    );

    let message = verification_email(&user.name, &user.email, &link);
    let delivered = match state.email.send(&message).await {
        Ok(delivered) => delivered,
        Err(e) => {
            log::error!("email sender fault during registration: {}", e);
            false
        }
    };
    if !delivered {
        // Compensating deletion: the record must not outlive a failed
        // verification path.
        state.users.delete_by_id(user.id).await?;
        return Err(AppError::EmailDeliveryFailed);
    }

    Ok(HttpResponse::Created().json(RegisterResponse {
        message: "User registered successfully. Please check your inbox to verify your account."
            .to_string(),
        user_id: user.id,
    }))
}

#[derive(Debug, Deserialize)]
pub struct VerifyQuery {
    token: String,
}

/// Verify a user's email address
///
/// Redeems the token from the emailed link and marks the account verified.
/// Redeeming an already-verified account's token simply re-asserts true.
#[get("/verify")]
pub async fn verify(
    state: web::Data<AppState>,
    query: web::Query<VerifyQuery>,
) -> Result<impl Responder, AppError> {
    let token = query.token.trim();
    if token.is_empty() {
        return Err(AppError::TokenMissing);
    }

    let user_id = state
        .tokens
        .verify(token, TokenPurpose::EmailVerification)?;

    match state.users.mark_verified(user_id).await? {
        Some(_) => Ok(HttpResponse::Ok().json(json!({
            "message": "Email verified successfully. Your account is now active."
        }))),
        None => Err(AppError::NotFound("User not found".into())),
    }
}

/// Login user
///
/// Authenticates a verified user and returns a session token. Unknown email
/// and wrong password produce the same error so the endpoint cannot be used
/// to enumerate registered addresses.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let email = login_data.email.trim().to_lowercase();
    let user = state.users.find_by_email(&email).await?;

    let user = match user {
        Some(user) if state.hasher.verify(&login_data.password, &user.password_hash) => user,
        _ => return Err(AppError::InvalidCredentials),
    };

    if !user.verified {
        return Err(AppError::AccountNotVerified);
    }

    let token = state.tokens.issue_session(user.id)?;
    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        user_id: user.id,
    }))
}
