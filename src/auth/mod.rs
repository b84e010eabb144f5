pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::PasswordHasher;
pub use token::{Claims, TokenError, TokenPurpose, TokenService};

lazy_static! {
    // Regex for name validation: letters (including accented) and spaces
    static ref NAME_REGEX: regex::Regex = regex::Regex::new(r"^[a-zA-ZÀ-ÿ\s]+$").unwrap();
}

/// Password strength rule: at least one uppercase letter, one lowercase
/// letter, one digit, and one special character.
fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| "!@#$%^&*(),.?\":{}|<>".contains(c));

    if has_upper && has_lower && has_digit && has_special {
        Ok(())
    } else {
        Err(ValidationError::new(
            "Password must contain uppercase, lowercase, a digit, and a special character",
        ))
    }
}

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// User's email address.
    #[validate(email)]
    pub email: String,
    /// User's password. Must be between 8 and 16 characters.
    #[validate(length(min = 8, max = 16))]
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// The user's full name: 2 to 50 characters, letters and spaces only.
    #[validate(
        length(min = 2, max = 50),
        regex(path = "NAME_REGEX", message = "Name can only contain letters")
    )]
    pub name: String,
    /// Email address for the new account.
    #[validate(email)]
    pub email: String,
    /// Password for the new account: 8 to 16 characters with mixed case, a
    /// digit, and a special character.
    #[validate(
        length(min = 8, max = 16),
        custom = "validate_password_strength"
    )]
    pub password: String,
}

/// Response structure after a successful login.
/// Contains the session token and the ID of the authenticated user.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The JWT session token for subsequent authenticated requests.
    pub token: String,
    /// The unique identifier of the authenticated user.
    pub user_id: i32,
}

/// Response structure after a successful registration.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: i32,
}
