use actix_web::web;
use std::sync::Arc;

use tasknest::auth::{PasswordHasher, TokenService};
use tasknest::email::MockEmailSender;
use tasknest::state::AppState;
use tasknest::store::{MemTaskStore, MemUserStore};

pub const TEST_SECRET: &str = "integration-test-secret";
pub const BASE_URL: &str = "http://127.0.0.1:8080";

/// Handles to the collaborators behind a test application, so assertions can
/// reach past the HTTP surface (sent emails, stored users).
pub struct TestContext {
    pub state: web::Data<AppState>,
    pub users: Arc<MemUserStore>,
    pub email: Arc<MockEmailSender>,
    pub tokens: TokenService,
}

pub fn test_context() -> TestContext {
    let users = Arc::new(MemUserStore::new());
    let tasks = Arc::new(MemTaskStore::new());
    let email = Arc::new(MockEmailSender::new());
    let tokens = TokenService::new(TEST_SECRET, 3600, 86400);

    let state = web::Data::new(AppState {
        users: users.clone(),
        tasks,
        email: email.clone(),
        tokens: tokens.clone(),
        // Low cost keeps the suite fast; strength is covered by unit tests.
        hasher: PasswordHasher::new(4),
        public_base_url: BASE_URL.to_string(),
    });

    TestContext {
        state,
        users,
        email,
        tokens,
    }
}

/// Pulls the verification token out of the emailed link.
pub fn token_from_email(html: &str) -> String {
    let start = html
        .find("token=")
        .expect("verification email should contain a token link")
        + "token=".len();
    let rest = &html[start..];
    let end = rest.find('"').unwrap_or(rest.len());
    rest[..end].to_string()
}
