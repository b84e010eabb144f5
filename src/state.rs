use std::sync::Arc;

use crate::auth::{PasswordHasher, TokenService};
use crate::email::EmailSender;
use crate::store::{TaskStore, UserStore};

/// Shared application state, assembled once at startup.
///
/// Everything here is immutable after construction: the stores and email
/// sender are handles to external collaborators, and the token service and
/// hasher carry the fixed signing secret and cost parameter. No handler reads
/// process-wide globals.
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub tasks: Arc<dyn TaskStore>,
    pub email: Arc<dyn EmailSender>,
    pub tokens: TokenService,
    pub hasher: PasswordHasher,
    /// Base URL embedded in verification links.
    pub public_base_url: String,
}
