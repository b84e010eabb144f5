use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user account as stored and returned by the API.
///
/// `verified` starts false and becomes true exactly once, when the
/// verification token emailed at registration is redeemed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    /// Unique across all users; stored lowercased.
    pub email: String,
    /// Never serialized and never compared or logged in plaintext.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

/// Data needed to create a user record. The hash is produced by the
/// credential hasher before this struct is built; plaintext never reaches
/// the store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}
