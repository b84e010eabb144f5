use std::env;

/// Process configuration, loaded once at startup.
///
/// The signing secret, token lifetimes, and hashing cost live here so request
/// handling never reads the environment ad hoc.
pub struct Config {
    pub database_url: String,
    pub server_port: u16,
    pub server_host: String,
    /// Base URL used when building verification links sent by email.
    pub public_base_url: String,
    pub jwt_secret: String,
    /// Session token lifetime in seconds (default one hour).
    pub session_ttl_secs: i64,
    /// Email-verification token lifetime in seconds (default 24 hours).
    pub verification_ttl_secs: i64,
    /// bcrypt cost factor (default 12).
    pub bcrypt_cost: u32,
    pub email_from_name: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("SERVER_PORT must be a number"),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            public_base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8080".to_string()),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            session_ttl_secs: env::var("SESSION_TTL_SECS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()
                .expect("SESSION_TTL_SECS must be a number"),
            verification_ttl_secs: env::var("VERIFICATION_TTL_SECS")
                .unwrap_or_else(|_| "86400".to_string())
                .parse()
                .expect("VERIFICATION_TTL_SECS must be a number"),
            bcrypt_cost: env::var("BCRYPT_COST")
                .unwrap_or_else(|_| "12".to_string())
                .parse()
                .expect("BCRYPT_COST must be a number"),
            email_from_name: env::var("EMAIL_FROM_NAME")
                .unwrap_or_else(|_| "TaskNest".to_string()),
        }
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // Set required environment variables
        env::set_var("DATABASE_URL", "postgres://test");
        env::set_var("JWT_SECRET", "test-secret");

        let config = Config::from_env();

        assert_eq!(config.database_url, "postgres://test");
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.server_host, "127.0.0.1");
        assert_eq!(config.session_ttl_secs, 3600);
        assert_eq!(config.verification_ttl_secs, 86400);
        assert_eq!(config.bcrypt_cost, 12);

        // Test custom values
        env::set_var("SERVER_PORT", "3000");
        env::set_var("SERVER_HOST", "0.0.0.0");
        env::set_var("SESSION_TTL_SECS", "1800");

        let config = Config::from_env();

        assert_eq!(config.server_port, 3000);
        assert_eq!(config.server_host, "0.0.0.0");
        assert_eq!(config.session_ttl_secs, 1800);
        assert_eq!(config.server_url(), "http://0.0.0.0:3000");
    }
}
