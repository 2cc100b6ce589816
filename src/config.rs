//! Application configuration management.
//!
//! Configuration is read from environment variables with the `envy` crate,
//! after an optional `.env` file has been loaded by `dotenvy`.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string
/// - `TOKEN_SECRET` (required): key used to sign bearer tokens
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `UPLOAD_DIR` (optional): where avatars and campaign images are written, defaults to `images`
/// - `DB_MAX_CONNECTIONS` (optional): pool size, defaults to 5
/// - `BCRYPT_COST` (optional): password hashing cost, defaults to `bcrypt::DEFAULT_COST`
/// - `TOKEN_TTL_HOURS` (optional): bearer token lifetime, defaults to 168 (one week)
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    pub token_secret: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,

    #[serde(default = "default_max_connections")]
    pub db_max_connections: u32,

    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,

    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
}

fn default_port() -> u16 {
    3000
}

fn default_upload_dir() -> String {
    "images".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

fn default_token_ttl_hours() -> i64 {
    24 * 7
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable (`DATABASE_URL`, `TOKEN_SECRET`)
    /// is missing or a value cannot be parsed into its expected type.
    pub fn from_env() -> Result<Self, envy::Error> {
        // Missing .env is fine, real environment still applies
        dotenvy::dotenv().ok();

        Self::from_vars(std::env::vars())
    }

    /// Deserialize configuration from explicit `(NAME, value)` pairs.
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn applies_defaults_for_optional_values() {
        let config = Config::from_vars(vars(&[
            ("DATABASE_URL", "postgres://localhost/crowdfunding"),
            ("TOKEN_SECRET", "s3cret"),
        ]))
        .unwrap();

        assert_eq!(config.server_port, 3000);
        assert_eq!(config.upload_dir, "images");
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert_eq!(config.token_ttl_hours, 168);
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_vars(vars(&[
            ("DATABASE_URL", "postgres://localhost/crowdfunding"),
            ("TOKEN_SECRET", "s3cret"),
            ("SERVER_PORT", "8080"),
            ("UPLOAD_DIR", "/var/lib/crowdfunding/images"),
            ("BCRYPT_COST", "10"),
            ("TOKEN_TTL_HOURS", "12"),
        ]))
        .unwrap();

        assert_eq!(config.server_port, 8080);
        assert_eq!(config.upload_dir, "/var/lib/crowdfunding/images");
        assert_eq!(config.bcrypt_cost, 10);
        assert_eq!(config.token_ttl_hours, 12);
    }

    #[test]
    fn token_secret_is_required() {
        let result = Config::from_vars(vars(&[(
            "DATABASE_URL",
            "postgres://localhost/crowdfunding",
        )]));

        assert!(result.is_err());
    }
}
