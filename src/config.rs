//! Database settings from the environment.

use sqlx::mysql::MySqlConnectOptions;

/// Connection settings for the blood bank database. Every field has a
/// development default; the password default is a placeholder and must be
/// replaced per deployment via `DB_PASSWORD`.
#[derive(Clone, Debug)]
pub struct DbConfig {
    pub host: String,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        DbConfig {
            host: "127.0.0.1".into(),
            user: "root".into(),
            password: "change-me".into(),
            database: "bloodBank".into(),
        }
    }
}

impl DbConfig {
    /// Read `DB_HOST`, `DB_USER`, `DB_PASSWORD`, `DB_NAME`, falling back to
    /// the defaults for any that are unset.
    pub fn from_env() -> Self {
        let defaults = DbConfig::default();
        DbConfig {
            host: std::env::var("DB_HOST").unwrap_or(defaults.host),
            user: std::env::var("DB_USER").unwrap_or(defaults.user),
            password: std::env::var("DB_PASSWORD").unwrap_or(defaults.password),
            database: std::env::var("DB_NAME").unwrap_or(defaults.database),
        }
    }

    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = DbConfig::default();
        assert_eq!(cfg.host, "127.0.0.1");
        assert_eq!(cfg.user, "root");
        assert_eq!(cfg.database, "bloodBank");
    }
}
