// ============================
// board-backend-lib/src/config.rs
// ============================
//! Configuration management.
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Log level
    pub log_level: String,
    /// Path that the credential filter treats as the login endpoint
    pub login_path: String,
    /// Paths that bypass authentication entirely
    pub public_paths: Vec<String>,
    /// Maximum accepted login body size in bytes
    pub login_body_limit: usize,
    /// Bound on a single credential store lookup, in milliseconds
    pub store_timeout_ms: u64,
    /// Token issuance settings
    pub token: TokenSettings,
}

/// Signed-token settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenSettings {
    /// HMAC secret the tokens are signed with
    pub secret: String,
    /// Token lifetime in seconds
    pub ttl_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".parse().expect("valid literal address"),
            log_level: "info".to_string(),
            login_path: "/login".to_string(),
            public_paths: vec![
                "/login".to_string(),
                "/signUp".to_string(),
                "/".to_string(),
            ],
            login_body_limit: 16 * 1024,
            store_timeout_ms: 2_000,
            token: TokenSettings::default(),
        }
    }
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            secret: String::new(),
            ttl_secs: 60 * 60, // 1 hour
        }
    }
}

impl Settings {
    /// Load settings from `board.toml` and `BOARD_`-prefixed environment
    /// variables, layered over the defaults.
    pub fn load() -> Result<Self> {
        Self::figment(Toml::file("board.toml")).extract().map_err(Into::into)
    }

    /// Load settings from an explicit config file path.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::figment(Toml::file(path.as_ref())).extract().map_err(Into::into)
    }

    fn figment(file: figment::providers::Data<Toml>) -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(file)
            .merge(Env::prefixed("BOARD_").split("__"))
    }

    /// Whether a request path bypasses authentication. Exact match only.
    pub fn is_public(&self, path: &str) -> bool {
        self.public_paths.iter().any(|p| p == path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_the_public_set() {
        let settings = Settings::default();
        assert!(settings.is_public("/login"));
        assert!(settings.is_public("/signUp"));
        assert!(settings.is_public("/"));
        assert!(!settings.is_public("/members"));
    }

    #[test]
    fn public_match_is_exact() {
        let settings = Settings::default();
        // No prefix matching: /login123 is a different, protected path.
        assert!(!settings.is_public("/login123"));
        assert!(!settings.is_public("/login/"));
        assert!(!settings.is_public("/LOGIN"));
    }

    #[test]
    fn default_login_path() {
        let settings = Settings::default();
        assert_eq!(settings.login_path, "/login");
        assert!(settings.login_body_limit > 0);
    }
}
