use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path(".")
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Config::builder()
            .add_source(
                File::with_name(
                    path.as_ref()
                        .join("config/default")
                        .to_string_lossy()
                        .as_ref(),
                )
                .required(false),
            )
            .add_source(
                File::with_name(
                    path.as_ref()
                        .join("config/local")
                        .to_string_lossy()
                        .as_ref(),
                )
                .required(false),
            )
            .add_source(Environment::default().separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GithubConfig {
    #[serde(default = "GithubConfig::default_base_url")]
    pub base_url: String,
    /// Path template for the profile endpoint; `{username}` is the
    /// single substitution point.
    #[serde(default = "GithubConfig::default_user_path")]
    pub user_path: String,
    #[serde(default = "GithubConfig::default_repos_path")]
    pub repos_path: String,
    #[serde(default = "GithubConfig::default_user_agent")]
    pub user_agent: String,
}

impl GithubConfig {
    fn default_base_url() -> String {
        "https://api.github.com/".to_string()
    }

    fn default_user_path() -> String {
        "users/{username}".to_string()
    }

    fn default_repos_path() -> String {
        "users/{username}/repos".to_string()
    }

    fn default_user_agent() -> String {
        "octofetch".to_string()
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            user_path: Self::default_user_path(),
            repos_path: Self::default_repos_path(),
            user_agent: Self::default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "CacheConfig::default_capacity")]
    pub capacity: usize,
}

impl CacheConfig {
    const fn default_capacity() -> usize {
        1024
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: Self::default_capacity(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "ApiConfig::default_bind")]
    pub bind: String,
}

impl ApiConfig {
    fn default_bind() -> String {
        "0.0.0.0:3000".to_string()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: Self::default_bind(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "ObservabilityConfig::default_metrics_path")]
    pub metrics_path: String,
}

impl ObservabilityConfig {
    fn default_metrics_path() -> String {
        "/metrics".to_string()
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_path: Self::default_metrics_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_section() {
        let config: AppConfig = Config::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.github.base_url, "https://api.github.com/");
        assert_eq!(config.github.user_path, "users/{username}");
        assert_eq!(config.github.repos_path, "users/{username}/repos");
        assert_eq!(config.cache.capacity, 1024);
        assert_eq!(config.observability.metrics_path, "/metrics");
    }
}
