use crate::domain::FishingConfig;
use crate::errors::{CircliteError, CircliteResult};

pub const DEFAULT_API_BASE: &str = "https://fc.ruom.top/";
pub const DEFAULT_FALLBACK_AVATAR: &str =
    "https://fastly.jsdelivr.net/gh/JLinMr/Friend-Circle-Lite@latest/static/favicon.ico";
pub const DEFAULT_PAGE_SIZE: usize = 25;
/// 10 minutes.
pub const DEFAULT_CACHE_TTL_MS: i64 = 10 * 60 * 1000;

/// Widget configuration, merged once at construction: defaults, then
/// environment, then CLI overrides applied by the caller.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: String,
    pub page_size: usize,
    pub cache_ttl_ms: i64,
    pub fallback_avatar: String,
    pub db_path: String,
    pub fishing: FishingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            cache_ttl_ms: DEFAULT_CACHE_TTL_MS,
            fallback_avatar: DEFAULT_FALLBACK_AVATAR.to_string(),
            db_path: "./circlite.db".to_string(),
            fishing: FishingConfig::default(),
        }
    }
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<std::path::PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> CircliteResult<Self> {
        let exe_dir = Self::exe_dir();

        // Try to load .env from executable's directory first
        if let Some(ref dir) = exe_dir {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        let mut config = Config::default();

        if let Ok(api_base) = std::env::var("CIRCLITE_API_URL") {
            config.api_base = api_base;
        }

        if let Ok(raw) = std::env::var("CIRCLITE_PAGE_SIZE") {
            config.page_size = parse_var("CIRCLITE_PAGE_SIZE", &raw)?;
        }

        if let Ok(raw) = std::env::var("CIRCLITE_CACHE_TTL_MS") {
            config.cache_ttl_ms = parse_var("CIRCLITE_CACHE_TTL_MS", &raw)?;
        }

        if let Ok(avatar) = std::env::var("CIRCLITE_ERROR_IMG") {
            config.fallback_avatar = avatar;
        }

        if let Ok(raw) = std::env::var("CIRCLITE_DEFAULT_FISH") {
            config.fishing.default_fish = parse_var("CIRCLITE_DEFAULT_FISH", &raw)?;
        }

        if let Ok(raw) = std::env::var("CIRCLITE_HUNGRY_FISH") {
            config.fishing.hungry_fish = parse_var("CIRCLITE_HUNGRY_FISH", &raw)?;
        }

        if std::env::var("CIRCLITE_PLAIN").is_ok() {
            config.fishing.enabled = false;
        }

        // Default db_path is relative to executable directory
        config.db_path = std::env::var("CIRCLITE_DB_PATH").unwrap_or_else(|_| {
            exe_dir
                .map(|d| d.join("circlite.db").to_string_lossy().into_owned())
                .unwrap_or_else(|| "./circlite.db".to_string())
        });

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CircliteResult<()> {
        if self.page_size == 0 {
            return Err(CircliteError::Config(
                "page size must be at least 1".to_string(),
            ));
        }
        if self.cache_ttl_ms < 0 {
            return Err(CircliteError::Config(
                "cache ttl must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, raw: &str) -> CircliteResult<T> {
    raw.parse()
        .map_err(|_| CircliteError::Config(format!("{} has invalid value: {}", name, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.page_size, 25);
        assert_eq!(config.cache_ttl_ms, 600_000);
        assert!(config.fishing.enabled);
        assert_eq!(config.fishing.default_fish, 100);
        assert_eq!(config.fishing.hungry_fish, 100);
        config.validate().unwrap();
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let config = Config {
            page_size: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(CircliteError::Config(_))));
    }

    #[test]
    fn test_negative_ttl_rejected() {
        let config = Config {
            cache_ttl_ms: -1,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(CircliteError::Config(_))));
    }

    #[test]
    fn test_parse_var_error_names_the_variable() {
        let err = parse_var::<usize>("CIRCLITE_PAGE_SIZE", "abc").unwrap_err();
        assert!(err.to_string().contains("CIRCLITE_PAGE_SIZE"));
    }
}
