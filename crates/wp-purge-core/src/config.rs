use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use url::Url;

use crate::auth::Credentials;

/// REST namespace every request is issued against
const API_PATH: &str = "wp-json/wp/v2/";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub http: HttpConfig,
    /// Sites are processed in the order they appear in the file
    #[serde(default)]
    pub sites: Vec<SiteConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Minimum post age in days before it becomes eligible for deletion
    #[serde(default = "default_threshold_days")]
    pub old_posts_day_threshold: u32,
    /// Number of days' worth of posts swept per run
    #[serde(default = "default_delete_days")]
    pub delete_days_count: u32,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            old_posts_day_threshold: default_threshold_days(),
            delete_days_count: default_delete_days(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_timeout(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Label used in logs and for `--site` selection
    pub name: String,
    /// Host name, or a full `http(s)://` origin for local installs
    pub domain: String,
    pub app_username: String,
    pub app_password: String,
}

impl std::fmt::Debug for SiteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteConfig")
            .field("name", &self.name)
            .field("domain", &self.domain)
            .field("app_username", &self.app_username)
            .finish_non_exhaustive()
    }
}

impl SiteConfig {
    /// Base URL of the `wp/v2` REST namespace, always ending in `/`
    pub fn api_base(&self) -> crate::Result<Url> {
        let domain = self.domain.trim().trim_end_matches('/');
        let origin = if domain.starts_with("http://") || domain.starts_with("https://") {
            domain.to_string()
        } else {
            format!("https://{}", domain)
        };

        Ok(Url::parse(&format!("{}/", origin))?.join(API_PATH)?)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.app_username, &self.app_password)
    }
}

fn default_threshold_days() -> u32 {
    180
}

fn default_delete_days() -> u32 {
    1
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Expand a leading `~` to the user's home directory
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from the default location or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, falling back to defaults when it does not exist
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let path = expand_tilde(path);

        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;

        Ok(config)
    }

    /// Get the configuration file path
    /// Always uses ~/.config/wp-purge/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("wp-purge")
            .join("config.toml")
    }

    pub fn validate(&self) -> crate::Result<()> {
        let mut seen = HashSet::new();

        for site in &self.sites {
            if site.name.trim().is_empty() {
                return Err(crate::Error::Config("site with empty name".to_string()));
            }
            if !seen.insert(site.name.as_str()) {
                return Err(crate::Error::Config(format!(
                    "duplicate site name: {}",
                    site.name
                )));
            }
            if site.domain.trim().is_empty() {
                return Err(crate::Error::Config(format!(
                    "site '{}' has no domain",
                    site.name
                )));
            }
            if site.app_username.trim().is_empty() {
                return Err(crate::Error::Config(format!(
                    "site '{}' has no app_username",
                    site.name
                )));
            }
            site.api_base()?;
        }

        Ok(())
    }

    /// Sites to process: all of them when `names` is empty, otherwise the named ones
    /// in configuration order
    pub fn select_sites(&self, names: &[String]) -> crate::Result<Vec<&SiteConfig>> {
        if let Some(unknown) = names
            .iter()
            .find(|name| !self.sites.iter().any(|site| &site.name == *name))
        {
            return Err(crate::Error::Config(format!("unknown site: {}", unknown)));
        }

        Ok(self
            .sites
            .iter()
            .filter(|site| names.is_empty() || names.contains(&site.name))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
[general]
old_posts_day_threshold = 365
delete_days_count = 7

[[sites]]
name = "news"
domain = "news.example.com"
app_username = "bot"
app_password = "abcd efgh"

[[sites]]
name = "local"
domain = "http://localhost:8080/"
app_username = "admin"
app_password = "pw"
"#;

    fn site(name: &str, domain: &str) -> SiteConfig {
        SiteConfig {
            name: name.to_string(),
            domain: domain.to_string(),
            app_username: "bot".to_string(),
            app_password: "secret".to_string(),
        }
    }

    #[test]
    fn test_parse_sample() {
        let config: AppConfig = toml::from_str(SAMPLE).unwrap();
        config.validate().unwrap();

        assert_eq!(config.general.old_posts_day_threshold, 365);
        assert_eq!(config.general.delete_days_count, 7);
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.http.request_timeout_secs, 30);

        let names: Vec<_> = config.sites.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["news", "local"]);
    }

    #[test]
    fn test_defaults_when_sections_missing() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.general.old_posts_day_threshold, 180);
        assert_eq!(config.general.delete_days_count, 1);
        assert!(config.sites.is_empty());
    }

    #[test]
    fn test_api_base() {
        assert_eq!(
            site("a", "blog.example.com").api_base().unwrap().as_str(),
            "https://blog.example.com/wp-json/wp/v2/"
        );
        assert_eq!(
            site("b", "http://localhost:8080/").api_base().unwrap().as_str(),
            "http://localhost:8080/wp-json/wp/v2/"
        );
    }

    #[test]
    fn test_duplicate_site_rejected() {
        let config = AppConfig {
            sites: vec![site("a", "a.example.com"), site("a", "b.example.com")],
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(crate::Error::Config(_))));
    }

    #[test]
    fn test_select_sites() {
        let config = AppConfig {
            sites: vec![
                site("a", "a.example.com"),
                site("b", "b.example.com"),
                site("c", "c.example.com"),
            ],
            ..AppConfig::default()
        };

        assert_eq!(config.select_sites(&[]).unwrap().len(), 3);

        let picked = config
            .select_sites(&["c".to_string(), "a".to_string()])
            .unwrap();
        let names: Vec<_> = picked.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["a", "c"]);

        assert!(config.select_sites(&["zzz".to_string()]).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.sites.len(), 2);
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert!(config.sites.is_empty());
    }

    #[test]
    fn test_debug_hides_password() {
        let debug = format!("{:?}", site("a", "a.example.com"));
        assert!(!debug.contains("secret"));
    }
}
