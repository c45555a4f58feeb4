//! Site settings layered with figment.
//!
//! Precedence (highest to lowest):
//! 1. Environment variables (`SITE_*`, `__` between section and key)
//! 2. `site.toml` in the working directory
//! 3. Default values

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::gateway::RelaySettings;
use crate::relay::MailSettings;

pub const CONFIG_FILE: &str = "site.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub relay: RelaySettings,
    #[serde(default)]
    pub mail: MailSettings,
}

impl SiteConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(path).extract().map_err(Box::new)?;
        config.check()?;
        Ok(config)
    }

    pub fn figment(path: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if path.exists() {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed("SITE_").split("__"))
    }

    fn check(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("relay.endpoint", &self.relay.endpoint),
            ("relay.site_origin", &self.relay.site_origin),
            ("mail.api_base", &self.mail.api_base),
        ] {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: format!("expected an http(s) URL, got '{value}'"),
                });
            }
        }
        if self.relay.access_key.is_empty() {
            tracing::warn!("relay.access_key is empty; the form relay will reject submissions");
        }
        if self.mail.api_key.is_empty() {
            tracing::warn!("mail.api_key is empty; /api/send-email will fail to deliver");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;

    #[test]
    fn test_defaults() {
        Jail::expect_with(|_jail| {
            let config = SiteConfig::load().expect("config loads");
            assert_eq!(config.relay.endpoint, "https://api.web3forms.com/submit");
            assert_eq!(config.relay.from_name, "DevMaster Portfolio");
            assert_eq!(config.mail.owner, "contact@devmaster.dev");
            Ok(())
        });
    }

    #[test]
    fn test_file_then_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"
                [relay]
                access_key = "from-file"
                site_origin = "https://devmaster.dev"

                [mail]
                owner = "me@devmaster.dev"
                "#,
            )?;
            jail.set_env("SITE_RELAY__ACCESS_KEY", "from-env");

            let config = SiteConfig::load().expect("config loads");
            assert_eq!(config.relay.access_key, "from-env");
            assert_eq!(config.relay.site_origin, "https://devmaster.dev");
            assert_eq!(config.mail.owner, "me@devmaster.dev");
            assert_eq!(config.mail.sender, "no-reply@devmaster.dev");
            Ok(())
        });
    }

    #[test]
    fn test_rejects_bad_url() {
        Jail::expect_with(|jail| {
            jail.set_env("SITE_RELAY__ENDPOINT", "api.web3forms.com");
            let err = SiteConfig::load().unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue { .. }));
            Ok(())
        });
    }
}
