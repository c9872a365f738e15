use std::env;

use crate::routing::{RouteUrlBuilder, UrlError};

/// Read-only key lookups.
pub trait ConfigStore {
    fn get(&self, key: &str) -> Option<String>;
}

/// Looks keys up in the process environment, upper-cased
/// (`logging_enabled` reads `LOGGING_ENABLED`). `.env` is loaded first.
pub struct EnvStore;

impl EnvStore {
    pub fn load() -> Self {
        dotenv::dotenv().ok();
        EnvStore
    }
}

impl ConfigStore for EnvStore {
    fn get(&self, key: &str) -> Option<String> {
        env::var(key.to_ascii_uppercase()).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectSettings {
    pub logging_enabled: bool,
    pub charset: String,
}

impl Default for RedirectSettings {
    fn default() -> Self {
        Self {
            logging_enabled: true,
            charset: "utf-8".into(),
        }
    }
}

impl RedirectSettings {
    pub fn from_store(store: &dyn ConfigStore) -> Self {
        let defaults = Self::default();

        Self {
            logging_enabled: store
                .get("logging_enabled")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.logging_enabled),
            charset: store
                .get("charset")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.charset),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[derive(Clone)]
pub struct AppEnvironment {
    pub base_url: String,
    pub redirect: RedirectSettings,
}

impl AppEnvironment {
    pub fn from_store(store: &dyn ConfigStore) -> Result<AppEnvironment, UrlError> {
        let base_url = store
            .get("base_url")
            .unwrap_or_else(|| "http://localhost:8000".into());

        // fail at startup rather than on the first redirect
        RouteUrlBuilder::new(&base_url)?;

        Ok(AppEnvironment {
            base_url,
            redirect: RedirectSettings::from_store(store),
        })
    }
}

pub fn get() -> Result<AppEnvironment, UrlError> {
    AppEnvironment::from_store(&EnvStore::load())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    struct MapStore(HashMap<&'static str, &'static str>);

    impl ConfigStore for MapStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key).map(|v| v.to_string())
        }
    }

    fn store(pairs: &[(&'static str, &'static str)]) -> MapStore {
        MapStore(pairs.iter().copied().collect())
    }

    #[test]
    fn defaults_when_unset() {
        let env = AppEnvironment::from_store(&store(&[])).unwrap();

        assert_eq!(env.base_url, "http://localhost:8000");
        assert_eq!(env.redirect, RedirectSettings::default());
        assert!(env.redirect.logging_enabled);
        assert_eq!(env.redirect.charset, "utf-8");
    }

    #[test]
    fn reads_flags_and_charset() {
        let settings = RedirectSettings::from_store(&store(&[
            ("logging_enabled", "Off"),
            ("charset", "ISO-8859-1"),
        ]));

        assert!(!settings.logging_enabled);
        assert_eq!(settings.charset, "ISO-8859-1");

        for on in ["1", "true", "YES", " on "] {
            assert!(RedirectSettings::from_store(&store(&[("logging_enabled", on)])).logging_enabled);
        }
    }

    #[test]
    fn blank_charset_falls_back() {
        let settings = RedirectSettings::from_store(&store(&[("charset", "  ")]));
        assert_eq!(settings.charset, "utf-8");
    }

    #[test]
    fn bad_base_url_is_rejected() {
        assert!(AppEnvironment::from_store(&store(&[("base_url", "nope")])).is_err());
    }
}
