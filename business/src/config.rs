use std::any::Any;

use log::info;
use rolodex_states::{SnapshotClone, State, state_assign_impl};
use serde::Deserialize;
use ustr::Ustr;

/// json-server's default address, where the users fixture is usually served.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessConfig {
    pub api_base_url: String,
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    rolodex_api_base_url: Option<String>,
}

impl BusinessConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }

    /// Read `ROLODEX_API_BASE_URL`, falling back to [`DEFAULT_API_BASE_URL`].
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars<S: AsRef<str>>(vars: impl IntoIterator<Item = (S, S)>) -> anyhow::Result<Self> {
        let raw: RawConfig = serde_env::from_iter(vars)?;
        let config = match raw.rolodex_api_base_url {
            Some(url) => {
                info!("Using ROLODEX_API_BASE_URL: {url}");
                Self::new(url)
            }
            None => Self::default(),
        };
        Ok(config)
    }

    /// Base URL with any trailing slash removed.
    pub fn api_url(&self) -> Ustr {
        Ustr::from(self.api_base_url.trim_end_matches('/'))
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

impl SnapshotClone for BusinessConfig {
    fn clone_boxed(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}

impl State for BusinessConfig {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_local_json_server() {
        let config = BusinessConfig::from_vars(Vec::<(&str, &str)>::new())
            .expect("empty env should deserialize");
        assert_eq!(config.api_url(), Ustr::from("http://localhost:5000"));
    }

    #[test]
    fn env_override_is_trimmed() {
        let config =
            BusinessConfig::from_vars(vec![("ROLODEX_API_BASE_URL", "https://api.example.com/")])
                .expect("override should deserialize");
        assert_eq!(config.api_base_url, "https://api.example.com");
        assert_eq!(config.api_url(), Ustr::from("https://api.example.com"));
    }

    #[test]
    fn unrelated_vars_are_ignored() {
        let config = BusinessConfig::from_vars(vec![("HOME", "/root"), ("PATH", "/bin")])
            .expect("unrelated vars should deserialize");
        assert_eq!(config, BusinessConfig::default());
    }
}
