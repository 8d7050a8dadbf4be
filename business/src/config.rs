use std::any::Any;

use serde::Deserialize;
use usertable_states::{SnapshotClone, State, assign_impl};
use ustr::Ustr;

pub const DEFAULT_API_BASE_URL: &str = "https://randomuser.me";

/// Prefix of the environment overrides read by `BusinessConfig::from_env`.
///
/// `USERTABLE_API=http://localhost:8080` points the viewer at another server.
pub const ENV_PREFIX: &str = "USERTABLE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessConfig {
    pub api_base_url: String,
}

/// Environment overrides, all optional.
#[derive(Debug, Default, Deserialize)]
pub struct EnvOverrides {
    #[serde(default)]
    pub api: Option<String>,
}

impl BusinessConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into(),
        }
    }

    /// Endpoint the users are fetched from, e.g. `https://randomuser.me/api/`.
    pub fn api_url(&self) -> Ustr {
        let base = self.api_base_url.trim_end_matches('/');
        Ustr::from(&format!("{base}/api/"))
    }

    /// Defaults, overridden by `USERTABLE_*` environment variables when set.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        match serde_env::from_env_with_prefix::<EnvOverrides>(ENV_PREFIX) {
            Ok(overrides) => Self::default().with_overrides(overrides),
            Err(err) => {
                log::warn!("Ignoring malformed {ENV_PREFIX}_* environment: {err}");
                Self::default()
            }
        }
    }

    pub fn with_overrides(self, overrides: EnvOverrides) -> Self {
        match overrides.api {
            Some(api) if !api.trim().is_empty() => Self::new(api.trim()),
            _ => self,
        }
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
        assign_impl(self, new_self);
    }
}
