//! Endpoint and cache configuration.
//!
//! Two services are configured independently: the content graph (products)
//! and the DAM (image assets). Each needs its own credential; a missing or
//! blank credential is a [`ConfigError`], never an empty-credential request.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;
use crate::logging::LogConfig;

/// Default base URL shared by both services.
pub const DEFAULT_BASE_URL: &str = "https://cg.optimizely.com/content/v2";

/// Default per-client response cache capacity.
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Environment variable overriding the base URL.
pub const BASE_URL_VAR: &str = "CG_BASE_URL";

/// Environment variable overriding the cache capacity.
pub const CACHE_CAPACITY_VAR: &str = "CG_CACHE_CAPACITY";

/// The two remote services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    /// Content graph: product records.
    Content,
    /// Digital asset management: image assets.
    Dam,
}

impl Service {
    pub fn name(&self) -> &'static str {
        match self {
            Service::Content => "content",
            Service::Dam => "dam",
        }
    }

    /// Environment variable holding this service's credential.
    pub fn credential_var(&self) -> &'static str {
        match self {
            Service::Content => "CG_SC_AUTH",
            Service::Dam => "CG_DAM_AUTH",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One remote endpoint: base URL plus query-string credential.
#[derive(Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    pub base_url: String,
    credential: String,
}

impl fmt::Debug for EndpointConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointConfig")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl EndpointConfig {
    /// Create an endpoint, rejecting a blank credential.
    pub fn new(
        service: Service,
        base_url: impl Into<String>,
        credential: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let credential = credential.into();
        if credential.trim().is_empty() {
            return Err(ConfigError::MissingCredential {
                service: service.name(),
                variable: service.credential_var(),
            });
        }
        Ok(Self {
            base_url: base_url.into(),
            credential,
        })
    }

    /// Full request URL: `{base_url}?auth={credential}&cache=true`.
    pub fn url(&self) -> Result<Url, ConfigError> {
        Url::parse_with_params(
            &self.base_url,
            &[("auth", self.credential.as_str()), ("cache", "true")],
        )
        .map_err(|e| ConfigError::InvalidUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })
    }
}

/// Optional settings read from `catalog.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_credential: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dam_credential: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_capacity: Option<usize>,
    #[serde(default)]
    pub log: LogConfig,
}

impl FileConfig {
    /// Load from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { reason, .. } => ConfigError::Parse {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })
    }

    /// Parse TOML content.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: "<inline>".to_string(),
            reason: e.to_string(),
        })
    }
}

/// Resolved configuration for both clients.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub content: EndpointConfig,
    pub dam: EndpointConfig,
    pub cache_capacity: usize,
    pub log: LogConfig,
}

impl CatalogConfig {
    /// Create a configuration with the default base URL.
    pub fn new(
        content_credential: impl Into<String>,
        dam_credential: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            content: EndpointConfig::new(Service::Content, DEFAULT_BASE_URL, content_credential)?,
            dam: EndpointConfig::new(Service::Dam, DEFAULT_BASE_URL, dam_credential)?,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            log: LogConfig::default(),
        })
    }

    /// Point both services at another base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.content.base_url = base_url.clone();
        self.dam.base_url = base_url;
        self
    }

    /// Set the per-client cache capacity.
    pub fn with_cache_capacity(mut self, capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::InvalidValue {
                key: "cache_capacity",
                value: capacity.to_string(),
            });
        }
        self.cache_capacity = capacity;
        Ok(self)
    }

    /// Set logging options.
    pub fn with_log(mut self, log: LogConfig) -> Self {
        self.log = log;
        self
    }

    /// Endpoint for a service.
    pub fn endpoint(&self, service: Service) -> &EndpointConfig {
        match service {
            Service::Content => &self.content,
            Service::Dam => &self.dam,
        }
    }

    /// Read from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(FileConfig::default(), |key| std::env::var(key).ok())
    }

    /// Read through a lookup function, e.g. values baked in at build time.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::resolve(FileConfig::default(), lookup)
    }

    /// Merge file settings with looked-up values. Looked-up values win.
    pub fn resolve<F>(file: FileConfig, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let content = get(Service::Content.credential_var())
            .or(file.content_credential)
            .unwrap_or_default();
        let dam = get(Service::Dam.credential_var())
            .or(file.dam_credential)
            .unwrap_or_default();

        let mut config = Self::new(content, dam)?.with_log(file.log);

        if let Some(base_url) = get(BASE_URL_VAR).or(file.base_url) {
            config = config.with_base_url(base_url);
        }

        let capacity = match get(CACHE_CAPACITY_VAR) {
            Some(raw) => Some(raw.trim().parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                key: "cache_capacity",
                value: raw.clone(),
            })?),
            None => file.cache_capacity,
        };
        if let Some(capacity) = capacity {
            config = config.with_cache_capacity(capacity)?;
        }

        Ok(config)
    }
}
