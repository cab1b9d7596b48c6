//! Run configuration.
//!
//! Built once at startup from the process environment and handed to every
//! component by parameter.

use crate::error::ConfigError;

/// Highest `maxResults` value the Jira server accepts.
///
/// The server silently caps larger requests, which would make the offset
/// skip issues, so page sizes above this are rejected.
pub const MAX_PAGE_SIZE: usize = 5000;

pub const DEFAULT_PAGE_SIZE: usize = MAX_PAGE_SIZE;

pub const JIRA_LOCATION: &str = "JIRA_LOCATION";
pub const JIRA_USER: &str = "JIRA_USER";
pub const JIRA_PASSWORD: &str = "JIRA_PASSWORD";
pub const NI_LOCATION: &str = "NI_LOCATION";
pub const NI_USER: &str = "NI_USER";
pub const NI_PASSWORD: &str = "NI_PASSWORD";

/// Required variables, in the order they are checked.
pub const REQUIRED_VARS: [&str; 6] = [
    JIRA_LOCATION,
    JIRA_USER,
    JIRA_PASSWORD,
    NI_LOCATION,
    NI_USER,
    NI_PASSWORD,
];

/// Location and credentials of one remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub base_url: String,
    pub user: String,
    pub password: String,
}

impl ServiceConfig {
    pub fn new(base_url: &str, user: &str, password: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            user: user.to_string(),
            password: password.to_string(),
        }
    }
}

/// Full configuration for one sync run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    pub jira: ServiceConfig,
    pub inventory: ServiceConfig,
    pub page_size: usize,
}

impl SyncConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Reports the first missing variable in [`REQUIRED_VARS`] order.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut values = Vec::with_capacity(REQUIRED_VARS.len());
        for name in REQUIRED_VARS {
            let value = lookup(name).ok_or(ConfigError::Missing(name))?;
            values.push(value);
        }

        Ok(Self {
            jira: ServiceConfig::new(&values[0], &values[1], &values[2]),
            inventory: ServiceConfig::new(&values[3], &values[4], &values[5]),
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Override the search page size, within `1..=MAX_PAGE_SIZE`.
    pub fn with_page_size(mut self, page_size: usize) -> Result<Self, ConfigError> {
        self.page_size = check_page_size(page_size)?;
        Ok(self)
    }
}

/// Validate a search page size.
pub fn check_page_size(page_size: usize) -> Result<usize, ConfigError> {
    if (1..=MAX_PAGE_SIZE).contains(&page_size) {
        Ok(page_size)
    } else {
        Err(ConfigError::InvalidPageSize {
            requested: page_size,
            max: MAX_PAGE_SIZE,
        })
    }
}
