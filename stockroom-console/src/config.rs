//! Console configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | STOCKROOM_API_URL | build-time URL | Product service base URL |
//! | STOCKROOM_PAGE_SIZE | 10 | Initial page size, 5 or 10 |
//! | STOCKROOM_RESTOCK_QUANTITY | 10 | Quantity used by "mark in stock" |
//! | STOCKROOM_REQUEST_TIMEOUT_SECS | unset | Request timeout, none when unset |
//! | STOCKROOM_LOG_LEVEL | unset | Log filter, `RUST_LOG` wins |
//! | STOCKROOM_LOG_DIR | unset | Also write daily log files here |

use std::path::PathBuf;
use std::str::FromStr;

use shared::{DEFAULT_PAGE_SIZE, offered_page_size};
use stockroom_client::{ClientConfig, DEFAULT_BASE_URL};

use crate::error::{ConsoleError, ConsoleResult};

pub const DEFAULT_RESTOCK_QUANTITY: i64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub api_base_url: String,
    pub page_size: u32,
    pub default_restock_quantity: i64,
    pub request_timeout_secs: Option<u64>,
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE.get(),
            default_restock_quantity: DEFAULT_RESTOCK_QUANTITY,
            request_timeout_secs: None,
            log_level: None,
            log_dir: None,
        }
    }
}

impl ConsoleConfig {
    /// Load from the process environment
    pub fn from_env() -> ConsoleResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through `lookup`; unset or empty variables keep their default
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConsoleResult<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let config = Self {
            api_base_url: get("STOCKROOM_API_URL").unwrap_or(defaults.api_base_url),
            page_size: parse(&get, "STOCKROOM_PAGE_SIZE")?.unwrap_or(defaults.page_size),
            default_restock_quantity: parse(&get, "STOCKROOM_RESTOCK_QUANTITY")?
                .unwrap_or(defaults.default_restock_quantity),
            request_timeout_secs: parse(&get, "STOCKROOM_REQUEST_TIMEOUT_SECS")?,
            log_level: get("STOCKROOM_LOG_LEVEL"),
            log_dir: get("STOCKROOM_LOG_DIR").map(PathBuf::from),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConsoleResult<()> {
        offered_page_size(self.page_size)
            .map_err(|e| ConsoleError::Config(format!("STOCKROOM_PAGE_SIZE: {e}")))?;
        if self.default_restock_quantity < 0 {
            return Err(ConsoleError::Config(
                "restock quantity cannot be negative".into(),
            ));
        }
        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(&self.api_base_url);
        match self.request_timeout_secs {
            Some(seconds) => config.with_timeout(seconds),
            None => config,
        }
    }
}

fn parse<T: FromStr>(get: &impl Fn(&str) -> Option<String>, key: &str) -> ConsoleResult<Option<T>>
where
    T::Err: std::fmt::Display,
{
    get(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e| ConsoleError::Config(format!("{key}={raw:?}: {e}")))
        })
        .transpose()
}
