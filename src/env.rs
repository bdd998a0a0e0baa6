use crate::ConfigError;

/// Absolute ceiling on page size. Configuration may lower it, never raise it.
pub const MAX_PAGE_LIMIT: u32 = 100;
pub const DEFAULT_PAGE_LIMIT: u32 = 20;

static DEFAULT_LIMIT_VAR: &str = "PAGINATION_DEFAULT_LIMIT";
static MAX_LIMIT_VAR: &str = "PAGINATION_MAX_LIMIT";

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct PaginationConfig {
    default_limit: u32,
    max_limit: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_PAGE_LIMIT,
            max_limit: MAX_PAGE_LIMIT,
        }
    }
}

impl PaginationConfig {
    /// Both limits are clamped into `[1, MAX_PAGE_LIMIT]`, and the default
    /// never exceeds the maximum.
    pub fn new(default_limit: u32, max_limit: u32) -> Self {
        let max_limit = max_limit.clamp(1, MAX_PAGE_LIMIT);
        Self {
            default_limit: default_limit.clamp(1, max_limit),
            max_limit,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &'static str, fallback: u32| -> Result<u32, ConfigError> {
            match lookup(name) {
                None => Ok(fallback),
                Some(value) => value
                    .trim()
                    .parse::<i64>()
                    .map(|parsed| parsed.clamp(1, i64::from(MAX_PAGE_LIMIT)) as u32)
                    .map_err(|_| ConfigError::InvalidInteger { name, value }),
            }
        };
        Ok(Self::new(
            read(DEFAULT_LIMIT_VAR, DEFAULT_PAGE_LIMIT)?,
            read(MAX_LIMIT_VAR, MAX_PAGE_LIMIT)?,
        ))
    }

    pub fn default_limit(&self) -> u32 {
        self.default_limit
    }

    pub fn max_limit(&self) -> u32 {
        self.max_limit
    }

    /// Absent limits take the default; present ones are silently clamped
    /// into `[1, max_limit]`.
    pub fn clamp_limit(&self, limit: Option<i64>) -> u32 {
        match limit {
            None => self.default_limit,
            Some(limit) => limit.clamp(1, i64::from(self.max_limit)) as u32,
        }
    }
}

/// Process-wide configuration read once from the environment. Invalid
/// values are logged and replaced by the defaults.
pub fn pagination_config() -> &'static PaginationConfig {
    use std::sync::OnceLock;
    static PAGINATION_CONFIG: OnceLock<PaginationConfig> = OnceLock::new();
    PAGINATION_CONFIG.get_or_init(|| {
        PaginationConfig::from_env().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "invalid pagination configuration, using defaults");
            PaginationConfig::default()
        })
    })
}
