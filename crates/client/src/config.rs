//! Client configuration from environment variables
//!
//! Supported environment variables:
//! - TIMETABLER_API_URL: Backend base URL (default `http://localhost:8080`)
//! - TIMETABLER_API_TOKEN: Bearer token sent with every request
//! - TIMETABLER_REQUEST_TIMEOUT_MS: HTTP timeout (default 120000)
//! - TIMETABLER_COMMIT_STRATEGY: `sequential` (default) or `parallel`
//! - TIMETABLER_DAYS: Number of visible days, Monday first (range: 1-7, default 5)
//! - TIMETABLER_ORGANIZATION_ID: Scope for periods and rule preferences
//! - TIMETABLER_PLAN_ID: Scope for rule preferences

use std::path::Path;
use std::time::Duration;

use timetabler_domain::{DayOfWeek, OrganizationId, PlanId};
use url::Url;

use crate::application::editing::CommitStrategy;
use crate::application::ports::PreferenceScope;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 120_000;
pub const DEFAULT_VISIBLE_DAYS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("TIMETABLER_API_URL '{value}' is not a valid URL: {reason}")]
    InvalidUrl { value: String, reason: String },
    #[error("{var} '{value}' is not a valid id")]
    InvalidId { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Validated base URL, as configured
    pub api_url: String,
    pub api_token: Option<String>,
    pub request_timeout: Duration,
    pub commit_strategy: CommitStrategy,
    pub visible_days: usize,
    pub organization_id: Option<OrganizationId>,
    pub plan_id: Option<PlanId>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            commit_strategy: CommitStrategy::default(),
            visible_days: DEFAULT_VISIBLE_DAYS,
            organization_id: None,
            plan_id: None,
        }
    }
}

impl ClientConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`. Malformed optional values are
    /// logged and replaced by their defaults; a malformed URL or id is an
    /// error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup("TIMETABLER_API_URL") {
            config.api_url = validate_url(&raw)?;
        }

        config.api_token = lookup("TIMETABLER_API_TOKEN").filter(|t| !t.trim().is_empty());

        if let Some(val) = lookup("TIMETABLER_REQUEST_TIMEOUT_MS") {
            match val.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => config.request_timeout = Duration::from_millis(ms),
                _ => tracing::warn!(
                    val = %val,
                    "TIMETABLER_REQUEST_TIMEOUT_MS is not a positive integer, ignoring"
                ),
            }
        }

        if let Some(val) = lookup("TIMETABLER_COMMIT_STRATEGY") {
            match val.parse::<CommitStrategy>() {
                Ok(strategy) => config.commit_strategy = strategy,
                Err(()) => tracing::warn!(
                    val = %val,
                    "TIMETABLER_COMMIT_STRATEGY must be 'sequential' or 'parallel', ignoring"
                ),
            }
        }

        if let Some(val) = lookup("TIMETABLER_DAYS") {
            match val.trim().parse::<usize>() {
                Ok(days) if (1..=7).contains(&days) => config.visible_days = days,
                _ => tracing::warn!(val = %val, "TIMETABLER_DAYS out of range [1, 7], ignoring"),
            }
        }

        config.organization_id = parse_id(&lookup, "TIMETABLER_ORGANIZATION_ID")?;
        config.plan_id = parse_id(&lookup, "TIMETABLER_PLAN_ID")?;

        Ok(config)
    }

    pub fn days(&self) -> Vec<DayOfWeek> {
        DayOfWeek::first_n(self.visible_days)
    }

    pub fn scope(&self) -> PreferenceScope {
        PreferenceScope {
            organization_id: self.organization_id,
            plan_id: self.plan_id,
        }
    }
}

fn validate_url(raw: &str) -> Result<String, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        value: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    Ok(raw.trim().trim_end_matches('/').to_string())
}

fn parse_id<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(var).filter(|v| !v.trim().is_empty()) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidId { var, value }),
    }
}

/// Load `.env.local` then `.env` from `dir`, if present. Existing variables
/// are never overwritten.
pub fn load_dotenv_from(dir: &Path) {
    for filename in [".env.local", ".env"] {
        let path = dir.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api_url, "http://localhost:8080");
        assert_eq!(config.days().len(), 5);
        assert!(config.scope().is_empty());
    }

    #[test]
    fn reads_every_variable() {
        let org = OrganizationId::new();
        let org_text = org.to_string();
        let config = ClientConfig::from_lookup(lookup(&[
            ("TIMETABLER_API_URL", "https://timetable.example.org/"),
            ("TIMETABLER_API_TOKEN", "secret"),
            ("TIMETABLER_REQUEST_TIMEOUT_MS", "5000"),
            ("TIMETABLER_COMMIT_STRATEGY", "parallel"),
            ("TIMETABLER_DAYS", "6"),
            ("TIMETABLER_ORGANIZATION_ID", org_text.as_str()),
        ]))
        .unwrap();

        assert_eq!(config.api_url, "https://timetable.example.org");
        assert_eq!(config.api_token.as_deref(), Some("secret"));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.commit_strategy, CommitStrategy::Parallel);
        assert_eq!(config.days().last(), Some(&DayOfWeek::Saturday));
        assert_eq!(config.organization_id, Some(org));
        assert_eq!(config.plan_id, None);
    }

    #[test]
    fn out_of_range_values_fall_back_to_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("TIMETABLER_REQUEST_TIMEOUT_MS", "soon"),
            ("TIMETABLER_COMMIT_STRATEGY", "eventually"),
            ("TIMETABLER_DAYS", "9"),
        ]))
        .unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn malformed_url_and_ids_are_errors() {
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[("TIMETABLER_API_URL", "not a url")])),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[("TIMETABLER_API_URL", "ftp://files.example.org")])),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert_eq!(
            ClientConfig::from_lookup(lookup(&[("TIMETABLER_PLAN_ID", "plan-7")])),
            Err(ConfigError::InvalidId {
                var: "TIMETABLER_PLAN_ID",
                value: "plan-7".into()
            })
        );
    }
}
