//! Agent configuration loaded from environment variables.

use std::time::Duration;

use smartfactory_core::profile::{BRIDGE, PROBE};
use smartfactory_core::{Generator, Profile, UnknownProfile};

/// Which binary is loading the configuration. Selects the defaults that
/// differ between the bridge simulator and the probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Bridge,
    Probe,
}

impl Role {
    fn default_profile(self) -> &'static Profile {
        match self {
            Role::Bridge => &BRIDGE,
            Role::Probe => &PROBE,
        }
    }

    fn default_interval_secs(self) -> u64 {
        match self {
            Role::Bridge => 3,
            Role::Probe => 5,
        }
    }
}

/// Which API resource receives submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `POST /sensor/raw` with a `text/plain` body.
    Raw,
    /// `POST /sensor/data` with the wire text as a JSON string.
    Data,
}

impl Endpoint {
    pub const fn path(self) -> &'static str {
        match self {
            Endpoint::Raw => "sensor/raw",
            Endpoint::Data => "sensor/data",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got {value:?}")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error(transparent)]
    Profile(#[from] UnknownProfile),
}

/// Runtime configuration shared by both binaries.
///
/// | Env Var                | Default                       |
/// |------------------------|-------------------------------|
/// | `API_BASE_URL`         | `http://localhost:5000/api`   |
/// | `SUBMIT_ENDPOINT`      | `raw`                         |
/// | `SUBMIT_INTERVAL_SECS` | `3` (bridge) / `5` (probe)    |
/// | `REQUEST_TIMEOUT_SECS` | `10`                          |
/// | `SIM_PROFILE`          | `bridge` / `probe`            |
/// | `SIM_SEED`             | unset (entropy)               |
/// | `MAX_SUBMISSIONS`      | unset (run until interrupted) |
/// | `PROBE_CONTINUOUS`     | `false`                       |
/// | `PROBE_PAUSE_SECS`     | `2`                           |
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// API root without a trailing slash.
    pub api_base_url: String,
    pub endpoint: Endpoint,
    /// Delay between consecutive submissions.
    pub interval: Duration,
    /// Upper bound on a single HTTP request.
    pub request_timeout: Duration,
    pub profile: &'static Profile,
    pub seed: Option<u64>,
    pub max_submissions: Option<u64>,
    pub probe_continuous: bool,
    /// Pause between canned payloads in the probe.
    pub probe_pause: Duration,
}

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_PROBE_PAUSE_SECS: u64 = 2;

impl AgentConfig {
    /// Load configuration from the process environment.
    pub fn from_env(role: Role) -> Result<Self, ConfigError> {
        Self::from_lookup(role, |var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(role: Role, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = match lookup("API_BASE_URL") {
            Some(raw) => parse_base_url(&raw)?,
            None => DEFAULT_API_BASE_URL.to_string(),
        };

        let endpoint = match lookup("SUBMIT_ENDPOINT") {
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "raw" => Endpoint::Raw,
                "data" => Endpoint::Data,
                _ => return Err(invalid("SUBMIT_ENDPOINT", "'raw' or 'data'", raw)),
            },
            None => Endpoint::Raw,
        };

        let interval_secs = parse_or(
            &lookup,
            "SUBMIT_INTERVAL_SECS",
            role.default_interval_secs(),
        )?;

        let timeout_secs = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(invalid(
                "REQUEST_TIMEOUT_SECS",
                "a positive integer",
                "0".to_string(),
            ));
        }

        let profile = match lookup("SIM_PROFILE") {
            Some(raw) => Profile::named(&raw)?,
            None => role.default_profile(),
        };

        let seed = parse_optional(&lookup, "SIM_SEED")?;
        let max_submissions = parse_optional(&lookup, "MAX_SUBMISSIONS")?;

        let probe_continuous = match lookup("PROBE_CONTINUOUS") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                invalid("PROBE_CONTINUOUS", "a boolean (true/false/yes/no/1/0)", raw)
            })?,
            None => false,
        };

        let probe_pause_secs = parse_or(&lookup, "PROBE_PAUSE_SECS", DEFAULT_PROBE_PAUSE_SECS)?;

        Ok(Self {
            api_base_url,
            endpoint,
            interval: Duration::from_secs(interval_secs),
            request_timeout: Duration::from_secs(timeout_secs),
            profile,
            seed,
            max_submissions,
            probe_continuous,
            probe_pause: Duration::from_secs(probe_pause_secs),
        })
    }

    /// Build the snapshot generator: seeded when `SIM_SEED` is set.
    pub fn generator(&self) -> Generator {
        match self.seed {
            Some(seed) => Generator::seeded(self.profile, seed),
            None => Generator::from_entropy(self.profile),
        }
    }
}

fn invalid(var: &'static str, expected: &'static str, value: String) -> ConfigError {
    ConfigError::Invalid {
        var,
        expected,
        value,
    }
}

fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    match reqwest::Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(trimmed.to_string()),
        _ => Err(invalid("API_BASE_URL", "an http(s) URL", raw.to_string())),
    }
}

fn parse_or<F>(lookup: &F, var: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    Ok(parse_optional(lookup, var)?.unwrap_or(default))
}

fn parse_optional<F>(lookup: &F, var: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| invalid(var, "a non-negative integer", raw)),
        None => Ok(None),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" | "" => Some(false),
        _ => None,
    }
}
