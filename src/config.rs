//! Service configuration, read from environment variables.
//!
//! - `HOST`: bind address, defaults to `0.0.0.0`
//! - `PORT`: bind port, defaults to `8080`
//! - `LEDGER_SEED`: initial accounts as `id=amount,id=amount`, defaults to
//!   `1=100.00,2=50.00,3=0.00`

use std::collections::HashSet;
use std::env;
use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

use crate::Amount;
use crate::amount::AmountError;
use crate::model::UserId;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_SEED: &str = "1=100.00,2=50.00,3=0.00";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid HOST '{0}'")]
    InvalidHost(String),

    #[error("invalid PORT '{0}'")]
    InvalidPort(String),

    #[error("seed entry '{0}' is not of the form id=amount")]
    MalformedSeedEntry(String),

    #[error("seed entry '{0}': user id must be a positive integer")]
    InvalidSeedUser(String),

    #[error("seed entry '{entry}': {source}")]
    InvalidSeedBalance { entry: String, source: AmountError },

    #[error("user {0} is seeded more than once")]
    DuplicateSeedUser(UserId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub addr: SocketAddr,
    pub seed: Vec<(UserId, Amount)>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let host = host.parse::<IpAddr>().map_err(|_| ConfigError::InvalidHost(host))?;

        let port = match lookup("PORT") {
            Some(port) => port.parse::<u16>().map_err(|_| ConfigError::InvalidPort(port))?,
            None => DEFAULT_PORT,
        };

        let seed = match lookup("LEDGER_SEED") {
            Some(seed) => parse_seed(&seed)?,
            None => parse_seed(DEFAULT_SEED)?,
        };

        Ok(Self {
            addr: SocketAddr::new(host, port),
            seed,
        })
    }
}

/// The seed the service starts with when none is configured.
pub fn default_seed() -> Vec<(UserId, Amount)> {
    vec![
        (1, Amount::from_scaled(10_000)),
        (2, Amount::from_scaled(5_000)),
        (3, Amount::ZERO),
    ]
}

/// Parse `id=amount` pairs separated by commas. Whitespace around entries is
/// ignored; empty entries are skipped.
pub fn parse_seed(raw: &str) -> Result<Vec<(UserId, Amount)>, ConfigError> {
    let mut seen = HashSet::new();
    let mut seed = Vec::new();

    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (user, balance) = entry
            .split_once('=')
            .ok_or_else(|| ConfigError::MalformedSeedEntry(entry.to_string()))?;

        let user = match user.trim().parse::<UserId>() {
            Ok(user) if user >= 1 => user,
            _ => return Err(ConfigError::InvalidSeedUser(entry.to_string())),
        };
        let balance = balance
            .trim()
            .parse::<Amount>()
            .map_err(|source| ConfigError::InvalidSeedBalance {
                entry: entry.to_string(),
                source,
            })?;

        if !seen.insert(user) {
            return Err(ConfigError::DuplicateSeedUser(user));
        }
        seed.push((user, balance));
    }

    Ok(seed)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.addr.to_string(), "0.0.0.0:8080");
        assert_eq!(config.seed, default_seed());
    }

    #[test]
    fn default_seed_matches_text_form() {
        assert_eq!(parse_seed(DEFAULT_SEED).unwrap(), default_seed());
    }

    #[test]
    fn host_and_port_overrides() {
        let config = Config::from_lookup(lookup(&[("HOST", "127.0.0.1"), ("PORT", "3000")])).unwrap();
        assert_eq!(config.addr.to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn invalid_port() {
        let result = Config::from_lookup(lookup(&[("PORT", "http")]));
        assert!(matches!(result, Err(ConfigError::InvalidPort(p)) if p == "http"));

        let result = Config::from_lookup(lookup(&[("PORT", "70000")]));
        assert!(matches!(result, Err(ConfigError::InvalidPort(_))));
    }

    #[test]
    fn invalid_host() {
        let result = Config::from_lookup(lookup(&[("HOST", "not a host")]));
        assert!(matches!(result, Err(ConfigError::InvalidHost(_))));
    }

    #[test]
    fn custom_seed() {
        let config = Config::from_lookup(lookup(&[("LEDGER_SEED", " 7 = 1.5 , 9=0 ,")])).unwrap();
        assert_eq!(
            config.seed,
            vec![(7, Amount::from_scaled(150)), (9, Amount::ZERO)]
        );
    }

    #[test]
    fn seed_errors() {
        assert!(matches!(
            parse_seed("1:100"),
            Err(ConfigError::MalformedSeedEntry(_))
        ));
        assert!(matches!(
            parse_seed("0=100"),
            Err(ConfigError::InvalidSeedUser(_))
        ));
        assert!(matches!(
            parse_seed("1=-100"),
            Err(ConfigError::InvalidSeedBalance { .. })
        ));
        assert!(matches!(
            parse_seed("1=1.234"),
            Err(ConfigError::InvalidSeedBalance {
                source: AmountError::TooPrecise(_),
                ..
            })
        ));
        assert!(matches!(
            parse_seed("1=1,1=2"),
            Err(ConfigError::DuplicateSeedUser(1))
        ));
    }
}
