use anyhow::Context;
use std::{
    env,
    net::{Ipv4Addr, SocketAddr},
    str::FromStr,
    time::Duration,
};

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_ACCESS_TOKEN_LIFETIME: Duration = Duration::from_secs(5 * 60);
const DEFAULT_REFRESH_TOKEN_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

/// Runtime settings, read once at start-up.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub listen_addr: SocketAddr,
    pub access_token_lifetime: Duration,
    pub refresh_token_lifetime: Duration,
    pub hashing: HashingCost,
}

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingCost {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashingCost {
    fn default() -> Self {
        Self {
            memory_kib: 19456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl HashingCost {
    /// The cheapest parameters argon2 accepts. Only meant for tests.
    pub const fn minimal() -> Self {
        Self {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        }
    }
}

impl Config {
    pub fn new(database_url: impl Into<String>, jwt_secret: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            jwt_secret: jwt_secret.into(),
            listen_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            access_token_lifetime: DEFAULT_ACCESS_TOKEN_LIFETIME,
            refresh_token_lifetime: DEFAULT_REFRESH_TOKEN_LIFETIME,
            hashing: HashingCost::default(),
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::new(required("DATABASE_URL")?, required("JWT_SECRET")?);

        if let Some(addr) = optional("LISTEN_ADDR")? {
            config.listen_addr = addr;
        }

        if let Some(secs) = optional("ACCESS_TOKEN_LIFETIME")? {
            config.access_token_lifetime = Duration::from_secs(secs);
        }

        if let Some(secs) = optional("REFRESH_TOKEN_LIFETIME")? {
            config.refresh_token_lifetime = Duration::from_secs(secs);
        }

        if let Some(memory_kib) = optional("ARGON2_MEMORY_KIB")? {
            config.hashing.memory_kib = memory_kib;
        }

        if let Some(iterations) = optional("ARGON2_ITERATIONS")? {
            config.hashing.iterations = iterations;
        }

        if let Some(parallelism) = optional("ARGON2_PARALLELISM")? {
            config.hashing.parallelism = parallelism;
        }

        Ok(config)
    }
}

fn required(name: &str) -> anyhow::Result<String> {
    env::var(name)
        .inspect_err(|_| error!("{name} is not set"))
        .with_context(|| format!("{name} is not set"))
}

fn optional<T>(name: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("invalid value for {name}: {value:?}")),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(error) => Err(error).with_context(|| format!("invalid value for {name}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::new("sqlite::memory:", "secret");

        assert_eq!(config.listen_addr.port(), 8000);
        assert_eq!(config.access_token_lifetime, Duration::from_secs(300));
        assert_eq!(config.refresh_token_lifetime, Duration::from_secs(86400));
        assert_eq!(config.hashing, HashingCost::default());
    }

    #[test]
    fn optional_values_are_parsed() {
        env::set_var("CRICKET_TEST_LIFETIME_OK", " 42 ");
        env::set_var("CRICKET_TEST_LIFETIME_BAD", "forty-two");

        assert_eq!(optional::<u64>("CRICKET_TEST_LIFETIME_OK").unwrap(), Some(42));
        assert_eq!(optional::<u64>("CRICKET_TEST_LIFETIME_UNSET").unwrap(), None);

        let error = optional::<u64>("CRICKET_TEST_LIFETIME_BAD").unwrap_err();
        assert!(error.to_string().contains("CRICKET_TEST_LIFETIME_BAD"));
    }
}
