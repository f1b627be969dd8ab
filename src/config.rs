use std::env;
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::entities::PricingTable;
use crate::error::{invalid_config_error, Error};

pub const HOST_VAR: &str = "FARE_HOST";
pub const PORT_VAR: &str = "FARE_PORT";
pub const PRICING_FILE_VAR: &str = "FARE_PRICING_FILE";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5002;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub addr: SocketAddr,
    pub pricing_file: Option<PathBuf>,
}

impl Config {
    /// Reads configuration from the process environment, after loading a
    /// `.env` file if one is present.
    pub fn from_env() -> Result<Self, Error> {
        if let Ok(path) = dotenv::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }

        Self::from_lookup(env::var)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&'static str) -> Result<String, env::VarError>,
    {
        let host = optional(lookup(HOST_VAR))?.unwrap_or_else(|| DEFAULT_HOST.into());
        let host: IpAddr = host
            .parse()
            .map_err(|_| invalid_config_error(format!("{} is not an IP address: {}", HOST_VAR, host)))?;

        let port = match optional(lookup(PORT_VAR))? {
            Some(port) => port
                .parse()
                .map_err(|_| invalid_config_error(format!("{} is not a port: {}", PORT_VAR, port)))?,
            None => DEFAULT_PORT,
        };

        let pricing_file = optional(lookup(PRICING_FILE_VAR))?.map(PathBuf::from);

        Ok(Self {
            addr: SocketAddr::new(host, port),
            pricing_file,
        })
    }

    #[tracing::instrument(skip(self), fields(pricing_file = ?self.pricing_file))]
    pub fn pricing_table(&self) -> Result<PricingTable, Error> {
        match &self.pricing_file {
            Some(path) => {
                let raw = fs::read_to_string(path)?;
                let table = PricingTable::from_json(&raw)?;
                tracing::info!("loaded pricing table");
                Ok(table)
            }
            None => Ok(PricingTable::default()),
        }
    }
}

fn optional(value: Result<String, env::VarError>) -> Result<Option<String>, Error> {
    match value {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value.trim().to_string())),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
fn lookup_from(vars: &'static [(&'static str, &'static str)]) -> impl Fn(&'static str) -> Result<String, env::VarError> {
    move |key| {
        vars.iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.to_string())
            .ok_or(env::VarError::NotPresent)
    }
}

#[test]
fn defaults_bind_all_interfaces() {
    let config = Config::from_lookup(lookup_from(&[])).unwrap();

    assert_eq!(config.addr, "0.0.0.0:5002".parse().unwrap());
    assert_eq!(config.pricing_file, None);
    assert_eq!(config.pricing_table().unwrap(), PricingTable::default());
}

#[test]
fn reads_host_and_port() {
    let config = Config::from_lookup(lookup_from(&[
        (HOST_VAR, "127.0.0.1"),
        (PORT_VAR, " 8080 "),
        (PRICING_FILE_VAR, ""),
    ]))
    .unwrap();

    assert_eq!(config.addr, "127.0.0.1:8080".parse().unwrap());
    assert_eq!(config.pricing_file, None);
}

#[test]
fn rejects_bad_port() {
    let err = Config::from_lookup(lookup_from(&[(PORT_VAR, "http")])).unwrap_err();
    assert_eq!(err.code, 2);

    let err = Config::from_lookup(lookup_from(&[(PORT_VAR, "70000")])).unwrap_err();
    assert_eq!(err.code, 2);
}

#[test]
fn rejects_bad_host() {
    let err = Config::from_lookup(lookup_from(&[(HOST_VAR, "localhost")])).unwrap_err();
    assert_eq!(err.code, 2);
}

#[test]
fn loads_pricing_file() {
    let path = env::temp_dir().join(format!("fare-pricing-{}.json", std::process::id()));
    fs::write(
        &path,
        r#"{"fallback": "Car", "vehicles": {"Car": {"base_fare": 110, "rate_per_km": 65}}}"#,
    )
    .unwrap();

    let config = Config {
        addr: "127.0.0.1:0".parse().unwrap(),
        pricing_file: Some(path.clone()),
    };
    let table = config.pricing_table();
    fs::remove_file(&path).unwrap();

    let table = table.unwrap();
    assert_eq!(table.lookup("Bike").base_fare, 110);
}

#[test]
fn missing_pricing_file_is_io_error() {
    let config = Config {
        addr: "127.0.0.1:0".parse().unwrap(),
        pricing_file: Some(PathBuf::from("/nonexistent/fare-pricing.json")),
    };

    assert_eq!(config.pricing_table().unwrap_err().code, 3);
}
