use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Runtime settings, read from the process environment over defaults.
///
/// `PORT`, `HOST` and `DATA_FILE` map to the fields below.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    host: IpAddr,
    port: u16,
    data_file: PathBuf,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_environment(Environment::default())
    }

    fn from_environment(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8000)?
            .set_default("data_file", "data.csv")?
            .add_source(environment)
            .build()?
            .try_deserialize()
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }
}
