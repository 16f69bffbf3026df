use std::error::Error;
use std::fs::File;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Connection configuration: where the device listens, where its replies
/// arrive, and how long a query waits for one.
///
/// Defaults match the conventional TotalMix ports: the device listens on
/// 50000 and sends replies to 50001 on this host.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub send_port: u16,
    pub recv_port: u16,
    pub timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "127.0.0.1".to_string(),
            send_port: 50000,
            recv_port: 50001,
            timeout_ms: 1000,
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Config, Box<dyn Error>> {
        let file = File::open(path)?;
        let config = serde_yaml::from_reader(file)?;
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
