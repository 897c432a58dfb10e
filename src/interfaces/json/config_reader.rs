use crate::domain::config::PaymentConfiguration;
use crate::error::{PaymentError, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Reads a [`PaymentConfiguration`] from JSON.
///
/// Keys are camelCase; missing keys keep the sample defaults. The result is
/// validated before it is returned.
pub struct ConfigReader<R: Read> {
    source: R,
}

impl<R: Read> ConfigReader<R> {
    /// Creates a new `ConfigReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        Self { source }
    }

    pub fn read(self) -> Result<PaymentConfiguration> {
        let config: PaymentConfiguration = serde_json::from_reader(self.source)
            .map_err(|e| PaymentError::Configuration(format!("unreadable configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

/// Loads and validates the configuration stored at `path`.
pub fn load(path: &Path) -> Result<PaymentConfiguration> {
    let file = File::open(path)?;
    ConfigReader::new(BufReader::new(file)).read()
}
