//! Service identity and engine settings
//!
//! Loaded with the `config` crate: an optional file first, then
//! `KPLOG_`-prefixed environment variables (`KPLOG_SERVICE_NAME`,
//! `KPLOG_HASH_SALT`, ...). Nested keys use `__` as separator.

use std::path::Path;

use kplog_core_types::Sensitive;
use serde::Deserialize;

use crate::context::CorrelationContext;
use crate::errors::Result;
use crate::logging_facility::Profile;
use crate::masking::{MaskingEngine, MaskingRule};
use crate::model::{LogRecord, LogType};

const ENV_PREFIX: &str = "KPLOG";
const DEFAULT_SERVICE_NAME: &str = "kplog";
const UNKNOWN_INSTANCE: &str = "unknown";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KpLogConfig {
    pub service_name: String,
    pub component_version: String,
    /// Host the service runs on; defaults to `$HOSTNAME`
    pub instance: String,
    pub log_profile: Profile,
    /// Rules applied to every inbound detail emission
    pub default_masking: Vec<MaskingRule>,
    pub hash_salt: Sensitive<String>,
}

impl Default for KpLogConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            component_version: env!("CARGO_PKG_VERSION").to_string(),
            instance: std::env::var("HOSTNAME").unwrap_or_else(|_| UNKNOWN_INSTANCE.to_string()),
            log_profile: Profile::default(),
            default_masking: Vec::new(),
            hash_salt: Sensitive::default(),
        }
    }
}

impl KpLogConfig {
    /// Load from an optional file and the environment
    ///
    /// A missing file is not an error; a malformed one is.
    ///
    /// # Errors
    ///
    /// Returns `Config` when a source cannot be read or does not match the
    /// expected shape.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );

        let config: KpLogConfig = builder.build()?.try_deserialize()?;
        tracing::debug!(
            service_name = config.service_name.as_str(),
            profile = ?config.log_profile,
            default_masking = config.default_masking.len() as u64,
            "Loaded configuration"
        );
        Ok(config)
    }

    pub fn masking_engine(&self) -> MaskingEngine {
        MaskingEngine::with_salt(self.hash_salt.clone())
    }

    /// Base record for a session started under `correlation`
    pub fn seed_record(&self, correlation: &CorrelationContext) -> LogRecord {
        let mut record = LogRecord::new(LogType::Detail);
        record.service_name = self.service_name.clone();
        record.component_version = self.component_version.clone();
        record.instance = self.instance.clone();
        record.metadata = Some(correlation.metadata().clone());
        record.session_id = correlation.session_id().to_string();
        record.request_id = correlation.request_id().to_string();
        record
    }
}
