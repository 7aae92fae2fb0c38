//! Mask command
//!
//! Usage: kplog mask <TYPE> <VALUE> [--salt <SALT>]

use clap::Args;
use kplog_core::masking::{MaskingEngine, MaskingService, MaskingType};
use kplog_core::schema;
use kplog_core::KpLogConfig;

#[derive(Debug, Args)]
pub struct MaskArgs {
    /// Masking type: full, partial, email or hash
    pub masking_type: MaskingType,

    /// Value to mask
    pub value: String,

    /// Salt for `hash`; defaults to the configured salt
    #[arg(long)]
    pub salt: Option<String>,
}

/// Execute mask command
pub fn execute(args: MaskArgs, config: &KpLogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let engine = match args.salt {
        Some(salt) => MaskingEngine::with_salt(salt.into()),
        None => config.masking_engine(),
    };
    tracing::debug!(
        op = "mask",
        event = schema::EVENT_START,
        masking_type = %args.masking_type
    );
    println!("{}", engine.mask(&args.value, args.masking_type));
    Ok(())
}
