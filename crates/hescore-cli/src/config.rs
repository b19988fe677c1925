use crate::cli::TranslateArgs;
use crate::error::Result;
use hescore::core::tables::LookupTables;
use hescore::engine::config::TranslationConfig;
use tracing::{debug, info};

/// Merges the optional configuration file with command-line overrides. Flags win over
/// the file, and the file wins over built-in defaults.
pub fn resolve_config(args: &TranslateArgs) -> Result<TranslationConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading translation configuration from {:?}", path);
            TranslationConfig::load(path)?
        }
        None => TranslationConfig::default(),
    };

    if args.skip_validation {
        debug!("Overriding 'skip_validation' from the command line.");
        config.skip_validation = true;
    }
    if let Some(version) = &args.schema_version {
        debug!(version = %version, "Overriding 'schema_version' from the command line.");
        config.schema_version = version.clone();
    }
    config.validate()?;
    Ok(config)
}

pub fn resolve_tables(args: &TranslateArgs) -> Result<LookupTables> {
    Ok(match &args.tables {
        Some(dir) => {
            info!("Loading assembly tables from {:?}", dir);
            LookupTables::load(dir)?
        }
        None => LookupTables::load_default()?,
    })
}
