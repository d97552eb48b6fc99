//! Configuration validation.

use crate::config::{CombineConfig, Config};
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_combine_config(&config.combine)
}

/// Validate combine settings.
pub fn validate_combine_config(combine: &CombineConfig) -> Result<()> {
    if combine.files_per_group == 0 {
        return Err(Error::ConfigValidation {
            message: "files_per_group must be at least 1".to_string(),
        });
    }

    if combine.file_prefix.is_empty() {
        return Err(Error::ConfigValidation {
            message: "file_prefix must not be empty".to_string(),
        });
    }

    combine.target.validate()?;
    combine.raw_format().validate()?;

    Ok(())
}
