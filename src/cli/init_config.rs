use super::config::EmtpConfig;
use std::path::Path;

/// Write the commented default config file
pub fn execute(config_path: &Path, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    EmtpConfig::create_default(config_path, force)?;
    println!("Created: {}", config_path.display());
    Ok(())
}
