use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;

/// Base utilkit config directory (~/.config/utilkit/ on Unix, %APPDATA%\utilkit on Windows)
pub fn utilkit() -> Result<PathBuf> {
    #[cfg(windows)]
    {
        let appdata = env::var("APPDATA").map_err(|_| {
            Error::internal_unexpected(
                "APPDATA environment variable not set on Windows".to_string(),
            )
        })?;
        Ok(PathBuf::from(appdata).join("utilkit"))
    }

    #[cfg(not(windows))]
    {
        let home = env::var("HOME").map_err(|_| {
            Error::internal_unexpected(
                "HOME environment variable not set on Unix-like system".to_string(),
            )
        })?;
        Ok(PathBuf::from(home).join(".config").join("utilkit"))
    }
}

/// Global utilkit.json config file path
pub fn utilkit_json() -> Result<PathBuf> {
    Ok(utilkit()?.join("utilkit.json"))
}
