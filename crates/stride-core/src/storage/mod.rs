mod settings;

pub use settings::{
    mica_supported, AppearanceSettings, Language, MainWindowSettings, Settings, ThemeMode,
    HELP_URL,
};

use std::path::PathBuf;

/// Returns `~/.config/penguin-stride[-dev]/` based on STRIDE_ENV.
///
/// Set STRIDE_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("STRIDE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("penguin-stride-dev")
    } else {
        base_dir.join("penguin-stride")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Settings file location: `STRIDE_CONFIG` if set, otherwise
/// `<data dir>/config/config.json`.
pub fn settings_path() -> std::io::Result<PathBuf> {
    if let Some(explicit) = std::env::var_os("STRIDE_CONFIG") {
        return Ok(PathBuf::from(explicit));
    }
    Ok(data_dir()?.join("config").join("config.json"))
}
