use clap::Subcommand;
use stride_core::storage::{self, Settings};
use stride_core::ConfigError;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a setting (e.g. "MainWindow.Language", "Appearance.ThemeColor")
    Get {
        /// Dot-separated key
        key: String,
    },
    /// Change a setting
    Set {
        /// Dot-separated key
        key: String,
        /// New value
        value: String,
    },
    /// List all settings
    List {
        /// Print the settings file as JSON
        #[arg(long)]
        json: bool,
    },
    /// Reset settings to defaults
    Reset,
    /// Print the settings file location
    Path,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let path = storage::settings_path()?;
    match action {
        ConfigAction::Get { key } => {
            let settings = Settings::load_from(&path)?;
            let value = settings.get(&key).ok_or(ConfigError::UnknownKey(key))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut settings = Settings::load_from(&path)?;
            let requires_restart = settings.set(&key, &value)?;
            settings.save_to(&path)?;
            if requires_restart {
                println!("ok (takes effect after restart)");
            } else {
                println!("ok");
            }
        }
        ConfigAction::List { json } => {
            let settings = Settings::load_from(&path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&settings)?);
            } else {
                for (key, value) in settings.entries() {
                    println!("{key} = {value}");
                }
            }
        }
        ConfigAction::Reset => {
            Settings::default().save_to(&path)?;
            println!("settings reset to defaults");
        }
        ConfigAction::Path => println!("{}", path.display()),
    }
    Ok(())
}
