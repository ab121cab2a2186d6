use std::path::PathBuf;

const APP_DIR: &str = "amtui";

/// `~/.local/share/amtui/`, home of the log file.
pub fn data_dir() -> PathBuf {
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join(".local")
            .join("share")
            .join(APP_DIR)
    }
    #[cfg(windows)]
    {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
}

/// `~/.config/amtui/`, home of `config.toml`.
pub fn config_dir() -> PathBuf {
    // Keep ~/.config on macOS too rather than Application Support.
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join(APP_DIR)
    }
    #[cfg(windows)]
    {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
}

pub fn log_file() -> PathBuf {
    data_dir().join("amtui.log")
}
