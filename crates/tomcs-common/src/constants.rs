//! System-wide constants and default paths.

use std::path::PathBuf;
use std::sync::OnceLock;

/// Application name used in CLI output and log files.
pub const APP_NAME: &str = "tomcs";

/// Project configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "tomcs.json";

/// Log file written while the designer owns the terminal.
pub const LOG_FILE: &str = "tomcs.log";

/// Period between two executions of the same command binding.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;

/// Number of rows the component picker shows at once.
pub const DEFAULT_PICKER_WINDOW: usize = 8;

/// Output width, in character columns, used when converting images.
pub const DEFAULT_IMAGE_WIDTH: u32 = 40;

/// Column where a freshly mounted canvas places its tracked element.
pub const DEFAULT_POSITION_X: u16 = 10;

/// Row where a freshly mounted canvas places its tracked element.
pub const DEFAULT_POSITION_Y: u16 = 5;

/// Component names offered by the library picker.
pub const DEFAULT_REGISTRY: &[&str] = &[
    "button", "card", "list", "tabs", "badge", "shell", "table", "input", "progress",
];

/// Returns the data directory, preferring `$HOME/.tomcs` and falling back
/// to the system temp directory.
fn resolve_data_dir() -> PathBuf {
    if let Ok(home) = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE")) {
        let user_dir = PathBuf::from(home).join(".tomcs");
        if std::fs::create_dir_all(&user_dir).is_ok() {
            return user_dir;
        }
    }
    std::env::temp_dir().join(APP_NAME)
}

static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Returns the resolved data directory for this session.
pub fn data_dir() -> &'static PathBuf {
    DATA_DIR.get_or_init(resolve_data_dir)
}

/// Returns the default log file path.
pub fn default_log_file() -> PathBuf {
    data_dir().join(LOG_FILE)
}
