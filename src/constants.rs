//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default backend base URL
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// Submit-answer endpoint, relative to the base URL
pub const ANSWER_PATH: &str = "/api/juego/answer";

/// Game history endpoint, relative to the base URL
pub const HISTORY_PATH: &str = "/api/juego/historial";

/// Directory (under the home directory) holding config and token
pub const CONFIG_DIR_NAME: &str = ".quiz-tui";

/// Config file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Bearer token file name inside the config directory
pub const TOKEN_FILE_NAME: &str = "token";

/// Default log file, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "quiz-tui.log";

/// HTTP client timeout in seconds
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Application name
pub const APP_NAME: &str = "Quiz TUI";
