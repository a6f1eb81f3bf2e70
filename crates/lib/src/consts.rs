/// Application name shown in user-facing messages.
pub const APP_NAME: &str = "taskweave";

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "weave.toml";

/// Environment variable overriding the configuration file path.
pub const CONFIG_ENV: &str = "WEAVE_CONFIG";

/// Default quiet period for coalescing file change events, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 200;
