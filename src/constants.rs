//! Global constants used throughout the themekit codebase.
//!
//! Environment variable names, default file names and tuning values shared by
//! the configuration layer and the CLI live here so they are discoverable in
//! one place.

/// Environment variable pointing at the themes configuration file.
pub const CONFIG_ENV: &str = "THEMEKIT_CONFIG";

/// Environment variable forcing debug mode on (`1`, `true`) or off (`0`, `false`).
pub const DEBUG_ENV: &str = "THEMEKIT_DEBUG";

/// Configuration file looked up in the working directory when neither
/// `--config` nor [`CONFIG_ENV`] is given.
pub const DEFAULT_CONFIG_FILE: &str = "themekit.toml";

/// Theme used by the CLI when `--theme` is omitted.
pub const DEFAULT_THEME: &str = "default";

/// Maximum number of "did you mean" suggestions shown for a missing template.
pub const MAX_SUGGESTIONS: usize = 3;

/// Largest edit distance accepted for a suggestion, as a fraction of the
/// requested name's length.
pub const SUGGESTION_DISTANCE_RATIO: f64 = 0.5;
