//! # Output Rendering
//!
//! This module renders discovery results for display or for transmission to
//! another process, and controls the appearance of human-facing status lines.
//!
//! ## Result formats
//!
//! `render` turns `DirectoryGroups` into a mapping of identifier to a list of
//! paths, in YAML (the default, and what remote callers parse) or JSON:
//!
//! ```yaml
//! 11111111-1111-4111-8111-111111111111:
//! - /home/u/project-a
//! - /mnt/backup/project-a
//! ```
//!
//! ## Respecting User Preferences
//!
//! Status lines go to stderr and honour:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals

use std::env;

use clap::ValueEnum;

use crate::error::Result;
use crate::group::DirectoryGroups;

/// Serialization format for discovery results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// YAML mapping of identifier to paths
    #[default]
    Yaml,
    /// JSON object of identifier to paths
    Json,
}

/// Renders `groups` in `format`.
///
/// An empty result renders as an empty mapping (`{}`), never as nothing, so
/// that a caller parsing the output can tell "no groups" from "no output".
pub fn render(groups: &DirectoryGroups, format: OutputFormat) -> Result<String> {
    let text = match format {
        OutputFormat::Yaml => serde_yaml::to_string(groups)?,
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(groups)?;
            json.push('\n');
            json
        }
    };
    Ok(text)
}

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// # Arguments
    /// * `color_flag` - The value of the --color CLI flag: "always", "never", or "auto"
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    /// Detect whether color output is supported based on environment.
    fn detect_color_support() -> bool {
        // The presence of the variable (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        // Status lines are written to stderr
        console::Term::stderr().features().colors_supported()
    }

    /// Create a configuration with colors always enabled.
    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Create a configuration with colors always disabled.
    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Returns the emoji when colors are enabled, the plain text otherwise.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::path::PathBuf;
    use uuid::Uuid;

    const ID: &str = "11111111-1111-4111-8111-111111111111";

    fn sample() -> DirectoryGroups {
        let id = Uuid::parse_str(ID).unwrap();
        vec![
            (id, PathBuf::from("/mnt/backup/project-a")),
            (id, PathBuf::from("/home/u/project-a")),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_render_yaml() {
        let yaml = render(&sample(), OutputFormat::Yaml).unwrap();
        assert_eq!(
            yaml,
            format!("{}:\n- /home/u/project-a\n- /mnt/backup/project-a\n", ID)
        );
    }

    #[test]
    fn test_render_json() {
        let json = render(&sample(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value[ID],
            serde_json::json!(["/home/u/project-a", "/mnt/backup/project-a"])
        );
    }

    #[test]
    fn test_render_empty() {
        let empty = DirectoryGroups::new();
        assert_eq!(render(&empty, OutputFormat::Yaml).unwrap(), "{}\n");
        assert_eq!(render(&empty, OutputFormat::Json).unwrap(), "{}\n");
    }

    #[test]
    fn test_yaml_output_parses_back_as_mapping() {
        let yaml = render(&sample(), OutputFormat::Yaml).unwrap();
        let parsed: std::collections::BTreeMap<String, Vec<String>> =
            serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed[ID].len(), 2);
    }

    #[test]
    fn test_color_always() {
        let config = OutputConfig::from_env_and_flag("always");
        assert!(config.use_color);
    }

    #[test]
    fn test_color_never() {
        let config = OutputConfig::from_env_and_flag("never");
        assert!(!config.use_color);
    }

    #[test]
    #[serial]
    fn test_no_color_env_disables_auto() {
        env::set_var("NO_COLOR", "1");
        let config = OutputConfig::from_env_and_flag("auto");
        env::remove_var("NO_COLOR");
        assert!(!config.use_color);
    }

    #[test]
    fn test_emoji_helper() {
        assert_eq!(emoji(&OutputConfig::with_color(), "✅", "[OK]"), "✅");
        assert_eq!(emoji(&OutputConfig::without_color(), "✅", "[OK]"), "[OK]");
    }
}
