//! Session settings, changed at runtime with `set` and read with `show`.
//!
//! Each setting has a default and, for integers, inclusive bounds. Initial
//! values can be overridden through `MAZE_PATHS_<NAME>` environment variables.

use std::path::PathBuf;
use std::str::FromStr;

use log::LevelFilter;

use crate::error::{CliError, Result};

const ENV_PREFIX: &str = "MAZE_PATHS_";

/// Registered settings: name and description.
pub const SETTINGS: &[(&str, &str)] = &[
    (
        "output",
        "Where reports go: 'stdout', or a file path that reports are appended to",
    ),
    (
        "max_rows",
        "Tallest labyrinth 'maze show' prints to standard output (1..=10000)",
    ),
    (
        "max_cols",
        "Widest labyrinth 'maze show' prints to standard output (1..=10000)",
    ),
    (
        "auto_regenerate",
        "Regenerate stale shortest paths before answering a path query",
    ),
    ("format", "Report format for 'solve': text or json"),
    (
        "log_level",
        "Diagnostics written to stderr: off, error, warn, info, debug, trace",
    ),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Stdout,
    File(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub output: Output,
    pub max_rows: i64,
    pub max_cols: i64,
    pub auto_regenerate: bool,
    pub format: Format,
    pub log_level: LevelFilter,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output: Output::Stdout,
            max_rows: 80,
            max_cols: 50,
            auto_regenerate: true,
            format: Format::Text,
            log_level: LevelFilter::Warn,
        }
    }
}

impl Settings {
    /// Defaults overridden by `MAZE_PATHS_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Defaults overridden by matching `(key, value)` pairs. Invalid values
    /// are reported and skipped.
    pub fn from_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut settings = Self::default();
        for (key, value) in vars {
            let Some(name) = key.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let name = name.to_lowercase();
            if let Err(e) = settings.set(&name, &value) {
                log::warn!("ignoring {}{}: {}", ENV_PREFIX, name.to_uppercase(), e);
            }
        }
        settings
    }

    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "output" => {
                self.output = match value {
                    "" => return Err(invalid("output", value, "must not be empty")),
                    "stdout" | "-" => Output::Stdout,
                    path => Output::File(PathBuf::from(path)),
                }
            }
            "max_rows" => self.max_rows = parse_int("max_rows", value, 1, 10_000)?,
            "max_cols" => self.max_cols = parse_int("max_cols", value, 1, 10_000)?,
            "auto_regenerate" => self.auto_regenerate = parse_bool("auto_regenerate", value)?,
            "format" => {
                self.format = match value.to_lowercase().as_str() {
                    "text" => Format::Text,
                    "json" => Format::Json,
                    _ => return Err(invalid("format", value, "use 'text' or 'json'")),
                }
            }
            "log_level" => {
                self.log_level = LevelFilter::from_str(value).map_err(|_| {
                    invalid("log_level", value, "use off, error, warn, info, debug or trace")
                })?
            }
            other => return Err(CliError::UnknownSetting(other.to_string())),
        }
        Ok(())
    }

    /// Current value of a setting, rendered as text.
    pub fn show(&self, name: &str) -> Result<String> {
        let value = match name {
            "output" => match &self.output {
                Output::Stdout => "stdout".to_string(),
                Output::File(path) => path.display().to_string(),
            },
            "max_rows" => self.max_rows.to_string(),
            "max_cols" => self.max_cols.to_string(),
            "auto_regenerate" => self.auto_regenerate.to_string(),
            "format" => match self.format {
                Format::Text => "text".to_string(),
                Format::Json => "json".to_string(),
            },
            "log_level" => self.log_level.to_string().to_lowercase(),
            other => return Err(CliError::UnknownSetting(other.to_string())),
        };
        Ok(value)
    }

    /// Every setting as `name = value  -- description`.
    pub fn show_all(&self) -> String {
        let mut out = String::new();
        for (name, description) in SETTINGS {
            let value = self.show(name).unwrap_or_default();
            out.push_str(&format!("{:<16} = {:<12} -- {}\n", name, value, description));
        }
        out
    }
}

fn invalid(name: &'static str, value: &str, reason: impl Into<String>) -> CliError {
    CliError::InvalidSetting {
        name,
        value: value.to_string(),
        reason: reason.into(),
    }
}

fn parse_int(name: &'static str, value: &str, min: i64, max: i64) -> Result<i64> {
    let parsed: i64 = value
        .parse()
        .map_err(|_| invalid(name, value, "not an integer"))?;
    if parsed < min || parsed > max {
        return Err(invalid(name, value, format!("must be between {} and {}", min, max)));
    }
    Ok(parsed)
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(invalid(name, value, "use true or false")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.output, Output::Stdout);
        assert_eq!(s.max_rows, 80);
        assert_eq!(s.max_cols, 50);
        assert!(s.auto_regenerate);
        assert_eq!(s.format, Format::Text);
        assert_eq!(s.log_level, LevelFilter::Warn);
    }

    #[test]
    fn test_set_and_show() {
        let mut s = Settings::default();
        s.set("output", "Output.txt").unwrap();
        assert_eq!(s.output, Output::File(PathBuf::from("Output.txt")));
        assert_eq!(s.show("output").unwrap(), "Output.txt");

        s.set("auto_regenerate", "off").unwrap();
        assert_eq!(s.show("auto_regenerate").unwrap(), "false");

        s.set("format", "JSON").unwrap();
        assert_eq!(s.format, Format::Json);

        s.set("log_level", "debug").unwrap();
        assert_eq!(s.show("log_level").unwrap(), "debug");

        s.set("output", "stdout").unwrap();
        assert_eq!(s.output, Output::Stdout);
    }

    #[test]
    fn test_int_bounds() {
        let mut s = Settings::default();
        assert!(matches!(
            s.set("max_rows", "0"),
            Err(CliError::InvalidSetting { name: "max_rows", .. })
        ));
        assert!(s.set("max_cols", "abc").is_err());
        s.set("max_cols", "10000").unwrap();
        assert_eq!(s.max_cols, 10_000);
        assert_eq!(s.max_rows, 80);
    }

    #[test]
    fn test_unknown_setting() {
        let mut s = Settings::default();
        assert!(matches!(s.set("colour", "red"), Err(CliError::UnknownSetting(_))));
        assert!(matches!(s.show("colour"), Err(CliError::UnknownSetting(_))));
    }

    #[test]
    fn test_from_vars() {
        let s = Settings::from_vars(vec![
            ("MAZE_PATHS_MAX_ROWS".to_string(), "120".to_string()),
            ("MAZE_PATHS_FORMAT".to_string(), "json".to_string()),
            ("MAZE_PATHS_MAX_COLS".to_string(), "-5".to_string()),
            ("HOME".to_string(), "/root".to_string()),
        ]);
        assert_eq!(s.max_rows, 120);
        assert_eq!(s.format, Format::Json);
        // Invalid override keeps the default
        assert_eq!(s.max_cols, 50);
    }

    #[test]
    fn test_show_all_lists_every_setting() {
        let all = Settings::default().show_all();
        for (name, _) in SETTINGS {
            assert!(all.contains(name), "missing {}", name);
        }
    }
}
