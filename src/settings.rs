//! Table column names and default paths.
//!
//! The built-in values live in `default_settings.toml` next to this file.
//! A binary may swap in its own TOML with [`init_custom`], but only before
//! anything has read [`settings`]; the first read fixes the values for the
//! rest of the process.

use std::sync::OnceLock;

use serde::Deserialize;

const EMBEDDED_TOML: &str = include_str!("default_settings.toml");

static OVERRIDE: OnceLock<String> = OnceLock::new();

/// Install `toml_content` in place of the built-in values.
///
/// The content is validated first. Fails if an override was already set.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    OVERRIDE
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

pub fn settings() -> &'static Settings {
    static LOADED: OnceLock<Settings> = OnceLock::new();
    LOADED.get_or_init(|| {
        let source = OVERRIDE.get().map_or(EMBEDDED_TOML, String::as_str);
        // The override was validated in `init_custom`.
        parse_settings_toml(source).expect("validated settings TOML")
    })
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub table: TableSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableSettings {
    pub input_column: String,
    pub output_column: String,
    pub default_input: String,
    pub default_output: String,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_non_empty {
        ($section:ident . $field:ident) => {
            if s.$section.$field.trim().is_empty() {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        };
    }

    check_non_empty!(table.input_column);
    check_non_empty!(table.output_column);
    check_non_empty!(table.default_input);
    check_non_empty!(table.default_output);

    if s.table.input_column == s.table.output_column {
        return Err(SettingsError::InvalidValue {
            field: "table.output_column".to_string(),
            reason: "must differ from table.input_column".to_string(),
        });
    }

    Ok(())
}
