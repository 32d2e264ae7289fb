mod config;

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

use crate::config::AcervoConfig;
use acervo_core::{AcervoError, AcervoResult};

pub use config::{
    AcervoConfig as AcervoConfigData, DEFAULT_USER_AGENT, HttpConfig, InterpretationConfig,
    OutputConfig,
};

pub fn config_path() -> AcervoResult<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| AcervoError::Config("home directory not found".to_string()))?;
    Ok(home.join(".acervo").join("config.toml"))
}

pub fn load_config() -> AcervoResult<AcervoConfig> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(AcervoConfig::default());
    }
    let content = fs::read_to_string(&path)
        .map_err(|err| AcervoError::Config(format!("failed to read config: {err}")))?;
    let config = toml::from_str(&content)
        .map_err(|err| AcervoError::Config(format!("failed to parse config: {err}")))?;
    Ok(config)
}

pub fn save_config(config: &AcervoConfig) -> AcervoResult<()> {
    let path = config_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| AcervoError::Config(format!("failed to create config dir: {err}")))?;
    }
    let content = toml::to_string_pretty(config)
        .map_err(|err| AcervoError::Config(format!("failed to serialize config: {err}")))?;
    fs::write(&path, content)
        .map_err(|err| AcervoError::Config(format!("failed to write config: {err}")))?;
    Ok(())
}

fn non_blank_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

pub fn resolve_user_agent(config: &AcervoConfig) -> String {
    non_blank_env("ACERVO_USER_AGENT")
        .or_else(|| config.http.user_agent.clone())
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string())
}

pub fn resolve_timeout(config: &AcervoConfig) -> Option<Duration> {
    config.http.timeout_secs.map(Duration::from_secs)
}

pub fn resolve_json_output(config: &AcervoConfig) -> Option<bool> {
    non_blank_env("ACERVO_OUTPUT_JSON")
        .map(|value| parse_flag(&value))
        .or(config.output.json)
}

pub fn resolve_interpretation_key(config: &AcervoConfig) -> Option<String> {
    non_blank_env("ACERVO_INTERPRETATION_KEY").or_else(|| {
        config
            .interpretation
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
    })
}

/// Whether the given configuration carries a usable interpretation key.
/// Reads nothing but the value passed in.
pub fn has_interpretation_key(config: &AcervoConfig) -> bool {
    config
        .interpretation
        .api_key
        .as_deref()
        .is_some_and(|key| !key.trim().is_empty())
}

fn parse_flag(value: &str) -> bool {
    let normalized = value.trim().to_lowercase();
    normalized == "1" || normalized == "true" || normalized == "yes"
}

fn parse_value(value: &str) -> toml_edit::Item {
    if let Ok(number) = value.parse::<i64>() {
        return toml_edit::value(number);
    }
    match value {
        "true" => toml_edit::value(true),
        "false" => toml_edit::value(false),
        _ => toml_edit::value(value),
    }
}

pub fn set_config_value(key_path: &str, value: &str) -> AcervoResult<()> {
    let path = config_path()?;
    let content = if path.exists() {
        fs::read_to_string(&path)
            .map_err(|err| AcervoError::Config(format!("failed to read config: {err}")))?
    } else {
        String::new()
    };

    let content = apply_config_value(&content, key_path, value)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| AcervoError::Config(format!("failed to create config dir: {err}")))?;
    }
    fs::write(&path, content)
        .map_err(|err| AcervoError::Config(format!("failed to write config: {err}")))?;

    Ok(())
}

fn apply_config_value(content: &str, key_path: &str, value: &str) -> AcervoResult<String> {
    let mut doc = content
        .parse::<toml_edit::DocumentMut>()
        .unwrap_or_default();

    let parts: Vec<&str> = key_path.split('.').collect();
    let Some((last_part, sections)) = parts.split_last().filter(|(_, rest)| !rest.is_empty())
    else {
        return Err(AcervoError::Config(
            "key path must have at least 2 parts (e.g., 'http.user_agent')".to_string(),
        ));
    };

    let mut current = doc.as_table_mut();
    for part in sections {
        current = current
            .entry(part)
            .or_insert(toml_edit::Item::Table(Default::default()))
            .as_table_mut()
            .ok_or_else(|| {
                AcervoError::Config(format!("cannot set nested value in '{}'", key_path))
            })?;
    }

    current[*last_part] = parse_value(value);
    Ok(doc.to_string())
}

pub fn open_in_editor() -> AcervoResult<()> {
    let path = config_path()?;
    if !path.exists() {
        save_config(&AcervoConfig::default())?;
    }

    let editor = env::var("EDITOR")
        .or_else(|_| env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    let status = Command::new(&editor).arg(&path).status().map_err(|err| {
        AcervoError::Config(format!("failed to open editor '{}': {}", editor, err))
    })?;

    if !status.success() {
        return Err(AcervoError::Config(format!(
            "editor exited with status: {}",
            status
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpretation_key_check_ignores_blank_values() {
        let mut config = AcervoConfig::default();
        assert!(!has_interpretation_key(&config));

        config.interpretation.api_key = Some("   ".to_string());
        assert!(!has_interpretation_key(&config));

        config.interpretation.api_key = Some("sk-test".to_string());
        assert!(has_interpretation_key(&config));
    }

    // Single test so the process-wide environment is not mutated concurrently.
    #[test]
    fn environment_overrides_file_values() {
        const VARS: [&str; 3] = [
            "ACERVO_USER_AGENT",
            "ACERVO_OUTPUT_JSON",
            "ACERVO_INTERPRETATION_KEY",
        ];
        let clear = || {
            for name in VARS {
                unsafe { env::remove_var(name) };
            }
        };

        let mut config = AcervoConfig::default();
        clear();
        assert_eq!(resolve_user_agent(&config), DEFAULT_USER_AGENT);
        assert_eq!(resolve_json_output(&config), None);
        assert_eq!(resolve_interpretation_key(&config), None);

        config.http.user_agent = Some("file-agent/1.0".to_string());
        config.output.json = Some(false);
        config.interpretation.api_key = Some("file-key".to_string());

        unsafe {
            env::set_var("ACERVO_USER_AGENT", "env-agent/2.0");
            env::set_var("ACERVO_OUTPUT_JSON", "yes");
            env::set_var("ACERVO_INTERPRETATION_KEY", "env-key");
        }
        assert_eq!(resolve_user_agent(&config), "env-agent/2.0");
        assert_eq!(resolve_json_output(&config), Some(true));
        assert_eq!(resolve_interpretation_key(&config).as_deref(), Some("env-key"));

        for name in VARS {
            unsafe { env::set_var(name, "  ") };
        }
        assert_eq!(resolve_user_agent(&config), "file-agent/1.0");
        assert_eq!(resolve_json_output(&config), Some(false));
        assert_eq!(resolve_interpretation_key(&config).as_deref(), Some("file-key"));

        clear();
    }

    #[test]
    fn timeout_is_unset_by_default() {
        assert_eq!(resolve_timeout(&AcervoConfig::default()), None);

        let mut config = AcervoConfig::default();
        config.http.timeout_secs = Some(3);
        assert_eq!(resolve_timeout(&config), Some(Duration::from_secs(3)));
    }

    #[test]
    fn parse_flag_accepts_common_truthy_values() {
        assert!(parse_flag("1"));
        assert!(parse_flag("TRUE"));
        assert!(parse_flag("yes"));
        assert!(!parse_flag("no"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn apply_config_value_types_numbers_and_booleans() {
        let content = apply_config_value("", "http.timeout_secs", "15").unwrap();
        let content = apply_config_value(&content, "output.json", "true").unwrap();
        let content = apply_config_value(&content, "http.user_agent", "acervo/0.1").unwrap();

        let config: AcervoConfig = toml::from_str(&content).unwrap();
        assert_eq!(config.http.timeout_secs, Some(15));
        assert_eq!(config.output.json, Some(true));
        assert_eq!(config.http.user_agent.as_deref(), Some("acervo/0.1"));
    }

    #[test]
    fn apply_config_value_preserves_existing_entries() {
        let original = "# acervo settings\n[output]\njson = false\n";
        let content = apply_config_value(original, "interpretation.api_key", "k").unwrap();
        assert!(content.starts_with("# acervo settings"));
        assert!(content.contains("json = false"));
        assert!(content.contains("api_key = \"k\""));
    }

    #[test]
    fn apply_config_value_rejects_single_part_keys() {
        let result = apply_config_value("", "timeout", "5");
        assert!(matches!(result, Err(AcervoError::Config(_))));
    }
}
