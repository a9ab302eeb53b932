use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    errors::{BudgetError, Result},
    format::LocaleConfig,
    ledger::IdPolicy,
    utils::{app_data_dir, config_file_in, ensure_dir},
};

const TMP_SUFFIX: &str = "tmp";

/// Keys accepted by [`Config::set_value`].
pub const CONFIG_KEYS: &[&str] = &[
    "color",
    "show_month",
    "id_policy",
    "decimal_separator",
    "grouping_separator",
];

/// User preferences for the terminal front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub locale: LocaleConfig,
    pub id_policy: IdPolicy,
    pub color: bool,
    pub show_month: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: LocaleConfig::default(),
            id_policy: IdPolicy::default(),
            color: true,
            show_month: true,
        }
    }
}

impl Config {
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("color", self.color.to_string()),
            ("show_month", self.show_month.to_string()),
            ("id_policy", id_policy_name(self.id_policy).to_string()),
            (
                "decimal_separator",
                self.locale.decimal_separator.to_string(),
            ),
            (
                "grouping_separator",
                self.locale.grouping_separator.to_string(),
            ),
        ]
    }

    /// Applies one setting; on error the config is left untouched.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let mut next = self.clone();
        match key {
            "color" => next.color = parse_bool(key, value)?,
            "show_month" => next.show_month = parse_bool(key, value)?,
            "id_policy" => next.id_policy = parse_id_policy(value)?,
            "decimal_separator" => next.locale.decimal_separator = parse_char(key, value)?,
            "grouping_separator" => next.locale.grouping_separator = parse_char(key, value)?,
            other => {
                return Err(BudgetError::Config(format!(
                    "unknown setting `{}` (expected one of: {})",
                    other,
                    CONFIG_KEYS.join(", ")
                )))
            }
        }
        if next.locale.decimal_separator == next.locale.grouping_separator {
            return Err(BudgetError::Config(
                "decimal and grouping separators must differ".into(),
            ));
        }
        *self = next;
        Ok(())
    }
}

pub fn id_policy_name(policy: IdPolicy) -> &'static str {
    match policy {
        IdPolicy::FollowLast => "follow-last",
        IdPolicy::Monotonic => "monotonic",
    }
}

fn parse_id_policy(value: &str) -> Result<IdPolicy> {
    match value.trim().to_ascii_lowercase().as_str() {
        "follow-last" | "follow_last" => Ok(IdPolicy::FollowLast),
        "monotonic" => Ok(IdPolicy::Monotonic),
        other => Err(BudgetError::InvalidInput(format!(
            "id_policy must be `follow-last` or `monotonic`, got `{other}`"
        ))),
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        other => Err(BudgetError::InvalidInput(format!(
            "{key} expects on/off, got `{other}`"
        ))),
    }
}

fn parse_char(key: &str, value: &str) -> Result<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if !ch.is_ascii_digit() => Ok(ch),
        _ => Err(BudgetError::InvalidInput(format!(
            "{key} expects a single non-digit character, got `{value}`"
        ))),
    }
}

/// Loads and saves [`Config`] as JSON inside the data directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            debug!(path = %self.path.display(), "no config file, using defaults");
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_file(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
