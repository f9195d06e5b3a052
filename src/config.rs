use anyhow::{Context, Result};
use boutique_events_core::ics::{DEFAULT_PRODID, DEFAULT_UID_DOMAIN};
use boutique_events_core::listing::DEFAULT_FEATURED_LIMIT;
use boutique_events_core::source::DEFAULT_SOURCE;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_ICS_FILENAME: &str = "cedar-oak-events.ics";
pub const DEFAULT_BACKUP_FILENAME: &str = "events-backup.json";

/// Settings from ~/.config/boutique-events/config.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Events document: a path or an http(s) URL
    pub source: String,

    /// IANA timezone the events' times are written in
    pub timezone: String,

    pub uid_domain: String,
    pub prodid: String,

    /// Number of events in the homepage preview
    pub featured_limit: usize,

    /// Combine the category filter and the search term (AND) instead of letting
    /// the latest one decide
    pub compose_filters: bool,

    pub ics_filename: String,
    pub backup_filename: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source: DEFAULT_SOURCE.to_string(),
            timezone: "UTC".to_string(),
            uid_domain: DEFAULT_UID_DOMAIN.to_string(),
            prodid: DEFAULT_PRODID.to_string(),
            featured_limit: DEFAULT_FEATURED_LIMIT,
            compose_filters: false,
            ics_filename: DEFAULT_ICS_FILENAME.to_string(),
            backup_filename: DEFAULT_BACKUP_FILENAME.to_string(),
        }
    }
}

impl Config {
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| anyhow::anyhow!("Invalid timezone '{}': {}", self.timezone, e))
    }
}

/// Get the config file path (~/.config/boutique-events/config.toml)
pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Could not determine config directory")?
        .join("boutique-events");
    Ok(config_dir.join("config.toml"))
}

/// Load config from the given path, or the default location.
///
/// A missing file means defaults; a file that exists must parse.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };

    if !path.exists() {
        tracing::debug!(path = %path.display(), "No config file, using defaults");
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

    // Surface a bad timezone now rather than halfway through an export
    config
        .tz()
        .with_context(|| format!("Invalid config file at {}", path.display()))?;

    Ok(config)
}

/// Create a config file with every option commented out.
pub fn create_default_config(path: &Path) -> Result<()> {
    let defaults = Config::default();
    let contents = format!(
        "\
# boutique-events configuration

# Events document (path or http(s) URL):
# source = \"{}\"

# Timezone the event times are written in:
# timezone = \"{}\"

# iCal export settings:
# uid_domain = \"{}\"
# prodid = \"{}\"
# ics_filename = \"{}\"

# JSON backup file name:
# backup_filename = \"{}\"

# Events shown in the homepage preview:
# featured_limit = {}

# Apply category filter and search together:
# compose_filters = false
",
        defaults.source,
        defaults.timezone,
        defaults.uid_domain,
        defaults.prodid,
        defaults.ics_filename,
        defaults.backup_filename,
        defaults.featured_limit,
    );

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory at {}", parent.display()))?;
    }

    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write config file at {}", path.display()))?;

    Ok(())
}
