//! User configuration at ~/.config/farmcal/config.toml

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::builder::{DEFAULT_SUNRISE_HOUR, DEFAULT_SUNSET_HOUR, DaylightHours};
use crate::error::{CalendarError, CalendarResult};
use crate::granularity::Granularity;

fn default_sunrise_hour() -> u32 {
    DEFAULT_SUNRISE_HOUR
}

fn default_sunset_hour() -> u32 {
    DEFAULT_SUNSET_HOUR
}

/// Settings for the calendar views and where events come from.
///
/// Every field is optional in the file; missing fields fall back to the
/// defaults below.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CalendarConfig {
    #[serde(default = "default_sunrise_hour")]
    pub sunrise_hour: u32,

    #[serde(default = "default_sunset_hour")]
    pub sunset_hour: u32,

    #[serde(default)]
    pub default_view: Granularity,

    /// JSON file holding an array of events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events_file: Option<PathBuf>,

    /// Backend endpoint returning events as JSON.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events_url: Option<String>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        CalendarConfig {
            sunrise_hour: DEFAULT_SUNRISE_HOUR,
            sunset_hour: DEFAULT_SUNSET_HOUR,
            default_view: Granularity::default(),
            events_file: None,
            events_url: None,
        }
    }
}

impl CalendarConfig {
    pub fn config_path() -> CalendarResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalendarError::Config("Could not determine config directory".into()))?
            .join("farmcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, or defaults if no file exists.
    pub fn load() -> CalendarResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> CalendarResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> CalendarResult<Self> {
        toml::from_str(contents)
            .map_err(|e| CalendarError::Config(format!("Could not parse config file: {e}")))
    }

    pub fn daylight(&self) -> CalendarResult<DaylightHours> {
        DaylightHours::new(self.sunrise_hour, self.sunset_hour)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalendarResult<()> {
        let contents = format!(
            "\
# farmcal configuration

# Hours shaded as daylight in the day view (0-23, inclusive):
# sunrise_hour = {}
# sunset_hour = {}

# View shown when none is given (day, week, month or year):
# default_view = \"{}\"

# Where events come from. A JSON file with an array of events:
# events_file = \"~/farm/events.json\"
# or the farm backend's events endpoint:
# events_url = \"http://homeassistant.local:8000/api/calendar/events\"
",
            DEFAULT_SUNRISE_HOUR,
            DEFAULT_SUNSET_HOUR,
            Granularity::default()
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalendarError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalendarError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
