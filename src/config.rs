use crate::error::{FlysasClientError, Result};
use log::debug;
use serde::Deserialize;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "flysas.toml";

/// Prefix for environment variable overrides, e.g. `FLYSAS_ACCOUNT__USERNAME`
pub const ENV_PREFIX: &str = "FLYSAS";

/// Configuration for the flysas client
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Remote API configuration
    pub api: ApiSettings,

    /// EuroBonus account credentials
    pub account: AccountSettings,

    /// Initial result display settings
    pub display: DisplaySettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    /// Base URL of the SAS API
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Point of sale (two-letter market code)
    pub pos: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountSettings {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplaySettings {
    /// Show the aircraft column
    pub equipment: bool,

    /// Show the booking class column next to each price
    pub fare_classes: bool,

    /// Render results as a bordered grid instead of tab stops
    pub table: bool,
}

impl ClientConfig {
    /// Load configuration from an optional TOML file with environment variable overrides
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let path = config_path.unwrap_or(DEFAULT_CONFIG_FILE);
        debug!("Loading configuration from '{}'", path);

        let settings = config::Config::builder()
            .set_default("api.base_url", "https://api.flysas.com")?
            .set_default("api.timeout", 30_i64)?
            .set_default("api.pos", "se")?
            .set_default("account.username", "")?
            .set_default("account.password", "")?
            .set_default("display.equipment", false)?
            .set_default("display.fare_classes", true)?
            .set_default("display.table", false)?
            // An explicitly named file must exist, the default one is optional
            .add_source(config::File::with_name(path).required(config_path.is_some()))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: ClientConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn base_url(&self) -> &str {
        self.api.base_url.trim_end_matches('/')
    }

    pub fn timeout(&self) -> u64 {
        self.api.timeout
    }

    /// Validate the basic configuration
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.is_empty() {
            return Err(FlysasClientError::InvalidConfigValue(
                "Base URL cannot be empty".to_string(),
            ));
        }

        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            return Err(FlysasClientError::InvalidConfigValue(format!(
                "Base URL '{}' must start with http:// or https://",
                self.api.base_url
            )));
        }

        if self.api.timeout == 0 {
            return Err(FlysasClientError::InvalidConfigValue(
                "Timeout cannot be 0".to_string(),
            ));
        }

        if self.api.pos.len() != 2 || !self.api.pos.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(FlysasClientError::InvalidConfigValue(format!(
                "Point of sale '{}' must be a two-letter market code",
                self.api.pos
            )));
        }

        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api: ApiSettings {
                base_url: "https://api.flysas.com".to_string(),
                timeout: 30,
                pos: "se".to_string(),
            },
            account: AccountSettings::default(),
            display: DisplaySettings {
                equipment: false,
                fare_classes: true,
                table: false,
            },
        }
    }
}

impl std::fmt::Display for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "flysas config - API: {}, Timeout: {}s, POS: {}, User: {}",
            self.base_url(),
            self.api.timeout,
            self.api.pos,
            if self.account.username.is_empty() {
                "<none>"
            } else {
                self.account.username.as_str()
            }
        )
    }
}

/// Settings the user can change while the session runs
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub username: String,
    pub password: String,
    pub output_equipment: bool,
    pub output_booking_class: bool,
    pub table: bool,
}

impl Options {
    /// Apply a `set <name> <value>` directive. Returns false when the line is not one.
    pub fn parse_directive(&mut self, input: &str) -> bool {
        let mut parts = input.split_whitespace();
        if !parts
            .next()
            .is_some_and(|word| word.eq_ignore_ascii_case("set"))
        {
            return false;
        }
        let (Some(name), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
            return false;
        };

        match name.to_ascii_lowercase().as_str() {
            "username" | "user" => self.username = value.to_string(),
            "password" | "pass" => self.password = value.to_string(),
            "equipment" | "equip" => match parse_flag(value) {
                Some(flag) => self.output_equipment = flag,
                None => return false,
            },
            "classes" | "class" => match parse_flag(value) {
                Some(flag) => self.output_booking_class = flag,
                None => return false,
            },
            "table" => match parse_flag(value) {
                Some(flag) => self.table = flag,
                None => return false,
            },
            _ => return false,
        }

        debug!("Option '{}' updated", name);
        true
    }

    /// Current option values plus directive usage
    pub fn help(&self) -> String {
        let password = if self.password.is_empty() {
            "<none>"
        } else {
            "********"
        };
        format!(
            "Options (change with 'set <name> <value>'):
  username    {}
  password    {}
  equipment   {}
  classes     {}
  table       {}",
            if self.username.is_empty() {
                "<none>"
            } else {
                self.username.as_str()
            },
            password,
            on_off(self.output_equipment),
            on_off(self.output_booking_class),
            on_off(self.table)
        )
    }
}

impl From<&ClientConfig> for Options {
    fn from(config: &ClientConfig) -> Self {
        Self {
            username: config.account.username.clone(),
            password: config.account.password.clone(),
            output_equipment: config.display.equipment,
            output_booking_class: config.display.fare_classes,
            table: config.display.table,
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::from(&ClientConfig::default())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.base_url(), "https://api.flysas.com");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = ClientConfig::default();
        config.api.timeout = 0;
        assert!(config.validate().is_err());

        let mut config = ClientConfig::default();
        config.api.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        let mut config = ClientConfig::default();
        config.api.pos = "swe".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[api]\ntimeout = 10\n").unwrap();
        writeln!(file, "[account]\nusername = \"EB123\"\npassword = \"secret\"\n").unwrap();
        writeln!(file, "[display]\ntable = true").unwrap();

        let config = ClientConfig::load(file.path().to_str()).unwrap();
        assert_eq!(config.api.timeout, 10);
        assert_eq!(config.account.username, "EB123");
        assert!(config.display.table);
        // Untouched keys keep their defaults
        assert_eq!(config.api.pos, "se");
        assert!(config.display.fare_classes);
    }

    #[test]
    fn test_load_env_override() {
        // No other test sets display.equipment
        unsafe { std::env::set_var("FLYSAS_DISPLAY__EQUIPMENT", "true") };
        let config = ClientConfig::load(None);
        unsafe { std::env::remove_var("FLYSAS_DISPLAY__EQUIPMENT") };

        let config = config.unwrap();
        assert!(config.display.equipment);
        assert_eq!(config.api.base_url, "https://api.flysas.com");
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let result = ClientConfig::load(Some("/nonexistent/flysas-config.toml"));
        assert!(matches!(result, Err(FlysasClientError::ConfigFileError(_))));
    }

    #[test]
    fn test_display_hides_password() {
        let mut config = ClientConfig::default();
        config.account.username = "EB123".to_string();
        config.account.password = "secret".to_string();
        let shown = config.to_string();
        assert!(shown.contains("EB123"));
        assert!(!shown.contains("secret"));
    }

    #[test]
    fn test_parse_directive() {
        let mut options = Options::default();
        assert!(options.parse_directive("set equipment on"));
        assert!(options.output_equipment);
        assert!(options.parse_directive("SET Table yes"));
        assert!(options.table);
        assert!(options.parse_directive("set classes off"));
        assert!(!options.output_booking_class);
        assert!(options.parse_directive("set username EB999"));
        assert_eq!(options.username, "EB999");
    }

    #[test]
    fn test_parse_directive_rejects_non_directives() {
        let mut options = Options::default();
        let before = options.clone();
        assert!(!options.parse_directive("cph-arn 20oct"));
        assert!(!options.parse_directive("set"));
        assert!(!options.parse_directive("set table"));
        assert!(!options.parse_directive("set table maybe"));
        assert!(!options.parse_directive("set colour on"));
        assert!(!options.parse_directive("set table on now"));
        assert_eq!(options, before);
    }

    #[test]
    fn test_help_masks_password() {
        let mut options = Options::default();
        options.password = "hunter2".to_string();
        let help = options.help();
        assert!(help.contains("********"));
        assert!(!help.contains("hunter2"));
        assert!(help.contains("table       off"));
    }
}
