use std::fs::File;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Widest register the layer will accept; values are carried in a
/// u32.
pub const MAX_WIDTH: u32 = 32;

#[derive(Clone, Serialize, Deserialize)]
pub struct RegisterSetting
{
    pub name: String,
    pub client: u32,
    pub width: u32,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ReaderSetting
{
    pub name: String,
    pub owner: String,
    pub bit: u32,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct WriterSetting
{
    pub name: String,
    pub client: u32,
    pub bit: u32,
}

/// One shared input register plus its record-level consumers, as
/// configured for a single server link.
#[derive(Clone, Serialize, Deserialize)]
pub struct DeviceSettings
{
    pub register: RegisterSetting,
    #[serde(default)]
    pub readers: Vec<ReaderSetting>,
    #[serde(default)]
    pub writers: Vec<WriterSetting>,
}

impl DeviceSettings
{
    pub fn from_file(file_name: &str) -> Result<Self, ConfigError>
    {
        let file = File::open(file_name)
            .map_err(|e| ConfigError::SettingsUnreadable(format!("{}: {}", file_name, e)))?;
        let settings: DeviceSettings = serde_json::from_reader(file)
            .map_err(|e| ConfigError::SettingsInvalid(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_str(raw: &str) -> Result<Self, ConfigError>
    {
        let settings: DeviceSettings = serde_json::from_str(raw)
            .map_err(|e| ConfigError::SettingsInvalid(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError>
    {
        if self.register.width == 0 || self.register.width > MAX_WIDTH
        {
            return Err(ConfigError::BadWidth(self.register.width));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SETTINGS: &str = r#"
        {
            "register": { "name": "dio0", "client": 1, "width": 24 },
            "readers": [
                { "name": "bit0", "owner": "dio0", "bit": 0 },
                { "name": "bit2", "owner": "dio0", "bit": 2 }
            ],
            "writers": [
                { "name": "out5", "client": 2, "bit": 5 }
            ]
        }"#;

    #[test]
    pub fn parses_a_complete_settings_file()
    {
        let settings = DeviceSettings::from_str(SETTINGS).unwrap();
        assert_eq!("dio0", settings.register.name);
        assert_eq!(24, settings.register.width);
        assert_eq!(2, settings.readers.len());
        assert_eq!(1, settings.writers.len());
        assert_eq!(5, settings.writers[0].bit);
    }

    #[test]
    pub fn readers_and_writers_default_to_empty()
    {
        let settings = DeviceSettings::from_str(
            r#"{ "register": { "name": "dio0", "client": 1, "width": 16 } }"#).unwrap();
        assert!(settings.readers.is_empty());
        assert!(settings.writers.is_empty());
    }

    #[test]
    pub fn rejects_a_width_beyond_the_value_type()
    {
        let result = DeviceSettings::from_str(
            r#"{ "register": { "name": "dio0", "client": 1, "width": 48 } }"#);
        assert!(Err(ConfigError::BadWidth(48)) == result.map(|_| ()));
    }

    #[test]
    pub fn rejects_a_zero_width_register()
    {
        let result = DeviceSettings::from_str(
            r#"{ "register": { "name": "dio0", "client": 1, "width": 0 } }"#);
        assert!(result.is_err());
    }

    #[test]
    pub fn garbage_input_is_a_settings_error()
    {
        let result = DeviceSettings::from_str("not even json");
        match result
        {
            Err(ConfigError::SettingsInvalid(_)) => {}
            _ => panic!("expected a settings error"),
        }
    }

    #[test]
    pub fn missing_file_is_reported_as_unreadable()
    {
        let result = DeviceSettings::from_file("no_such_settings.json");
        match result
        {
            Err(ConfigError::SettingsUnreadable(_)) => {}
            _ => panic!("expected an unreadable error"),
        }
    }
}
