//! Persisted user settings (§6, §10.3): a flat key-value schema with no
//! migration logic. The storage backend itself (file, keychain, ...) is out
//! of scope; only the in-memory schema and its validation live here.

use serde::{Deserialize, Serialize};
use snafu::Snafu;
use std::collections::HashMap;

/// Configuration errors (§7): missing callsign, unsupported model, invalid baud.
#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum ConfigError {
    #[snafu(display("callsign is required"))]
    MissingCallsign,

    #[snafu(display("grid '{grid}' is not a 4-character Maidenhead locator"))]
    InvalidGrid { grid: String },

    #[snafu(display("unsupported transceiver profile '{profile}'"))]
    UnsupportedProfile { profile: String },

    #[snafu(display("baud rate {baud} is not supported"))]
    UnsupportedBaud { baud: u32 },
}

const KNOWN_PROFILES: &[&str] = &["streaming-radio", "generic-cat"];
const KNOWN_BAUDS: &[u32] = &[4800, 9600, 19200, 38400, 57600, 115200];

/// JS8 speed profile name, stored flat like every other field (§6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Js8SpeedSetting {
    Ultra,
    Slow,
    Normal,
    Fast,
    Turbo,
}

/// Station settings persisted across runs (§6): callsign, grid, mode, JS8
/// speed, band, dial frequency, and transceiver profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedSettings {
    pub callsign: String,
    pub grid: String,
    pub mode: String,
    pub js8_speed: Js8SpeedSetting,
    pub band: String,
    pub dial_frequency_hz: u64,
    pub transceiver_profile: String,
    pub baud: u32,
}

impl PersistedSettings {
    /// Validates the settings against the constraints in §6/§7.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.callsign.trim().is_empty() {
            return Err(ConfigError::MissingCallsign);
        }
        if !self.grid.is_empty() && !is_grid_shape(&self.grid) {
            return Err(ConfigError::InvalidGrid { grid: self.grid.clone() });
        }
        if !KNOWN_PROFILES.contains(&self.transceiver_profile.as_str()) {
            return Err(ConfigError::UnsupportedProfile { profile: self.transceiver_profile.clone() });
        }
        if !KNOWN_BAUDS.contains(&self.baud) {
            return Err(ConfigError::UnsupportedBaud { baud: self.baud });
        }
        Ok(())
    }

    /// Flattens the settings into a string map, matching the "flat
    /// key-value map, no migration" persistence schema (§6).
    pub fn to_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("callsign".to_string(), self.callsign.clone());
        map.insert("grid".to_string(), self.grid.clone());
        map.insert("mode".to_string(), self.mode.clone());
        map.insert("js8_speed".to_string(), format!("{:?}", self.js8_speed));
        map.insert("band".to_string(), self.band.clone());
        map.insert("dial_frequency_hz".to_string(), self.dial_frequency_hz.to_string());
        map.insert("transceiver_profile".to_string(), self.transceiver_profile.clone());
        map.insert("baud".to_string(), self.baud.to_string());
        map
    }

    /// Reconstructs settings from a flat string map (inverse of [`to_map`](Self::to_map)).
    pub fn from_map(map: &HashMap<String, String>) -> Option<Self> {
        let js8_speed = match map.get("js8_speed")?.as_str() {
            "Ultra" => Js8SpeedSetting::Ultra,
            "Slow" => Js8SpeedSetting::Slow,
            "Normal" => Js8SpeedSetting::Normal,
            "Fast" => Js8SpeedSetting::Fast,
            "Turbo" => Js8SpeedSetting::Turbo,
            _ => return None,
        };
        Some(Self {
            callsign: map.get("callsign")?.clone(),
            grid: map.get("grid")?.clone(),
            mode: map.get("mode")?.clone(),
            js8_speed,
            band: map.get("band")?.clone(),
            dial_frequency_hz: map.get("dial_frequency_hz")?.parse().ok()?,
            transceiver_profile: map.get("transceiver_profile")?.clone(),
            baud: map.get("baud")?.parse().ok()?,
        })
    }
}

fn is_grid_shape(grid: &str) -> bool {
    let chars: Vec<char> = grid.chars().collect();
    chars.len() == 4
        && chars[0].is_ascii_alphabetic()
        && chars[1].is_ascii_alphabetic()
        && chars[2].is_ascii_digit()
        && chars[3].is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PersistedSettings {
        PersistedSettings {
            callsign: "N0YPR".to_string(),
            grid: "DM42".to_string(),
            mode: "USB".to_string(),
            js8_speed: Js8SpeedSetting::Normal,
            band: "20m".to_string(),
            dial_frequency_hz: 14_074_000,
            transceiver_profile: "streaming-radio".to_string(),
            baud: 115200,
        }
    }

    #[test]
    fn valid_settings_pass_validation() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn missing_callsign_is_rejected() {
        let mut s = sample();
        s.callsign = "  ".to_string();
        assert_eq!(s.validate(), Err(ConfigError::MissingCallsign));
    }

    #[test]
    fn malformed_grid_is_rejected() {
        let mut s = sample();
        s.grid = "XYZ".to_string();
        assert!(matches!(s.validate(), Err(ConfigError::InvalidGrid { .. })));
    }

    #[test]
    fn unknown_profile_is_rejected() {
        let mut s = sample();
        s.transceiver_profile = "mystery-box".to_string();
        assert!(matches!(s.validate(), Err(ConfigError::UnsupportedProfile { .. })));
    }

    #[test]
    fn map_roundtrip_reproduces_the_original_settings() {
        let s = sample();
        let map = s.to_map();
        let restored = PersistedSettings::from_map(&map).unwrap();
        assert_eq!(restored, s);
    }
}
