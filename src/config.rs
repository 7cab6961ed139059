use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::math::CalendarMath;

/// Settings a host passes to the engine instead of the engine reading them
/// from ambient locale state.
///
/// Missing fields fall back to their defaults when deserialized, so a host
/// can load a partial config from JSON or TOML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// Day shown in the first grid column
    pub first_weekday: Weekday,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            first_weekday: Weekday::Sun,
        }
    }
}

impl CalendarConfig {
    #[must_use]
    pub const fn with_first_weekday(mut self, first_weekday: Weekday) -> Self {
        self.first_weekday = first_weekday;
        self
    }

    pub const fn math(&self) -> CalendarMath {
        CalendarMath::new(self.first_weekday)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_sunday_first() {
        let config = CalendarConfig::default();
        assert_eq!(config.first_weekday, Weekday::Sun);
        assert_eq!(config.math().first_weekday(), Weekday::Sun);
    }

    #[test]
    fn test_with_first_weekday() {
        let config = CalendarConfig::default().with_first_weekday(Weekday::Mon);
        assert_eq!(config.math(), CalendarMath::new(Weekday::Mon));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: CalendarConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CalendarConfig::default());

        let config: CalendarConfig = serde_json::from_str(r#"{"first_weekday":"Mon"}"#).unwrap();
        assert_eq!(config.first_weekday, Weekday::Mon);

        let result: Result<CalendarConfig, _> = serde_json::from_str(r#"{"first_weekday":"Someday"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let config = CalendarConfig::default().with_first_weekday(Weekday::Sat);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: CalendarConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }
}
