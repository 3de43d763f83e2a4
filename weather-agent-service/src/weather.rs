//! Fixed weather tables behind the lookup tools.
//!
//! Each table is a process-wide constant; lookups only read it. The MCP demo
//! table is keyed by exact city names while the agent's mock table is keyed
//! by lower-cased locations, so callers must match the normalization of the
//! table they query.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Something that can describe the weather at a place.
///
/// `describe` is total: a place the source knows nothing about still yields
/// a human-readable "not available" string rather than an error.
pub trait WeatherSource: Send + Sync {
    fn describe(&self, place: &str) -> String;
}

/// How a place name is normalized before it is used as a table key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyNormalization {
    ExactCase,
    LowerCase,
}

impl KeyNormalization {
    fn apply<'a>(&self, place: &'a str) -> Cow<'a, str> {
        match self {
            KeyNormalization::ExactCase => Cow::Borrowed(place),
            KeyNormalization::LowerCase => Cow::Owned(place.to_lowercase()),
        }
    }
}

/// Immutable place-to-description table
pub struct WeatherTable {
    entries: HashMap<&'static str, &'static str>,
    normalization: KeyNormalization,
    fallback_prefix: &'static str,
}

impl WeatherTable {
    fn new(
        entries: &[(&'static str, &'static str)],
        normalization: KeyNormalization,
        fallback_prefix: &'static str,
    ) -> Self {
        Self {
            entries: entries.iter().copied().collect(),
            normalization,
            fallback_prefix,
        }
    }

    /// Raw table hit after normalization
    pub fn lookup(&self, place: &str) -> Option<&'static str> {
        let key = self.normalization.apply(place);
        self.entries.get(key.as_ref()).copied()
    }
}

impl WeatherSource for WeatherTable {
    fn describe(&self, place: &str) -> String {
        match self.lookup(place) {
            Some(description) => description.to_string(),
            None => format!("{} {}", self.fallback_prefix, place),
        }
    }
}

/// Table served by the `get_weather` MCP tool
pub static DEMO_WEATHER: LazyLock<WeatherTable> = LazyLock::new(|| {
    WeatherTable::new(
        &[
            ("Beijing", "Sunny, 25°C"),
            ("Shanghai", "Cloudy, 23°C"),
            ("New York", "Rainy, 18°C"),
        ],
        KeyNormalization::ExactCase,
        "Weather data not available for",
    )
});

/// Table behind the agent's `weather_info` tool
pub static MOCK_WEATHER: LazyLock<WeatherTable> = LazyLock::new(|| {
    WeatherTable::new(
        &[
            ("new york", "72°F, Partly Cloudy"),
            ("london", "64°F, Rainy"),
            ("tokyo", "79°F, Sunny"),
        ],
        KeyNormalization::LowerCase,
        "Weather information not available for",
    )
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_table_known_cities() {
        assert_eq!(DEMO_WEATHER.describe("Beijing"), "Sunny, 25°C");
        assert_eq!(DEMO_WEATHER.describe("Shanghai"), "Cloudy, 23°C");
        assert_eq!(DEMO_WEATHER.describe("New York"), "Rainy, 18°C");
    }

    #[test]
    fn test_demo_table_is_case_sensitive() {
        assert_eq!(DEMO_WEATHER.lookup("beijing"), None);
        assert_eq!(
            DEMO_WEATHER.describe("beijing"),
            "Weather data not available for beijing"
        );
    }

    #[test]
    fn test_mock_table_normalizes_case() {
        assert_eq!(MOCK_WEATHER.describe("London"), "64°F, Rainy");
        assert_eq!(MOCK_WEATHER.describe("NEW YORK"), "72°F, Partly Cloudy");
        assert_eq!(MOCK_WEATHER.describe("tokyo"), "79°F, Sunny");
    }

    #[test]
    fn test_unknown_place_echoes_input() {
        for place in ["Paris", "", "  ", "Zürich", "new  york"] {
            let demo = DEMO_WEATHER.describe(place);
            assert!(demo.contains("not available"), "{demo}");
            assert!(demo.ends_with(place), "{demo}");

            let mock = MOCK_WEATHER.describe(place);
            assert!(mock.contains("not available"), "{mock}");
            assert!(mock.ends_with(place), "{mock}");
        }
    }

    #[test]
    fn test_mock_fallback_keeps_input_casing() {
        assert_eq!(
            MOCK_WEATHER.describe("Paris"),
            "Weather information not available for Paris"
        );
    }

    #[test]
    fn test_repeated_lookups_are_stable() {
        let first = DEMO_WEATHER.describe("Shanghai");
        for _ in 0..10 {
            assert_eq!(DEMO_WEATHER.describe("Shanghai"), first);
        }
        assert_eq!(MOCK_WEATHER.describe("LONDON"), MOCK_WEATHER.describe("london"));
    }
}
