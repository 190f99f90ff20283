pub const FORECAST_DAYS: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CityWeather {
    /// Display name, e.g. `New York`
    pub name: &'static str,
    /// Fahrenheit
    pub temperature: i32,
    pub condition: &'static str,
    /// Percent
    pub humidity: u8,
    /// Miles per hour
    pub wind_speed: u8,
    pub forecast: [&'static str; 5],
}

impl CityWeather {
    /// Lookup key: the lowercased name.
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }
}

pub const CITIES: [CityWeather; 5] = [
    CityWeather {
        name: "New York",
        temperature: 72,
        condition: "Partly Cloudy",
        humidity: 65,
        wind_speed: 8,
        forecast: ["Sunny", "Cloudy", "Rainy", "Partly Cloudy", "Sunny"],
    },
    CityWeather {
        name: "London",
        temperature: 58,
        condition: "Rainy",
        humidity: 80,
        wind_speed: 12,
        forecast: ["Rainy", "Cloudy", "Cloudy", "Partly Cloudy", "Sunny"],
    },
    CityWeather {
        name: "Tokyo",
        temperature: 68,
        condition: "Sunny",
        humidity: 55,
        wind_speed: 6,
        forecast: ["Sunny", "Sunny", "Partly Cloudy", "Cloudy", "Rainy"],
    },
    CityWeather {
        name: "Paris",
        temperature: 64,
        condition: "Cloudy",
        humidity: 70,
        wind_speed: 10,
        forecast: ["Cloudy", "Rainy", "Partly Cloudy", "Sunny", "Sunny"],
    },
    CityWeather {
        name: "Sydney",
        temperature: 78,
        condition: "Sunny",
        humidity: 60,
        wind_speed: 15,
        forecast: ["Sunny", "Sunny", "Partly Cloudy", "Partly Cloudy", "Cloudy"],
    },
];

/// Case-insensitive lookup. Surrounding whitespace is not trimmed.
pub fn lookup(city: &str) -> Option<&'static CityWeather> {
    let wanted = city.to_lowercase();
    CITIES.iter().find(|entry| entry.key() == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(lookup("new york").map(|c| c.temperature), Some(72));
        assert_eq!(lookup("TOKYO").map(|c| c.name), Some("Tokyo"));
        assert!(lookup("berlin").is_none());
        assert!(lookup("").is_none());
    }
}
