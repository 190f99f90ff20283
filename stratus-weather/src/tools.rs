//! Tool definitions and handlers
//!
//! Lookup failures are answered with a JSON `{"error": ...}` text payload, not
//! a protocol error, so the caller's model can read and relay them.

use crate::data::{CITIES, CityWeather, FORECAST_DAYS, lookup};
use chrono::Local;
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

pub const GET_CURRENT_WEATHER: &str = "get_current_weather";
pub const GET_FORECAST: &str = "get_forecast";
pub const LIST_AVAILABLE_CITIES: &str = "list_available_cities";

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Weather data not available for '{city}'. Available cities: {available}")]
    UnknownCity { city: String, available: String },
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("failed to encode tool result: {0}")]
    Encode(#[from] serde_json::Error),
}

impl WeatherError {
    /// Whether the caller should see this as a tool failure rather than data.
    pub fn is_fault(&self) -> bool {
        matches!(self, WeatherError::Encode(_))
    }

    pub fn to_payload(&self) -> String {
        json!({ "error": self.to_string() }).to_string()
    }
}

#[derive(Debug, Serialize)]
struct CurrentWeather<'a> {
    city: &'a str,
    timestamp: String,
    temperature: i32,
    temperature_unit: &'static str,
    condition: &'a str,
    humidity: u8,
    humidity_unit: &'static str,
    wind_speed: u8,
    wind_speed_unit: &'static str,
}

#[derive(Debug, Serialize)]
struct ForecastDay<'a> {
    day: &'a str,
    condition: &'a str,
}

#[derive(Debug, Serialize)]
struct Forecast<'a> {
    city: &'a str,
    forecast: Vec<ForecastDay<'a>>,
}

#[derive(Debug, Serialize)]
struct CityList<'a> {
    available_cities: Vec<&'a str>,
}

/// The `tools` array returned by `tools/list`.
pub fn tool_definitions() -> Value {
    let city_schema = json!({
        "type": "object",
        "properties": {
            "city": {
                "type": "string",
                "description": "The city name (e.g., 'New York', 'London', 'Tokyo')"
            }
        },
        "required": ["city"]
    });

    json!([
        {
            "name": GET_CURRENT_WEATHER,
            "description": "Get the current weather for a specific city. Returns temperature, condition, humidity, and wind speed.",
            "inputSchema": city_schema
        },
        {
            "name": GET_FORECAST,
            "description": "Get a 5-day weather forecast for a specific city.",
            "inputSchema": city_schema
        },
        {
            "name": LIST_AVAILABLE_CITIES,
            "description": "List all cities with available weather data.",
            "inputSchema": {"type": "object", "properties": {}}
        }
    ])
}

/// Run a tool and return its pretty-printed JSON text.
pub fn call_tool(name: &str, arguments: &Value) -> Result<String, WeatherError> {
    match name {
        GET_CURRENT_WEATHER => {
            let city = find_city(arguments)?;
            let report = CurrentWeather {
                city: city.name,
                timestamp: Local::now()
                    .naive_local()
                    .format("%Y-%m-%dT%H:%M:%S%.6f")
                    .to_string(),
                temperature: city.temperature,
                temperature_unit: "Fahrenheit",
                condition: city.condition,
                humidity: city.humidity,
                humidity_unit: "%",
                wind_speed: city.wind_speed,
                wind_speed_unit: "mph",
            };
            Ok(serde_json::to_string_pretty(&report)?)
        }
        GET_FORECAST => {
            let city = find_city(arguments)?;
            let report = Forecast {
                city: city.name,
                forecast: FORECAST_DAYS
                    .iter()
                    .zip(city.forecast.iter())
                    .map(|(&day, &condition)| ForecastDay { day, condition })
                    .collect(),
            };
            Ok(serde_json::to_string_pretty(&report)?)
        }
        LIST_AVAILABLE_CITIES => {
            let list = CityList {
                available_cities: CITIES.iter().map(|city| city.name).collect(),
            };
            Ok(serde_json::to_string_pretty(&list)?)
        }
        other => Err(WeatherError::UnknownTool(other.to_string())),
    }
}

fn find_city(arguments: &Value) -> Result<&'static CityWeather, WeatherError> {
    let requested = arguments
        .get("city")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_lowercase();
    lookup(&requested).ok_or_else(|| WeatherError::UnknownCity {
        city: requested,
        available: CITIES
            .iter()
            .map(CityWeather::key)
            .collect::<Vec<_>>()
            .join(", "),
    })
}
