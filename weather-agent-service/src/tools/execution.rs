//! Tool argument types and the dispatch from tool name to lookup.

use schemars::JsonSchema;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::weather::{DEMO_WEATHER, MOCK_WEATHER, WeatherSource};

use super::ToolName;

/// Arguments for `get_weather`
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetWeatherArgs {
    /// City name, matched exactly (e.g. "Beijing")
    pub city: String,
}

/// Arguments for `weather_info`
#[derive(Debug, Deserialize, JsonSchema)]
pub struct WeatherInfoArgs {
    /// City or location name
    pub location: String,
}

/// Execute a tool by name. Lookups cannot fail; the only error is
/// arguments that do not match the tool's schema.
pub fn execute_tool(name: ToolName, args: &serde_json::Value) -> Result<String, String> {
    match name {
        ToolName::GetWeather => {
            let args: GetWeatherArgs = parse_args(name, args)?;
            Ok(DEMO_WEATHER.describe(&args.city))
        }
        ToolName::WeatherInfo => {
            let args: WeatherInfoArgs = parse_args(name, args)?;
            Ok(MOCK_WEATHER.describe(&args.location))
        }
    }
}

fn parse_args<T: DeserializeOwned>(name: ToolName, args: &serde_json::Value) -> Result<T, String> {
    T::deserialize(args).map_err(|e| format!("Invalid arguments for {}: {}", name, e))
}
