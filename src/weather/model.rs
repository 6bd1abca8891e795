//! One Call response projection.
//!
//! Only the fields below survive the trip through the proxy. Field names on
//! the wire follow the One Call API exactly; everything else upstream sends
//! (`lat`, `daily`, `minutely`, `alerts`, ...) is dropped on decode.

use serde::{de, Deserialize, Deserializer, Serialize};

/// Conditions at the time of the upstream call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    #[serde(rename = "temp", default, deserialize_with = "null_as_default")]
    pub temperature: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub feels_like: f64,
}

/// Rain volume for the last hour, in millimetres.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RainVolume {
    #[serde(rename = "1h", default, deserialize_with = "null_as_default")]
    pub one_hour: f64,
}

/// One entry of the hourly forecast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecastEntry {
    /// Forecast time, Unix seconds (UTC).
    #[serde(rename = "dt", default, deserialize_with = "null_as_default")]
    pub timestamp: i64,

    #[serde(rename = "temp", default, deserialize_with = "null_as_default")]
    pub temperature: f64,

    /// Probability of precipitation, 0 to 1.
    #[serde(rename = "pop", default, deserialize_with = "null_as_default")]
    pub precipitation_probability: f64,

    /// Zero-valued when the upstream entry has no rain.
    #[serde(default, deserialize_with = "null_as_default")]
    pub rain: RainVolume,
}

/// The envelope decoded from upstream and re-encoded to the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Shift in seconds from UTC for the requested location.
    #[serde(default, deserialize_with = "null_as_default")]
    pub timezone_offset: i64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub current: CurrentConditions,

    /// Upstream order, never re-sorted. A `null` entry is a zero entry.
    #[serde(default, deserialize_with = "nullable_entries")]
    pub hourly: Vec<HourlyForecastEntry>,
}

impl WeatherSnapshot {
    /// Decode the first JSON value in `body`.
    ///
    /// Bytes after the first complete value are not inspected, matching a
    /// streaming decoder that stops once it has read one document. A bare
    /// `null` document leaves every field at its zero value.
    pub fn decode(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::Deserializer::from_slice(body)
            .into_iter::<Option<Self>>()
            .next()
            .map(|document| document.map(Option::unwrap_or_default))
            .unwrap_or_else(|| Err(de::Error::custom("EOF")))
    }

    /// Encode as a single JSON line terminated by `\n`.
    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        let mut body = serde_json::to_vec(self)?;
        body.push(b'\n');
        Ok(body)
    }
}

/// `null` decodes to the zero value, the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Like [`null_as_default`], applied to the list and to each element.
fn nullable_entries<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let entries: Option<Vec<Option<T>>> = Option::deserialize(deserializer)?;
    Ok(entries
        .unwrap_or_default()
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect())
}
