//! Weather data schema.
//!
//! # Data Flow
//! ```text
//! upstream body (One Call JSON)
//!     → WeatherSnapshot::decode (projection onto declared fields)
//!     → WeatherSnapshot::encode (same names, same nesting)
//!     → response body
//! ```

pub mod model;

pub use model::{CurrentConditions, HourlyForecastEntry, RainVolume, WeatherSnapshot};
