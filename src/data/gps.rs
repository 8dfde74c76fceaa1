use serde::{Deserialize, Serialize};

/// Vehicle GPS fix for one frame, as stored in `meta/gps.json`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GpsRecord {
    /// Latitude in decimal degrees, north positive.
    pub lat: f64,
    /// Longitude in decimal degrees, east positive.
    pub long: f64,
    /// Height in meters.
    pub height: f64,
    /// Velocity in m/s.
    pub xvel: f64,
    /// Velocity in m/s.
    pub yvel: f64,
}
