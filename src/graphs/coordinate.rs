use serde::{Deserialize, Serialize};

/// Mean radius of Earth in meters.
pub const EARTH_RADIUS: f64 = 6_371_000.0;

/// Position of a vertex. `x`/`y` are projected meters used for drawing,
/// `lat`/`lon` are degrees and only feed the haversine heuristic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f32,
    pub y: f32,
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn from_lat_lon(lat: f64, lon: f64) -> Coordinate {
        Coordinate {
            x: 0.0,
            y: 0.0,
            lat,
            lon,
        }
    }

    /// Great-circle distance in meters using the
    /// [haversine formula](https://en.wikipedia.org/wiki/Haversine_formula).
    pub fn haversine_distance(&self, other: &Coordinate) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let sin_dlat_half = ((other.lat - self.lat).to_radians() * 0.5).sin();
        let sin_dlon_half = ((other.lon - self.lon).to_radians() * 0.5).sin();

        let a = sin_dlat_half * sin_dlat_half
            + lat1.cos() * lat2.cos() * sin_dlon_half * sin_dlon_half;
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS * c
    }

    /// Equirectangular projection around `origin`, in meters. Good enough for
    /// drawing a city or a small country.
    pub fn project_around(&mut self, origin: &Coordinate) {
        let mean_lat = ((self.lat + origin.lat) * 0.5).to_radians();
        self.x = (EARTH_RADIUS * (self.lon - origin.lon).to_radians() * mean_lat.cos()) as f32;
        self.y = (EARTH_RADIUS * (self.lat - origin.lat).to_radians()) as f32;
    }
}
