//! Precomputed routes: fixed-step waypoint sequences and the codecs that decode them.

use thiserror::Error;
use voyage_geodesy::Coordinates;

/// A single route waypoint.
pub type Waypoint = Coordinates;

/// Errors surfaced while decoding an encoded route.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("route is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("waypoint {index} has a non-finite coordinate")]
    NonFinite { index: usize },
    #[error("waypoint {index} latitude {latitude} is outside [-90, 90]")]
    LatitudeOutOfRange { index: usize, latitude: f64 },
    #[error("route step must be positive, got {0}")]
    InvalidStep(f64),
}

/// Decoder for encoded routes produced by the external planner.
pub trait RouteCodec {
    /// Decode an encoded route into its ordered waypoints. The empty string is an empty route.
    fn decode(&self, encoded: &str) -> Result<Vec<Waypoint>, RouteError>;

    /// Encode waypoints into the codec's string form.
    fn encode(&self, waypoints: &[Waypoint]) -> String;
}

/// Codec storing routes as a JSON array of `[latitude, longitude]` pairs.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRouteCodec;

impl RouteCodec for JsonRouteCodec {
    fn decode(&self, encoded: &str) -> Result<Vec<Waypoint>, RouteError> {
        let trimmed = encoded.trim();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }
        let pairs: Vec<[f64; 2]> = serde_json::from_str(trimmed)?;
        pairs
            .into_iter()
            .enumerate()
            .map(|(index, [latitude, longitude])| {
                if !latitude.is_finite() || !longitude.is_finite() {
                    return Err(RouteError::NonFinite { index });
                }
                if !(-90.0..=90.0).contains(&latitude) {
                    return Err(RouteError::LatitudeOutOfRange { index, latitude });
                }
                Ok(Waypoint::new(latitude, longitude))
            })
            .collect()
    }

    fn encode(&self, waypoints: &[Waypoint]) -> String {
        if waypoints.is_empty() {
            return String::new();
        }
        let pairs: Vec<[f64; 2]> = waypoints
            .iter()
            .map(|w| [w.latitude, w.longitude])
            .collect();
        // Serializing plain f64 pairs cannot fail.
        serde_json::to_string(&pairs).unwrap_or_default()
    }
}

/// Position along a route: the waypoint the segment starts from and the metres past it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteCursor {
    pub segment: usize,
    pub remainder_m: f64,
}

/// An immutable route of waypoints spaced `step_m` metres apart.
#[derive(Debug, Clone)]
pub struct Route {
    waypoints: Vec<Waypoint>,
    step_m: f64,
}

impl Route {
    pub fn new(waypoints: Vec<Waypoint>, step_m: f64) -> Result<Self, RouteError> {
        if !(step_m.is_finite() && step_m > 0.0) {
            return Err(RouteError::InvalidStep(step_m));
        }
        Ok(Self { waypoints, step_m })
    }

    /// Decode an encoded route with the supplied codec.
    pub fn decode(codec: &dyn RouteCodec, encoded: &str, step_m: f64) -> Result<Self, RouteError> {
        Self::new(codec.decode(encoded)?, step_m)
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn step_m(&self) -> f64 {
        self.step_m
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Locate the segment containing `distance_m`.
    ///
    /// Distances past the last waypoint are measured from it. Returns `None` for an
    /// empty route.
    pub fn locate(&self, distance_m: f64) -> Option<RouteCursor> {
        let last = self.waypoints.len().checked_sub(1)?;
        let distance = distance_m.max(0.0);
        let segment = ((distance / self.step_m).floor() as usize).min(last);
        Some(RouteCursor {
            segment,
            remainder_m: distance - segment as f64 * self.step_m,
        })
    }

    /// Waypoint at `index`, if any.
    pub fn waypoint(&self, index: usize) -> Option<&Waypoint> {
        self.waypoints.get(index)
    }
}
