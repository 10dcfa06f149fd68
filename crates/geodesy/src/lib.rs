//! Spherical geodesy helpers (bearings, forward projection, body-fixed positions).
//!
//! Bodies are treated as perfect spheres. Latitudes and longitudes are in degrees,
//! distances and radii in metres, and positions are expressed in a body-fixed frame
//! with the z axis through the north pole.
use voyage_core::units::{deg_to_rad, normalize_degrees, rad_to_deg, wrap_longitude};
use voyage_core::vector::{self, Vector3};

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Initial great-circle bearing from `a` to `b`, in degrees clockwise from north in `[0, 360)`.
pub fn initial_bearing(lat_a: f64, lon_a: f64, lat_b: f64, lon_b: f64) -> f64 {
    let phi1 = deg_to_rad(lat_a);
    let phi2 = deg_to_rad(lat_b);
    let delta_lambda = deg_to_rad(lon_b - lon_a);

    let y = delta_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();
    normalize_degrees(rad_to_deg(y.atan2(x)))
}

/// Project `distance_m` along `bearing_deg` from a starting point on a sphere of `radius_m`.
pub fn destination_point(
    lat: f64,
    lon: f64,
    bearing_deg: f64,
    distance_m: f64,
    radius_m: f64,
) -> Coordinates {
    let phi1 = deg_to_rad(lat);
    let lambda1 = deg_to_rad(lon);
    let theta = deg_to_rad(bearing_deg);
    let delta = distance_m / radius_m;

    let sin_phi2 = phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * theta.cos();
    let phi2 = sin_phi2.clamp(-1.0, 1.0).asin();
    let lambda2 = lambda1
        + (theta.sin() * delta.sin() * phi1.cos()).atan2(delta.cos() - phi1.sin() * sin_phi2);

    Coordinates {
        latitude: rad_to_deg(phi2),
        longitude: wrap_longitude(rad_to_deg(lambda2)),
    }
}

/// Great-circle (haversine) distance between two points on a sphere of `radius_m`.
pub fn great_circle_distance(lat_a: f64, lon_a: f64, lat_b: f64, lon_b: f64, radius_m: f64) -> f64 {
    let phi1 = deg_to_rad(lat_a);
    let phi2 = deg_to_rad(lat_b);
    let d_phi = phi2 - phi1;
    let d_lambda = deg_to_rad(lon_b - lon_a);

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    2.0 * radius_m * h.sqrt().clamp(0.0, 1.0).asin()
}

/// Unit vector pointing from the body's centre through the given surface point.
pub fn zenith(lat: f64, lon: f64) -> Vector3 {
    let phi = deg_to_rad(lat);
    let lambda = deg_to_rad(lon);
    [phi.cos() * lambda.cos(), phi.cos() * lambda.sin(), phi.sin()]
}

/// Body-fixed position of a point at `altitude_m` above a sphere of `radius_m`.
pub fn surface_position(lat: f64, lon: f64, altitude_m: f64, radius_m: f64) -> Vector3 {
    vector::scale(&zenith(lat, lon), radius_m + altitude_m)
}

/// Angle between the local zenith and the direction to the sun, in degrees within `[0, 180]`.
///
/// Angles above 90 degrees put the point on the night side.
pub fn sun_angle(lat: f64, lon: f64, sun_direction: &Vector3) -> f64 {
    vector::angle_deg(&zenith(lat, lon), sun_direction)
}
