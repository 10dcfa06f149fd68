//! Core units, constants, and shared primitives for the Bon Voyage workspace.

/// Simulation constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Minimum straight-line separation between a simulated move and the controlled vehicle (m).
    pub const EXCLUSION_RADIUS_M: f64 = 2_400.0;
    /// Default wall-clock interval between fleet ticks (ms).
    pub const DEFAULT_TICK_INTERVAL_MS: u64 = 200;
    /// Default spacing between consecutive route waypoints (m).
    pub const DEFAULT_ROUTE_STEP_M: f64 = 1_000.0;
    /// Sun angle above which the vehicle is on the night side (degrees).
    pub const NIGHT_ANGLE_DEG: f64 = 90.0;
    /// Fuel consumed per unit of electric charge produced by a stock fuel cell.
    pub const FUEL_PER_CHARGE: f64 = 0.001_125;
    /// Oxidizer consumed per unit of electric charge produced by a stock fuel cell.
    pub const OXIDIZER_PER_CHARGE: f64 = 0.001_375;
}

/// Resource names understood by the energy ledger.
pub mod resources {
    pub const ELECTRIC_CHARGE: &str = "ElectricCharge";
    pub const LIQUID_FUEL: &str = "LiquidFuel";
    pub const OXIDIZER: &str = "Oxidizer";
    pub const HYDROGEN: &str = "Hydrogen";
    pub const OXYGEN: &str = "Oxygen";
}

/// Basic unit conversion helpers.
pub mod units {
    /// Convert degrees to radians.
    #[inline]
    pub fn deg_to_rad(v: f64) -> f64 {
        v.to_radians()
    }

    /// Convert radians to degrees.
    #[inline]
    pub fn rad_to_deg(v: f64) -> f64 {
        v.to_degrees()
    }

    /// Normalize an angle in degrees to `[0, 360)`.
    #[inline]
    pub fn normalize_degrees(v: f64) -> f64 {
        v.rem_euclid(360.0)
    }

    /// Wrap a longitude in degrees to `[-180, 180)`.
    #[inline]
    pub fn wrap_longitude(v: f64) -> f64 {
        (v + 540.0).rem_euclid(360.0) - 180.0
    }
}

/// Minimal vector helpers to avoid ad-hoc `[f64; 3]` math everywhere.
pub mod vector {
    /// Alias for a 3D vector in metres unless stated otherwise.
    pub type Vector3 = [f64; 3];

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm(v: &Vector3) -> f64 {
        dot(v, v).sqrt()
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(a: &Vector3, b: &Vector3) -> f64 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    /// Vector subtraction.
    #[inline]
    pub fn sub(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    /// Scale a vector by a scalar.
    #[inline]
    pub fn scale(v: &Vector3, s: f64) -> Vector3 {
        [v[0] * s, v[1] * s, v[2] * s]
    }

    /// Distance between two points.
    #[inline]
    pub fn distance(a: &Vector3, b: &Vector3) -> f64 {
        norm(&sub(a, b))
    }

    /// Angle between two vectors in degrees, `0` when either is degenerate.
    pub fn angle_deg(a: &Vector3, b: &Vector3) -> f64 {
        let denom = norm(a) * norm(b);
        if denom <= f64::EPSILON {
            return 0.0;
        }
        (dot(a, b) / denom).clamp(-1.0, 1.0).acos().to_degrees()
    }
}
