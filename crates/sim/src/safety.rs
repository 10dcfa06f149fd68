//! Keeps simulated moves away from the vehicle under direct control.

use voyage_core::constants::EXCLUSION_RADIUS_M;
use voyage_core::vector;
use voyage_geodesy::{Coordinates, surface_position};

use crate::host::{CelestialBody, HostContext};

/// Position of a rover on its body's surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePoint {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

/// Vetoes candidate positions inside the exclusion radius of the controlled vehicle.
pub struct SafetyGuard<'a> {
    host: &'a dyn HostContext,
    body: &'a CelestialBody,
    exclusion_radius_m: f64,
}

impl<'a> SafetyGuard<'a> {
    pub fn new(host: &'a dyn HostContext, body: &'a CelestialBody) -> Self {
        Self {
            host,
            body,
            exclusion_radius_m: EXCLUSION_RADIUS_M,
        }
    }

    /// Move `position` to `candidate` unless that lands within the exclusion radius of the
    /// controlled vehicle. Returns whether the move was committed; a veto leaves `position`
    /// untouched.
    pub fn try_commit(&self, position: &mut SurfacePoint, candidate: Coordinates) -> bool {
        let altitude =
            self.host
                .terrain_height(&self.body.name, candidate.latitude, candidate.longitude);

        if let Some(controlled) = self.host.controlled_vessel() {
            if controlled.body == self.body.name {
                let landing = surface_position(
                    candidate.latitude,
                    candidate.longitude,
                    altitude,
                    self.body.radius_m,
                );
                let separation = vector::distance(&landing, &controlled.position);
                if separation <= self.exclusion_radius_m {
                    log::debug!(
                        "move to ({:.4}, {:.4}) vetoed: {separation:.0} m from controlled vessel",
                        candidate.latitude,
                        candidate.longitude
                    );
                    return false;
                }
            }
        }

        *position = SurfacePoint {
            latitude: candidate.latitude,
            longitude: candidate.longitude,
            altitude,
        };
        true
    }
}
