//! Path following: turning elapsed time into distance and distance into a surface coordinate.

use voyage_geodesy::{Coordinates, destination_point, initial_bearing};
use voyage_route::Route;

/// Result of advancing along the route for one interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathStep {
    /// Distance covered this interval (m); refunded if the move is vetoed.
    pub displacement: f64,
    /// Travelled distance after the interval, before any clamp at the target.
    pub travelled: f64,
    /// Where the rover would stand after the interval.
    pub candidate: Coordinates,
    /// The interval reaches or passes the target.
    pub arrived: bool,
}

/// Follows a precomputed route towards its target on a spherical body.
#[derive(Debug, Clone, Copy)]
pub struct PathFollower<'a> {
    route: &'a Route,
    target: Coordinates,
    radius_m: f64,
}

impl<'a> PathFollower<'a> {
    pub fn new(route: &'a Route, target: Coordinates, radius_m: f64) -> Self {
        Self {
            route,
            target,
            radius_m,
        }
    }

    /// Advance `travelled` by `speed × dt` metres.
    ///
    /// A single large interval clamps at the target instead of overshooting it.
    pub fn advance(&self, travelled: f64, distance_to_target: f64, speed: f64, dt: f64) -> PathStep {
        let displacement = (speed * dt).max(0.0);
        let travelled = travelled + displacement;

        if travelled >= distance_to_target {
            return PathStep {
                displacement,
                travelled,
                candidate: self.target,
                arrived: true,
            };
        }

        PathStep {
            displacement,
            travelled,
            candidate: self.locate(travelled),
            arrived: false,
        }
    }

    /// Surface coordinate `travelled` metres along the route.
    pub fn locate(&self, travelled: f64) -> Coordinates {
        let Some(cursor) = self.route.locate(travelled) else {
            return self.target;
        };
        let origin = self.route.waypoints()[cursor.segment];
        let next = self.route.waypoint(cursor.segment + 1).unwrap_or(&self.target);
        let bearing = initial_bearing(
            origin.latitude,
            origin.longitude,
            next.latitude,
            next.longitude,
        );
        destination_point(
            origin.latitude,
            origin.longitude,
            bearing,
            cursor.remainder_m,
            self.radius_m,
        )
    }
}
