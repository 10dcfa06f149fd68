//! Background travel for unattended rovers.
//!
//! Rovers given a precomputed route keep driving while the player is elsewhere: each host tick
//! checks the power budget, advances them along the route, keeps them clear of the vehicle under
//! direct control and finalizes the trip on arrival. This crate re-exports the member crates so
//! front-ends and tests depend on a single package.

pub use voyage_config as config;
pub use voyage_core as primitives;
pub use voyage_export as export;
pub use voyage_geodesy as geodesy;
pub use voyage_power as power;
pub use voyage_route as route;
pub use voyage_sim as sim;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
