//! Background simulation of unattended rovers.
//!
//! The driver ([`Rover::update`]) combines the power budget from `voyage_power`, route
//! following ([`path`]), the proximity veto ([`safety`]) and arrival handling ([`arrival`]).
//! The host game is reached only through the traits in [`host`].

pub mod arrival;
pub mod fleet;
pub mod host;
pub mod path;
pub mod records;
pub mod rover;
pub mod safety;
pub mod store;

pub use arrival::{Arrival, ArrivalHandler};
pub use fleet::{Fleet, FleetError, RoverSummary};
pub use host::{
    ArrivalNotice, CelestialBody, ControlledVessel, HostContext, NotificationSink, OfflineHost,
    VesselStore,
};
pub use path::{PathFollower, PathStep};
pub use rover::{PersistedTick, Rover, RoverError, RoverStatus, TickOutcome};
pub use safety::{SafetyGuard, SurfacePoint};
pub use store::MemoryStore;
