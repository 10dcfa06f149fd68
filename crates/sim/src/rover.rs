//! The per-tick rover driver.
//!
//! A [`Rover`] is rebuilt from its persisted record on every load and advanced by
//! [`Rover::update`] once per host tick. Every tick that reaches a decision hands back an
//! immutable [`PersistedTick`] for the host to write, so a crash loses at most one tick.

use std::fmt;

use thiserror::Error;
use voyage_config::{CURRENT_RECORD_VERSION, ConfigError, RoverRecord, Settings};
use voyage_geodesy::{Coordinates, sun_angle};
use voyage_power::{
    ChargePool, Eligibility, EnergyLedger, PowerModel, Production, ResourceSnapshot, evaluate,
};
use voyage_route::{Route, RouteCodec, RouteError};

use crate::arrival::{Arrival, ArrivalHandler};
use crate::host::{CelestialBody, HostContext, NotificationSink};
use crate::path::PathFollower;
use crate::records::{
    charge_pool_from_config, charge_pool_to_config, power_model_from_config,
    power_model_to_config,
};
use crate::safety::{SafetyGuard, SurfacePoint};

/// What a rover did on its last tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoverStatus {
    /// The rover is the vehicle under direct control.
    Current,
    #[default]
    Idle,
    Roving,
    AwaitingSunlight,
    FuelDepleted,
    NotEnoughPower,
}

impl RoverStatus {
    pub fn label(self) -> &'static str {
        match self {
            RoverStatus::Current => "current",
            RoverStatus::Idle => "idle",
            RoverStatus::Roving => "roving",
            RoverStatus::AwaitingSunlight => "awaiting sunlight",
            RoverStatus::FuelDepleted => "fuel cells resource depleted",
            RoverStatus::NotEnoughPower => "not enough power",
        }
    }

    /// Travel is in progress, whether or not the rover moved this tick.
    pub fn is_travelling(self) -> bool {
        matches!(
            self,
            RoverStatus::Roving
                | RoverStatus::AwaitingSunlight
                | RoverStatus::FuelDepleted
                | RoverStatus::NotEnoughPower
        )
    }
}

impl fmt::Display for RoverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors that make a persisted record unusable.
#[derive(Debug, Error)]
pub enum RoverError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("route could not be decoded: {0}")]
    Route(#[from] RouteError),
    #[error("field `{field}` has invalid value {value}")]
    Invalid { field: &'static str, value: f64 },
    #[error("record belongs to body `{record}` but `{supplied}` was supplied")]
    BodyMismatch { record: String, supplied: String },
    #[error("active rover has {remaining:.0} m left to travel but no route")]
    EmptyRoute { remaining: f64 },
}

/// State to write back after a tick that reached a decision.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedTick {
    pub record: RoverRecord,
    pub resources: ResourceSnapshot,
}

/// Result of one [`Rover::update`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    pub status: RoverStatus,
    /// Present whenever the tick reached a decision and the host must persist.
    pub persisted: Option<PersistedTick>,
}

/// A managed rover travelling along a precomputed route.
#[derive(Debug, Clone)]
pub struct Rover {
    vessel_id: String,
    vessel_name: String,
    body: CelestialBody,
    position: SurfacePoint,
    target: Coordinates,
    route: Route,
    encoded_route: String,
    distance_travelled: f64,
    distance_to_target: f64,
    average_speed: f64,
    speed_multiplier: f64,
    model: PowerModel,
    production: Production,
    pool: ChargePool,
    crewed: bool,
    active: bool,
    last_update_time: f64,
    arrival: ArrivalHandler,
    status: RoverStatus,
}

impl Rover {
    /// Rebuild a rover from its persisted record.
    pub fn from_record(
        record: &RoverRecord,
        body: CelestialBody,
        codec: &dyn RouteCodec,
        settings: &Settings,
    ) -> Result<Self, RoverError> {
        let record = record.clone().migrate()?;
        if record.body != body.name {
            return Err(RoverError::BodyMismatch {
                record: record.body,
                supplied: body.name,
            });
        }

        let position = SurfacePoint {
            latitude: latitude("latitude", record.latitude)?,
            longitude: finite("longitude", record.longitude)?,
            altitude: finite("altitude", record.altitude)?,
        };
        let target = Coordinates::new(
            latitude("targetLatitude", record.target_latitude)?,
            finite("targetLongitude", record.target_longitude)?,
        );
        let production = Production {
            solar: non_negative("solarProduction", record.solar_production)?,
            fuel_cell: non_negative("fuelCellProduction", record.fuel_cell_production)?,
            other: non_negative("otherProduction", record.other_production)?,
            required: non_negative("requiredPower", record.required_power)?,
        };
        let pool = charge_pool_from_config(record.charge_pool.as_ref());
        non_negative("chargePool.max", pool.max)?;
        non_negative("chargePool.remaining", pool.remaining)?;

        let distance_to_target = non_negative("distanceToTarget", record.distance_to_target)?;
        let mut distance_travelled = non_negative("distanceTravelled", record.distance_travelled)?;
        if distance_travelled > distance_to_target {
            log::warn!(
                "{}: travelled {distance_travelled:.0} m exceeds trip of {distance_to_target:.0} m, clamping",
                record.vessel_name
            );
            distance_travelled = distance_to_target;
        }

        let step_m = record.route_step.unwrap_or(settings.route_step_m);
        let route = Route::decode(codec, &record.route, step_m)?;
        if record.active && distance_travelled < distance_to_target && route.is_empty() {
            return Err(RoverError::EmptyRoute {
                remaining: distance_to_target - distance_travelled,
            });
        }

        let model = match record.power_model.as_ref() {
            Some(config) => power_model_from_config(config),
            None => {
                return Err(ConfigError::MissingField {
                    vessel: record.vessel_id,
                    field: "powerModel",
                }
                .into());
            }
        };

        Ok(Self {
            vessel_id: record.vessel_id,
            vessel_name: record.vessel_name,
            body,
            position,
            target,
            route,
            encoded_route: record.route,
            distance_travelled,
            distance_to_target,
            average_speed: non_negative("averageSpeed", record.average_speed)?,
            speed_multiplier: 1.0,
            model,
            production,
            pool,
            crewed: record.crewed,
            active: record.active,
            last_update_time: finite("lastUpdateTime", record.last_update_time)?,
            arrival: ArrivalHandler::new(settings.auto_dewarp),
            status: if record.active {
                RoverStatus::Roving
            } else {
                RoverStatus::Idle
            },
        })
    }

    /// Serialize the current state into a persisted record.
    pub fn to_record(&self) -> RoverRecord {
        RoverRecord {
            version: CURRENT_RECORD_VERSION,
            vessel_id: self.vessel_id.clone(),
            vessel_name: self.vessel_name.clone(),
            body: self.body.name.clone(),
            latitude: self.position.latitude,
            longitude: self.position.longitude,
            altitude: self.position.altitude,
            active: self.active,
            crewed: self.crewed,
            solar_production: self.production.solar,
            fuel_cell_production: self.production.fuel_cell,
            other_production: self.production.other,
            required_power: self.production.required,
            last_update_time: self.last_update_time,
            distance_travelled: self.distance_travelled,
            distance_to_target: self.distance_to_target,
            target_latitude: self.target.latitude,
            target_longitude: self.target.longitude,
            average_speed: self.average_speed,
            route: self.encoded_route.clone(),
            route_step: Some(self.route.step_m()),
            power_model: Some(power_model_to_config(&self.model)),
            charge_pool: Some(charge_pool_to_config(&self.pool)),
        }
    }

    /// Advance the rover to `now` using the vessel's live `resources`.
    pub fn update(
        &mut self,
        now: f64,
        resources: &ResourceSnapshot,
        host: &mut dyn HostContext,
        sink: &mut dyn NotificationSink,
    ) -> TickOutcome {
        if host.is_controlled(&self.vessel_id) {
            return self.settle(RoverStatus::Current);
        }
        if !self.active || host.is_host_simulated(&self.vessel_id) {
            return self.settle(RoverStatus::Idle);
        }

        let angle = sun_angle(
            self.position.latitude,
            self.position.longitude,
            &host.sun_direction(&self.body.name),
        );
        let dt = (now - self.last_update_time).max(0.0);
        let mut working = resources.clone();

        let budget = {
            let mut ledger = EnergyLedger::new(&self.model, &mut self.pool, &mut working);
            let budget = evaluate(&self.model, &self.production, angle, self.crewed, dt, &ledger);
            if budget.eligibility == Eligibility::Eligible && !ledger.drain(budget.energy_delta) {
                log::debug!("{}: ledger could not cover the full interval", self.vessel_name);
            }
            budget
        };
        self.speed_multiplier = budget.speed_multiplier;

        let status = match budget.eligibility {
            Eligibility::NotEnoughPower => RoverStatus::NotEnoughPower,
            Eligibility::AwaitingSunlight => RoverStatus::AwaitingSunlight,
            Eligibility::FuelDepleted => RoverStatus::FuelDepleted,
            Eligibility::Eligible => self.drive(dt, &mut working, host, sink),
        };
        log::debug!(
            "{}: {status} (sun {angle:.1} deg, dt {dt:.1} s, {:.0}/{:.0} m)",
            self.vessel_name,
            self.distance_travelled,
            self.distance_to_target
        );
        self.decide(status, now, working)
    }

    fn drive(
        &mut self,
        dt: f64,
        working: &mut ResourceSnapshot,
        host: &mut dyn HostContext,
        sink: &mut dyn NotificationSink,
    ) -> RoverStatus {
        let step = PathFollower::new(&self.route, self.target, self.body.radius_m).advance(
            self.distance_travelled,
            self.distance_to_target,
            self.effective_speed(),
            dt,
        );

        // A vetoed move keeps the previous distance, which refunds this tick's displacement.
        if !SafetyGuard::new(&*host, &self.body).try_commit(&mut self.position, step.candidate) {
            log::info!(
                "{}: {:.0} m move vetoed near the controlled vessel",
                self.vessel_name,
                step.displacement
            );
            return RoverStatus::Idle;
        }

        if !step.arrived {
            self.distance_travelled = step.travelled;
            return RoverStatus::Roving;
        }

        self.distance_travelled = self.distance_to_target;
        self.active = false;
        self.encoded_route.clear();
        let mut ledger = EnergyLedger::new(&self.model, &mut self.pool, working);
        self.arrival.handle(
            Arrival {
                vessel_name: &self.vessel_name,
                body: &self.body.name,
                target: self.target,
                distance_travelled: self.distance_travelled,
            },
            &mut ledger,
            host,
            sink,
        );
        RoverStatus::Idle
    }

    fn settle(&mut self, status: RoverStatus) -> TickOutcome {
        self.status = status;
        TickOutcome {
            status,
            persisted: None,
        }
    }

    fn decide(&mut self, status: RoverStatus, now: f64, resources: ResourceSnapshot) -> TickOutcome {
        self.status = status;
        self.last_update_time = now;
        TickOutcome {
            status,
            persisted: Some(PersistedTick {
                record: self.to_record(),
                resources,
            }),
        }
    }

    /// Start or stop travel. Starting has no effect once the target has been reached.
    pub fn set_active(&mut self, active: bool) {
        self.active = active && self.distance_travelled < self.distance_to_target;
    }

    pub fn vessel_id(&self) -> &str {
        &self.vessel_id
    }

    pub fn vessel_name(&self) -> &str {
        &self.vessel_name
    }

    pub fn body(&self) -> &CelestialBody {
        &self.body
    }

    pub fn position(&self) -> SurfacePoint {
        self.position
    }

    pub fn target(&self) -> Coordinates {
        self.target
    }

    pub fn status(&self) -> RoverStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_crewed(&self) -> bool {
        self.crewed
    }

    pub fn distance_travelled(&self) -> f64 {
        self.distance_travelled
    }

    pub fn distance_to_target(&self) -> f64 {
        self.distance_to_target
    }

    /// Distance left to the target (m).
    pub fn remaining(&self) -> f64 {
        self.distance_to_target - self.distance_travelled
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    /// Base average speed with the current penalty applied (m/s).
    pub fn effective_speed(&self) -> f64 {
        self.average_speed * self.speed_multiplier
    }

    pub fn last_update_time(&self) -> f64 {
        self.last_update_time
    }

    pub fn power_model(&self) -> &PowerModel {
        &self.model
    }

    pub fn charge_pool(&self) -> ChargePool {
        self.pool
    }

    pub fn route(&self) -> &Route {
        &self.route
    }
}

fn finite(field: &'static str, value: f64) -> Result<f64, RoverError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RoverError::Invalid { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<f64, RoverError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(RoverError::Invalid { field, value })
    }
}

fn latitude(field: &'static str, value: f64) -> Result<f64, RoverError> {
    if (-90.0..=90.0).contains(&value) {
        Ok(value)
    } else {
        Err(RoverError::Invalid { field, value })
    }
}
