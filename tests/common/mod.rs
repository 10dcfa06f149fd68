#![allow(dead_code)]

use bon_voyage::config::{ChargePoolConfig, FormulaConfig, LimitConfig, PowerModelConfig, RoverRecord};
use bon_voyage::geodesy::{Coordinates, destination_point};
use bon_voyage::power::{ResourceContainer, ResourceSnapshot, StoredResource};
use bon_voyage::primitives::resources::{ELECTRIC_CHARGE, HYDROGEN, LIQUID_FUEL, OXIDIZER, OXYGEN};
use bon_voyage::primitives::vector::Vector3;
use bon_voyage::route::{JsonRouteCodec, RouteCodec};
use bon_voyage::sim::{CelestialBody, ControlledVessel, HostContext};

pub const MUN_RADIUS_M: f64 = 200_000.0;
pub const DAY: Vector3 = [1.0, 0.0, 0.0];
pub const NIGHT: Vector3 = [-1.0, 0.0, 0.0];

pub fn mun() -> CelestialBody {
    CelestialBody {
        name: "Mun".to_string(),
        radius_m: MUN_RADIUS_M,
    }
}

/// Host with a fixed sun and flat terrain that records every call that mutates it.
#[derive(Debug)]
pub struct StubHost {
    pub controlled_id: Option<String>,
    pub controlled: Option<ControlledVessel>,
    pub simulated: Vec<String>,
    pub sun: Vector3,
    pub terrain: f64,
    pub warp: u32,
    pub warp_calls: Vec<(u32, bool)>,
    pub messages: Vec<String>,
}

impl StubHost {
    pub fn day() -> Self {
        Self::with_sun(DAY)
    }

    pub fn night() -> Self {
        Self::with_sun(NIGHT)
    }

    pub fn with_sun(sun: Vector3) -> Self {
        Self {
            controlled_id: None,
            controlled: None,
            simulated: Vec::new(),
            sun,
            terrain: 0.0,
            warp: 0,
            warp_calls: Vec::new(),
            messages: Vec::new(),
        }
    }
}

impl HostContext for StubHost {
    fn is_controlled(&self, vessel_id: &str) -> bool {
        self.controlled_id.as_deref() == Some(vessel_id)
    }

    fn is_host_simulated(&self, vessel_id: &str) -> bool {
        self.simulated.iter().any(|id| id == vessel_id)
    }

    fn controlled_vessel(&self) -> Option<ControlledVessel> {
        self.controlled.clone()
    }

    fn sun_direction(&self, _body: &str) -> Vector3 {
        self.sun
    }

    fn terrain_height(&self, _body: &str, _latitude: f64, _longitude: f64) -> f64 {
        self.terrain
    }

    fn time_warp_rate(&self) -> u32 {
        self.warp
    }

    fn set_time_warp_rate(&mut self, rate: u32, instant: bool) {
        self.warp_calls.push((rate, instant));
        self.warp = rate;
    }

    fn post_screen_message(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

/// Waypoints every `step_m` metres due east along the equator from (0, 0), plus the target.
pub fn equator_route(distance_m: f64, step_m: f64) -> (Vec<Coordinates>, Coordinates) {
    let count = (distance_m / step_m).ceil() as usize;
    let waypoints = (0..count)
        .map(|i| destination_point(0.0, 0.0, 90.0, i as f64 * step_m, MUN_RADIUS_M))
        .collect();
    let target = destination_point(0.0, 0.0, 90.0, distance_m, MUN_RADIUS_M);
    (waypoints, target)
}

/// Active rover at (0, 0) on the Mun heading east for `distance_m`, on a discrete ledger.
pub fn rover_record(distance_m: f64) -> RoverRecord {
    let (waypoints, target) = equator_route(distance_m, 1_000.0);
    RoverRecord {
        version: 2,
        vessel_id: "rover-1".to_string(),
        vessel_name: "Scout".to_string(),
        body: "Mun".to_string(),
        latitude: 0.0,
        longitude: 0.0,
        altitude: 0.0,
        active: true,
        crewed: false,
        solar_production: 1.0,
        fuel_cell_production: 0.0,
        other_production: 0.0,
        required_power: 0.1,
        last_update_time: 0.0,
        distance_travelled: 0.0,
        distance_to_target: distance_m,
        target_latitude: target.latitude,
        target_longitude: target.longitude,
        average_speed: 10.0,
        route: JsonRouteCodec.encode(&waypoints),
        route_step: Some(1_000.0),
        power_model: Some(PowerModelConfig::DiscreteLedger {
            limit: LimitConfig::Current,
            formula: FormulaConfig::Flat,
        }),
        charge_pool: None,
    }
}

/// Same rover on the continuous budget with a charge pool.
pub fn continuous_record(distance_m: f64, pool_max: f64, pool_remaining: f64) -> RoverRecord {
    RoverRecord {
        power_model: Some(PowerModelConfig::ContinuousBudget {
            formula: FormulaConfig::SunAware,
            feed: None,
        }),
        charge_pool: Some(ChargePoolConfig {
            max: pool_max,
            remaining: pool_remaining,
        }),
        ..rover_record(distance_m)
    }
}

pub fn battery(amount: f64, max_amount: f64) -> ResourceSnapshot {
    ResourceSnapshot::new(vec![ResourceContainer::new(
        "battery",
        vec![StoredResource::new(ELECTRIC_CHARGE, amount, max_amount)],
    )])
}

/// A battery plus a hydrogen/oxygen fuel-cell tank.
pub fn battery_with_cells(amount: f64, max_amount: f64, hydrogen: f64, oxygen: f64) -> ResourceSnapshot {
    ResourceSnapshot::new(vec![
        ResourceContainer::new(
            "battery",
            vec![StoredResource::new(ELECTRIC_CHARGE, amount, max_amount)],
        ),
        ResourceContainer::new(
            "cryo tank",
            vec![
                StoredResource::new(HYDROGEN, hydrogen, 100.0),
                StoredResource::new(OXYGEN, oxygen, 100.0),
            ],
        ),
    ])
}

pub fn tanks(fuel: f64, oxidizer: f64) -> ResourceSnapshot {
    ResourceSnapshot::new(vec![ResourceContainer::new(
        "tank",
        vec![
            StoredResource::new(LIQUID_FUEL, fuel, 100.0),
            StoredResource::new(OXIDIZER, oxidizer, 100.0),
        ],
    )])
}

pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected}, got {actual} (tol {tol})"
    );
}
