//! Interfaces the host game supplies to the simulation, plus an offline host for headless runs.

use std::collections::HashMap;
use std::fmt;

use voyage_core::vector::Vector3;
use voyage_power::ResourceSnapshot;

use crate::rover::PersistedTick;

/// A body rovers travel on, treated as a sphere.
#[derive(Debug, Clone, PartialEq)]
pub struct CelestialBody {
    pub name: String,
    pub radius_m: f64,
}

/// The vehicle currently under direct control, in its body's fixed frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlledVessel {
    pub body: String,
    pub position: Vector3,
}

/// Host services queried by the driver every tick.
pub trait HostContext {
    /// Whether the vessel is the one under direct control.
    fn is_controlled(&self, vessel_id: &str) -> bool;
    /// Whether the host is running full physics for the vessel.
    fn is_host_simulated(&self, vessel_id: &str) -> bool;
    /// The controlled vehicle, if any.
    fn controlled_vessel(&self) -> Option<ControlledVessel>;
    /// Direction from the body's centre to the primary light source, body-fixed frame.
    fn sun_direction(&self, body: &str) -> Vector3;
    /// Terrain height above the body's sphere at a surface point (m).
    fn terrain_height(&self, body: &str, latitude: f64, longitude: f64) -> f64;
    /// Current time-acceleration rate index (0 is real time).
    fn time_warp_rate(&self) -> u32;
    /// Change the time-acceleration rate index.
    fn set_time_warp_rate(&mut self, rate: u32, instant: bool);
    /// Show a transient on-screen message.
    fn post_screen_message(&mut self, message: &str);
}

/// Event emitted once when a rover reaches its target.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrivalNotice {
    pub title: String,
    pub vessel_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub body: String,
    pub distance_travelled: f64,
}

impl ArrivalNotice {
    /// Body text of the notice.
    pub fn message(&self) -> String {
        format!(
            "{} has arrived to destination\nLAT:{:.2}\nLON:{:.2}\nAt {}.\nDistance travelled: {:.2} meters",
            self.vessel_name, self.latitude, self.longitude, self.body, self.distance_travelled
        )
    }
}

impl fmt::Display for ArrivalNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message().replace('\n', " "))
    }
}

/// Receiver of arrival notices.
pub trait NotificationSink {
    fn notify(&mut self, notice: ArrivalNotice);
}

impl NotificationSink for Vec<ArrivalNotice> {
    fn notify(&mut self, notice: ArrivalNotice) {
        self.push(notice);
    }
}

/// Source of live resource snapshots and destination of persisted ticks.
pub trait VesselStore {
    /// Current resources of a vessel; unknown vessels have no containers.
    fn resources(&self, vessel_id: &str) -> ResourceSnapshot;
    /// Write back the outcome of a tick that reached a decision.
    fn persist(&mut self, vessel_id: &str, tick: &PersistedTick);
}

/// Headless host: nothing is controlled or loaded, the sun circles each body's equator once
/// per rotation period, and terrain is a uniform height per body.
#[derive(Debug, Default)]
pub struct OfflineHost {
    time: f64,
    rotation_periods: HashMap<String, f64>,
    terrain_heights: HashMap<String, f64>,
    warp_rate: u32,
    messages: Vec<String>,
}

impl OfflineHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a body's rotation period (s) and terrain height (m).
    pub fn with_body(mut self, name: &str, rotation_period_s: Option<f64>, terrain_height_m: f64) -> Self {
        if let Some(period) = rotation_period_s.filter(|p| *p > 0.0) {
            self.rotation_periods.insert(name.to_string(), period);
        }
        self.terrain_heights.insert(name.to_string(), terrain_height_m);
        self
    }

    pub fn set_time(&mut self, time: f64) {
        self.time = time;
    }

    pub fn set_warp_rate(&mut self, rate: u32) {
        self.warp_rate = rate;
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl HostContext for OfflineHost {
    fn is_controlled(&self, _vessel_id: &str) -> bool {
        false
    }

    fn is_host_simulated(&self, _vessel_id: &str) -> bool {
        false
    }

    fn controlled_vessel(&self) -> Option<ControlledVessel> {
        None
    }

    fn sun_direction(&self, body: &str) -> Vector3 {
        match self.rotation_periods.get(body) {
            // The surface turns east, so the subsolar longitude drifts west.
            Some(period) => {
                let lon = -std::f64::consts::TAU * (self.time / period).fract();
                [lon.cos(), lon.sin(), 0.0]
            }
            None => [1.0, 0.0, 0.0],
        }
    }

    fn terrain_height(&self, body: &str, _latitude: f64, _longitude: f64) -> f64 {
        self.terrain_heights.get(body).copied().unwrap_or(0.0)
    }

    fn time_warp_rate(&self) -> u32 {
        self.warp_rate
    }

    fn set_time_warp_rate(&mut self, rate: u32, _instant: bool) {
        self.warp_rate = rate;
    }

    fn post_screen_message(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}
