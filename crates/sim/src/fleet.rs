//! The managed set of rovers and its wall-clock tick gate.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use thiserror::Error;
use voyage_config::{ConfigError, RoverRecord, Settings};
use voyage_route::RouteCodec;

use crate::host::{CelestialBody, HostContext, NotificationSink, VesselStore};
use crate::rover::{Rover, RoverError, RoverStatus};

/// Reasons a record was left out of the managed set.
#[derive(Debug, Error)]
pub enum FleetError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("vessel `{vessel}`: {source}")]
    Rover {
        vessel: String,
        #[source]
        source: RoverError,
    },
    #[error("vessel `{vessel}` is on unknown body `{body}`")]
    UnknownBody { vessel: String, body: String },
    #[error("vessel `{0}` appears more than once")]
    DuplicateVessel(String),
}

/// One line of the fleet overview.
#[derive(Debug, Clone, PartialEq)]
pub struct RoverSummary {
    pub vessel_id: String,
    pub vessel_name: String,
    pub body: String,
    pub status: RoverStatus,
    /// Speed with the current penalty applied, while a trip is in progress (m/s).
    pub effective_speed: Option<f64>,
    /// Distance left, while a trip is in progress (m).
    pub remaining_m: Option<f64>,
    /// Seconds since the rover last reached a decision, while idle.
    pub idle_for_s: Option<f64>,
}

/// All rovers under management.
#[derive(Debug)]
pub struct Fleet {
    rovers: Vec<Rover>,
    settings: Settings,
    last_tick: Option<Instant>,
    paused: bool,
}

impl Fleet {
    pub fn new(settings: Settings) -> Self {
        Self {
            rovers: Vec::new(),
            settings,
            last_tick: None,
            paused: false,
        }
    }

    /// Build the managed set from persisted records.
    ///
    /// Records that fail to load are skipped with a warning and returned alongside the fleet.
    pub fn load<I>(
        records: I,
        bodies: &[CelestialBody],
        codec: &dyn RouteCodec,
        settings: Settings,
    ) -> (Self, Vec<FleetError>)
    where
        I: IntoIterator<Item = Result<RoverRecord, ConfigError>>,
    {
        let mut fleet = Self::new(settings);
        let mut skipped = Vec::new();
        let mut seen = HashSet::new();

        for record in records {
            match fleet.build(record, bodies, codec, &mut seen) {
                Ok(rover) => fleet.rovers.push(rover),
                Err(err) => {
                    log::warn!("skipping rover: {err}");
                    skipped.push(err);
                }
            }
        }
        log::info!(
            "managing {} rover(s), skipped {}",
            fleet.rovers.len(),
            skipped.len()
        );
        (fleet, skipped)
    }

    fn build(
        &self,
        record: Result<RoverRecord, ConfigError>,
        bodies: &[CelestialBody],
        codec: &dyn RouteCodec,
        seen: &mut HashSet<String>,
    ) -> Result<Rover, FleetError> {
        let record = record?;
        if !seen.insert(record.vessel_id.clone()) {
            return Err(FleetError::DuplicateVessel(record.vessel_id));
        }
        let body = bodies
            .iter()
            .find(|b| b.name == record.body)
            .cloned()
            .ok_or_else(|| FleetError::UnknownBody {
                vessel: record.vessel_id.clone(),
                body: record.body.clone(),
            })?;
        Rover::from_record(&record, body, codec, &self.settings).map_err(|source| {
            FleetError::Rover {
                vessel: record.vessel_id.clone(),
                source,
            }
        })
    }

    /// Update every rover if the fleet is running and the tick interval has elapsed since the
    /// last accepted tick. Returns whether the tick ran.
    pub fn tick(
        &mut self,
        wall: Instant,
        now: f64,
        host: &mut dyn HostContext,
        store: &mut dyn VesselStore,
        sink: &mut dyn NotificationSink,
    ) -> bool {
        if self.paused {
            return false;
        }
        let interval = Duration::from_millis(self.settings.tick_interval_ms);
        if let Some(last) = self.last_tick {
            if wall.saturating_duration_since(last) < interval {
                return false;
            }
        }
        self.last_tick = Some(wall);
        self.update_all(now, host, store, sink);
        true
    }

    /// Update every rover at `now`, bypassing the tick gate. Returns how many persisted.
    pub fn update_all(
        &mut self,
        now: f64,
        host: &mut dyn HostContext,
        store: &mut dyn VesselStore,
        sink: &mut dyn NotificationSink,
    ) -> usize {
        let mut persisted = 0;
        for rover in &mut self.rovers {
            let resources = store.resources(rover.vessel_id());
            let outcome = rover.update(now, &resources, host, sink);
            if let Some(tick) = outcome.persisted {
                store.persist(rover.vessel_id(), &tick);
                persisted += 1;
            }
        }
        persisted
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Start or stop a rover. Returns false when the vessel is not managed.
    pub fn set_active(&mut self, vessel_id: &str, active: bool) -> bool {
        match self.rovers.iter_mut().find(|r| r.vessel_id() == vessel_id) {
            Some(rover) => {
                rover.set_active(active);
                true
            }
            None => false,
        }
    }

    /// Install a rover built from a newly planned record, replacing any with the same vessel.
    pub fn replace(&mut self, rover: Rover) -> Option<Rover> {
        match self
            .rovers
            .iter_mut()
            .find(|r| r.vessel_id() == rover.vessel_id())
        {
            Some(slot) => Some(std::mem::replace(slot, rover)),
            None => {
                self.rovers.push(rover);
                None
            }
        }
    }

    pub fn rover(&self, vessel_id: &str) -> Option<&Rover> {
        self.rovers.iter().find(|r| r.vessel_id() == vessel_id)
    }

    pub fn rovers(&self) -> &[Rover] {
        &self.rovers
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn len(&self) -> usize {
        self.rovers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rovers.is_empty()
    }

    /// Overview of every rover at universal time `now`.
    pub fn summaries(&self, now: f64) -> Vec<RoverSummary> {
        self.rovers
            .iter()
            .map(|rover| {
                let travelling = rover.is_active() && rover.status().is_travelling();
                RoverSummary {
                    vessel_id: rover.vessel_id().to_string(),
                    vessel_name: rover.vessel_name().to_string(),
                    body: rover.body().name.clone(),
                    status: rover.status(),
                    effective_speed: travelling.then(|| rover.effective_speed()),
                    remaining_m: travelling.then(|| rover.remaining()),
                    idle_for_s: (rover.status() == RoverStatus::Idle)
                        .then(|| (now - rover.last_update_time()).max(0.0)),
                }
            })
            .collect()
    }
}
