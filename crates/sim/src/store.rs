//! In-memory vessel store used by offline runs.

use std::collections::HashMap;

use voyage_config::RoverRecord;
use voyage_power::ResourceSnapshot;

use crate::host::VesselStore;
use crate::rover::PersistedTick;

/// Keeps each vessel's resources and latest persisted record in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    resources: HashMap<String, ResourceSnapshot>,
    records: HashMap<String, RoverRecord>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_resources(&mut self, vessel_id: impl Into<String>, snapshot: ResourceSnapshot) {
        self.resources.insert(vessel_id.into(), snapshot);
    }

    /// Last record persisted for a vessel.
    pub fn record(&self, vessel_id: &str) -> Option<&RoverRecord> {
        self.records.get(vessel_id)
    }

    pub fn snapshot(&self, vessel_id: &str) -> Option<&ResourceSnapshot> {
        self.resources.get(vessel_id)
    }

    /// Number of persisted ticks received.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl VesselStore for MemoryStore {
    fn resources(&self, vessel_id: &str) -> ResourceSnapshot {
        self.resources.get(vessel_id).cloned().unwrap_or_default()
    }

    fn persist(&mut self, vessel_id: &str, tick: &PersistedTick) {
        self.resources
            .insert(vessel_id.to_string(), tick.resources.clone());
        self.records.insert(vessel_id.to_string(), tick.record.clone());
        self.writes += 1;
    }
}
