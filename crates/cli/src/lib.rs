//! Shared plumbing for the `advance` and `status` binaries.

use std::path::Path;

use anyhow::Context;
use bon_voyage::config::{self, FleetFile, Settings, StoredVessel, VesselEntry};
use bon_voyage::route::JsonRouteCodec;
use bon_voyage::sim::records::{body_from_config, snapshot_from_config, snapshot_to_config};
use bon_voyage::sim::{CelestialBody, Fleet, MemoryStore, OfflineHost};
use log::{Level, LevelFilter, Log, Metadata, Record};

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            let level = match record.level() {
                Level::Error => "error",
                Level::Warn => "warn",
                Level::Info => "info",
                Level::Debug => "debug",
                Level::Trace => "trace",
            };
            eprintln!("[{level}] {}", record.args());
        }
    }

    fn flush(&self) {}
}

/// Route `log` output to stderr as `[level] message`. Warnings and errors only unless verbose.
pub fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(filter);
    }
}

/// A fleet file opened for offline simulation.
pub struct Session {
    pub settings: Settings,
    pub file: FleetFile,
    pub fleet: Fleet,
    pub store: MemoryStore,
    pub host: OfflineHost,
    /// Entries that failed to parse; they are written back as they were read.
    pub unreadable: usize,
}

impl Session {
    pub fn open(fleet_path: &Path, settings: Settings) -> anyhow::Result<Self> {
        let loaded = config::load_fleet(fleet_path)
            .with_context(|| format!("loading fleet {}", fleet_path.display()))?;

        let bodies: Vec<CelestialBody> = loaded.bodies.iter().map(body_from_config).collect();
        let host = loaded.bodies.iter().fold(OfflineHost::new(), |host, body| {
            host.with_body(&body.name, body.rotation_period_s, body.terrain_height_m)
        });

        let mut entries = Vec::new();
        let mut records = Vec::new();
        let mut store = MemoryStore::new();
        let mut unreadable = 0;
        for (vessel, raw) in loaded.vessels.into_iter().zip(loaded.raw) {
            match vessel {
                Ok(entry) => {
                    store.insert_resources(
                        entry.record.vessel_id.clone(),
                        snapshot_from_config(&entry.containers),
                    );
                    records.push(Ok(entry.record.clone()));
                    entries.push(StoredVessel::Entry(entry));
                }
                Err(err) => {
                    unreadable += 1;
                    records.push(Err(err));
                    entries.push(StoredVessel::Verbatim(raw));
                }
            }
        }

        let (fleet, _skipped) = Fleet::load(records, &bodies, &JsonRouteCodec, settings.clone());
        Ok(Self {
            settings,
            file: FleetFile {
                bodies: loaded.bodies,
                vessels: entries,
            },
            fleet,
            store,
            host,
            unreadable,
        })
    }

    /// Latest `lastUpdateTime` across managed rovers, or zero for an empty fleet.
    pub fn latest_update(&self) -> f64 {
        self.fleet
            .rovers()
            .iter()
            .map(|r| r.last_update_time())
            .fold(0.0, f64::max)
    }

    /// The fleet document with every persisted tick folded back in.
    pub fn updated_file(&self) -> FleetFile {
        let vessels = self
            .file
            .vessels
            .iter()
            .map(|stored| {
                let StoredVessel::Entry(entry) = stored else {
                    return stored.clone();
                };
                let id = &entry.record.vessel_id;
                match self.store.record(id) {
                    Some(record) => StoredVessel::Entry(VesselEntry {
                        record: record.clone(),
                        containers: self
                            .store
                            .snapshot(id)
                            .map(snapshot_to_config)
                            .unwrap_or_else(|| entry.containers.clone()),
                    }),
                    None => stored.clone(),
                }
            })
            .collect();
        FleetFile {
            bodies: self.file.bodies.clone(),
            vessels,
        }
    }
}

/// Settings from an optional file; defaults when absent.
pub fn settings_from(path: Option<&Path>) -> anyhow::Result<Settings> {
    match path {
        Some(path) => config::load_settings(path)
            .with_context(|| format!("loading settings {}", path.display())),
        None => Ok(Settings::default()),
    }
}
