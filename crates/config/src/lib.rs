//! Configuration models and loaders for the Bon Voyage workspace.
//!
//! Two kinds of documents live here: plugin [`Settings`] and fleet files holding one persisted
//! [`RoverRecord`] per managed vessel together with the vessel's resource containers.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use voyage_core::constants::{DEFAULT_ROUTE_STEP_M, DEFAULT_TICK_INTERVAL_MS};

/// Version written by this crate. Version 1 records predate the explicit power model.
pub const CURRENT_RECORD_VERSION: u32 = 2;

/// Plugin-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Drop time acceleration and post a screen message when a rover arrives.
    pub auto_dewarp: bool,
    /// Minimum wall-clock interval between fleet ticks.
    pub tick_interval_ms: u64,
    /// Waypoint spacing assumed for records that do not carry their own.
    pub route_step_m: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_dewarp: false,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            route_step_m: DEFAULT_ROUTE_STEP_M,
        }
    }
}

/// Interval energy formula as persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormulaConfig {
    Flat,
    SunAware,
}

/// Discrete ledger discharge limit as persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitConfig {
    #[default]
    Current,
    Legacy,
}

/// Fuel-cell reactant feed override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedConfig {
    pub fuel: String,
    pub oxidizer: String,
    pub fuel_per_charge: f64,
    pub oxidizer_per_charge: f64,
}

fn sun_aware() -> FormulaConfig {
    FormulaConfig::SunAware
}

fn flat() -> FormulaConfig {
    FormulaConfig::Flat
}

/// Power model variant as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PowerModelConfig {
    ContinuousBudget {
        #[serde(default = "sun_aware")]
        formula: FormulaConfig,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        feed: Option<FeedConfig>,
    },
    DiscreteLedger {
        #[serde(default)]
        limit: LimitConfig,
        #[serde(default = "flat")]
        formula: FormulaConfig,
    },
}

impl PowerModelConfig {
    /// Model implied by version 1 records: per-container charge, legacy limit, flat formula.
    pub fn legacy() -> Self {
        PowerModelConfig::DiscreteLedger {
            limit: LimitConfig::Legacy,
            formula: FormulaConfig::Flat,
        }
    }
}

/// Persisted single charge pool of the continuous budget.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ChargePoolConfig {
    pub max: f64,
    pub remaining: f64,
}

fn legacy_version() -> u32 {
    1
}

fn crewed_by_default() -> bool {
    true
}

/// Persisted state of one managed rover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoverRecord {
    #[serde(default = "legacy_version")]
    pub version: u32,
    pub vessel_id: String,
    pub vessel_name: String,
    pub body: String,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub active: bool,
    #[serde(default = "crewed_by_default")]
    pub crewed: bool,
    pub solar_production: f64,
    pub fuel_cell_production: f64,
    pub other_production: f64,
    pub required_power: f64,
    pub last_update_time: f64,
    pub distance_travelled: f64,
    pub distance_to_target: f64,
    pub target_latitude: f64,
    pub target_longitude: f64,
    pub average_speed: f64,
    #[serde(default)]
    pub route: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_step: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_model: Option<PowerModelConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charge_pool: Option<ChargePoolConfig>,
}

impl RoverRecord {
    /// Bring a record up to [`CURRENT_RECORD_VERSION`], filling fields older versions lacked.
    pub fn migrate(mut self) -> Result<Self, ConfigError> {
        if self.version > CURRENT_RECORD_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                vessel: self.vessel_id,
                version: self.version,
            });
        }
        if self.power_model.is_none() {
            if self.version >= 2 {
                return Err(ConfigError::MissingField {
                    vessel: self.vessel_id,
                    field: "powerModel",
                });
            }
            self.power_model = Some(PowerModelConfig::legacy());
        }
        self.version = CURRENT_RECORD_VERSION;
        Ok(self)
    }
}

/// Celestial body a rover can travel on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyConfig {
    pub name: String,
    pub radius_m: f64,
    /// Sidereal rotation period; bodies without one keep the sun fixed overhead at (0, 0).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation_period_s: Option<f64>,
    /// Uniform terrain height used by offline hosts.
    #[serde(default)]
    pub terrain_height_m: f64,
}

/// One resource held by a container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceConfig {
    pub name: String,
    pub amount: f64,
    pub max_amount: f64,
}

/// A part or tank of a vessel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerConfig {
    pub name: String,
    #[serde(default)]
    pub resources: Vec<ResourceConfig>,
}

/// A managed vessel: its rover record and its resource containers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselEntry {
    pub record: RoverRecord,
    #[serde(default)]
    pub containers: Vec<ContainerConfig>,
}

/// A vessel entry in a fleet document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredVessel {
    Entry(VesselEntry),
    /// An entry this version cannot read, carried through exactly as it was found.
    Verbatim(serde_json::Value),
}

impl From<VesselEntry> for StoredVessel {
    fn from(entry: VesselEntry) -> Self {
        StoredVessel::Entry(entry)
    }
}

/// Fleet document as written back to disk.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FleetFile {
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
    #[serde(default)]
    pub vessels: Vec<StoredVessel>,
}

/// Fleet document as loaded: each vessel entry parses (and migrates) on its own.
#[derive(Debug)]
pub struct LoadedFleet {
    pub bodies: Vec<BodyConfig>,
    pub vessels: Vec<Result<VesselEntry, ConfigError>>,
    /// Every vessel entry as read, index-aligned with `vessels`.
    pub raw: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct RawFleet {
    #[serde(default)]
    bodies: Vec<BodyConfig>,
    #[serde(default)]
    vessels: Vec<serde_json::Value>,
}

/// Errors that can occur while loading or saving configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read or write file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("failed to write TOML: {0}")]
    TomlWrite(#[from] toml::ser::Error),
    #[error("vessel entry {index} is malformed: {source}")]
    Entry {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("record for vessel `{vessel}` is missing `{field}`")]
    MissingField { vessel: String, field: &'static str },
    #[error("record for vessel `{vessel}` has unsupported version {version}")]
    UnsupportedVersion { vessel: String, version: u32 },
}

/// Load plugin settings; a missing file yields the defaults.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        log::info!("no settings at {}, using defaults", path.display());
        return Ok(Settings::default());
    }
    load_document(path)
}

/// Load a fleet file, parsing each vessel entry independently.
pub fn load_fleet<P: AsRef<Path>>(path: P) -> Result<LoadedFleet, ConfigError> {
    let raw: RawFleet = load_document(path.as_ref())?;
    let vessels = raw
        .vessels
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let entry: VesselEntry = serde_json::from_value(value.clone())
                .map_err(|source| ConfigError::Entry { index, source })?;
            Ok(VesselEntry {
                record: entry.record.migrate()?,
                containers: entry.containers,
            })
        })
        .collect();
    Ok(LoadedFleet {
        bodies: raw.bodies,
        vessels,
        raw: raw.vessels,
    })
}

/// Save a fleet file as TOML or YAML depending on the extension.
pub fn save_fleet<P: AsRef<Path>>(path: P, fleet: &FleetFile) -> Result<(), ConfigError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    if is_toml(path) {
        fs::write(path, toml::to_string_pretty(fleet)?)?;
    } else {
        let writer = BufWriter::new(File::create(path)?);
        serde_yaml::to_writer(writer, fleet)?;
    }
    Ok(())
}

fn load_document<T>(path: &Path) -> Result<T, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    if is_toml(path) {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension().map(|ext| ext == "toml").unwrap_or(false)
}
