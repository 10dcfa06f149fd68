//! Power model descriptors, resource pools, and the movement power budget.

pub mod budget;
pub mod ledger;
pub mod resources;

pub use budget::{BudgetEvaluation, Eligibility, evaluate, required_energy, speed_multiplier};
pub use ledger::EnergyLedger;
pub use resources::{ResourceContainer, ResourceSnapshot, StoredResource};

use voyage_core::constants::{FUEL_PER_CHARGE, OXIDIZER_PER_CHARGE};
use voyage_core::resources::{LIQUID_FUEL, OXIDIZER};

/// How the energy needed for an interval is derived from the requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyFormula {
    /// `dt × requiredPower`, regardless of daylight.
    Flat,
    /// Only the share not covered by other sources (and solar by day) is drawn.
    SunAware,
}

/// Discharge limit applied by the discrete ledger, as a fraction of total capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DischargeLimit {
    /// A single interval may draw less than 20% of capacity.
    Current,
    /// Older records allowed up to 35% of capacity per interval.
    Legacy,
}

impl DischargeLimit {
    pub fn fraction(self) -> f64 {
        match self {
            DischargeLimit::Current => 0.20,
            DischargeLimit::Legacy => 0.35,
        }
    }
}

/// Reactant pair feeding the onboard fuel cells and its consumption per unit of charge.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactantFeed {
    pub fuel: String,
    pub oxidizer: String,
    pub fuel_per_charge: f64,
    pub oxidizer_per_charge: f64,
}

impl Default for ReactantFeed {
    fn default() -> Self {
        Self {
            fuel: LIQUID_FUEL.to_string(),
            oxidizer: OXIDIZER.to_string(),
            fuel_per_charge: FUEL_PER_CHARGE,
            oxidizer_per_charge: OXIDIZER_PER_CHARGE,
        }
    }
}

/// Power model variant, fixed when a rover is constructed.
#[derive(Debug, Clone, PartialEq)]
pub enum PowerModel {
    /// Movement draws from a single fuel-cell charge budget; the ledger never vetoes a tick and
    /// gating happens through depletion of the pool or its reactants.
    ContinuousBudget {
        formula: EnergyFormula,
        feed: ReactantFeed,
    },
    /// Movement draws electric charge from the vessel's containers and is vetoed when the
    /// stored charge is low or the interval would draw too much at once.
    DiscreteLedger {
        limit: DischargeLimit,
        formula: EnergyFormula,
    },
}

impl PowerModel {
    /// Continuous budget with the sun-aware formula and the stock reactant feed.
    pub fn continuous() -> Self {
        PowerModel::ContinuousBudget {
            formula: EnergyFormula::SunAware,
            feed: ReactantFeed::default(),
        }
    }

    /// Discrete ledger with the flat formula and the given discharge limit.
    pub fn discrete(limit: DischargeLimit) -> Self {
        PowerModel::DiscreteLedger {
            limit,
            formula: EnergyFormula::Flat,
        }
    }

    pub fn formula(&self) -> EnergyFormula {
        match self {
            PowerModel::ContinuousBudget { formula, .. }
            | PowerModel::DiscreteLedger { formula, .. } => *formula,
        }
    }
}

/// Steady-state production and requirement figures (charge units per second).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Production {
    pub solar: f64,
    pub fuel_cell: f64,
    pub other: f64,
    pub required: f64,
}

impl Production {
    /// All sources together can sustain the requirement.
    pub fn steady_state_sufficient(&self) -> bool {
        self.solar + self.fuel_cell + self.other >= self.required
    }

    /// At night, other sources alone or together with running fuel cells exceed the
    /// requirement.
    pub fn night_covered(&self, reactants_depleted: bool) -> bool {
        self.other > self.required
            || (self.other + self.fuel_cell > self.required && !reactants_depleted)
    }

    /// By day, other sources, other plus solar, or running fuel cells cover the requirement.
    /// Production that only matches the requirement does not count.
    pub fn day_covered(&self, reactants_depleted: bool) -> bool {
        self.other > self.required || self.other + self.solar > self.required || !reactants_depleted
    }
}

/// The single discretized charge pool backing the continuous budget.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChargePool {
    pub max: f64,
    pub remaining: f64,
}

impl ChargePool {
    pub fn new(max: f64, remaining: f64) -> Self {
        Self { max, remaining }
    }

    /// Charge drawn from the pool since it was last full.
    pub fn consumed(&self) -> f64 {
        (self.max - self.remaining).max(0.0)
    }
}
