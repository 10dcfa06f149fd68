//! Energy ledger over a rover's charge pool and its vessel's containers.

use voyage_core::resources::{ELECTRIC_CHARGE, HYDROGEN, OXYGEN};

use crate::resources::ResourceSnapshot;
use crate::{ChargePool, PowerModel};

/// Per-tick view over the pools a power model draws from.
///
/// The ledger borrows the rover's charge pool and a working copy of the vessel's resource
/// snapshot; every drain is applied to those in place.
#[derive(Debug)]
pub struct EnergyLedger<'a> {
    model: &'a PowerModel,
    pool: &'a mut ChargePool,
    resources: &'a mut ResourceSnapshot,
}

impl<'a> EnergyLedger<'a> {
    pub fn new(
        model: &'a PowerModel,
        pool: &'a mut ChargePool,
        resources: &'a mut ResourceSnapshot,
    ) -> Self {
        Self {
            model,
            pool,
            resources,
        }
    }

    /// Whether drawing `energy_delta` this interval is allowed.
    ///
    /// The discrete ledger requires more than half of the electric capacity to be charged and
    /// the interval to draw less than the model's discharge limit. The continuous budget never
    /// vetoes here.
    pub fn sufficient_for(&self, energy_delta: f64) -> bool {
        match self.model {
            PowerModel::ContinuousBudget { .. } => true,
            PowerModel::DiscreteLedger { limit, .. } => {
                let (amount, max) = self.resources.totals(ELECTRIC_CHARGE);
                amount > max / 2.0 && energy_delta < limit.fraction() * max
            }
        }
    }

    /// Draw `energy_delta` from the model's pools, returning whether all of it was available.
    pub fn drain(&mut self, energy_delta: f64) -> bool {
        if energy_delta <= 0.0 {
            return true;
        }
        let owed = match self.model {
            PowerModel::ContinuousBudget { .. } => {
                if self.pool.remaining >= energy_delta {
                    self.pool.remaining -= energy_delta;
                    0.0
                } else {
                    let owed = energy_delta - self.pool.remaining.max(0.0);
                    self.pool.remaining = 0.0;
                    owed
                }
            }
            PowerModel::DiscreteLedger { .. } => {
                self.resources.drain(ELECTRIC_CHARGE, energy_delta)
            }
        };
        if owed > 0.0 {
            log::debug!("ledger short by {owed:.3} of {energy_delta:.3} requested");
        }
        owed == 0.0
    }

    /// Whether the fuel cells backing the model can no longer run.
    ///
    /// The continuous budget is exhausted once its charge pool is empty or some reactant of
    /// its feed is absent from every container. The discrete ledger runs its fuel cells on the
    /// hydrogen/oxygen pair held in the containers, and is also exhausted with no charge left.
    pub fn depleted(&self) -> bool {
        match self.model {
            PowerModel::DiscreteLedger { .. } => {
                self.resources.totals(ELECTRIC_CHARGE).0 == 0.0
                    || !(self.resources.holds(HYDROGEN) && self.resources.holds(OXYGEN))
            }
            PowerModel::ContinuousBudget { feed, .. } => {
                self.pool.remaining <= 0.0
                    || !(self.resources.holds(&feed.fuel) && self.resources.holds(&feed.oxidizer))
            }
        }
    }

    /// Convert `net_consumed` charge into reactant consumption at the feed's ratios.
    ///
    /// Returns whether both reactants could be drained in full. The discrete ledger has no
    /// reactants to reclaim.
    pub fn reclaim(&mut self, net_consumed: f64) -> bool {
        match self.model {
            PowerModel::DiscreteLedger { .. } => true,
            PowerModel::ContinuousBudget { feed, .. } => {
                let mut fuel_owed = net_consumed.max(0.0) * feed.fuel_per_charge;
                let mut oxidizer_owed = net_consumed.max(0.0) * feed.oxidizer_per_charge;
                for container in &mut self.resources.containers {
                    if fuel_owed <= 0.0 && oxidizer_owed <= 0.0 {
                        break;
                    }
                    if fuel_owed > 0.0 {
                        if let Some(fuel) = container.resource_mut(&feed.fuel) {
                            fuel_owed = fuel.take(fuel_owed);
                        }
                    }
                    if oxidizer_owed > 0.0 {
                        if let Some(oxidizer) = container.resource_mut(&feed.oxidizer) {
                            oxidizer_owed = oxidizer.take(oxidizer_owed);
                        }
                    }
                }
                fuel_owed == 0.0 && oxidizer_owed == 0.0
            }
        }
    }

    pub fn pool(&self) -> &ChargePool {
        self.pool
    }

    pub fn resources(&self) -> &ResourceSnapshot {
        self.resources
    }
}
