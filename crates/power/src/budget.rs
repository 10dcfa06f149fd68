//! Movement power budget: speed penalties, interval energy, and eligibility.

use voyage_core::constants::NIGHT_ANGLE_DEG;

use crate::ledger::EnergyLedger;
use crate::{EnergyFormula, PowerModel, Production};

/// Speed penalty for crewed rovers at twilight and at night.
pub fn speed_multiplier(sun_angle_deg: f64, crewed: bool) -> f64 {
    if !crewed {
        return 1.0;
    }
    if sun_angle_deg > 90.0 {
        0.25
    } else if sun_angle_deg > 85.0 {
        0.5
    } else if sun_angle_deg > 80.0 {
        0.75
    } else {
        1.0
    }
}

/// Whether the sun angle puts the rover on the night side.
#[inline]
pub fn is_night(sun_angle_deg: f64) -> bool {
    sun_angle_deg > NIGHT_ANGLE_DEG
}

/// Energy the rover must draw from its ledger to drive for `dt` seconds.
pub fn required_energy(
    formula: EnergyFormula,
    sun_angle_deg: f64,
    dt: f64,
    production: &Production,
) -> f64 {
    let dt = dt.max(0.0);
    match formula {
        EnergyFormula::Flat => dt * production.required,
        EnergyFormula::SunAware => {
            let uncovered = if is_night(sun_angle_deg) {
                production.required - production.other
            } else {
                production.required - production.other - production.solar
            };
            dt * uncovered.max(0.0)
        }
    }
}

/// Outcome of the power checks for one tick, in the order they are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Eligible,
    NotEnoughPower,
    AwaitingSunlight,
    FuelDepleted,
}

/// Everything the driver needs from the power budget for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetEvaluation {
    pub sun_angle_deg: f64,
    pub speed_multiplier: f64,
    pub energy_delta: f64,
    pub eligibility: Eligibility,
}

/// Evaluate the power budget for an interval of `dt` seconds.
pub fn evaluate(
    model: &PowerModel,
    production: &Production,
    sun_angle_deg: f64,
    crewed: bool,
    dt: f64,
    ledger: &EnergyLedger<'_>,
) -> BudgetEvaluation {
    let energy_delta = required_energy(model.formula(), sun_angle_deg, dt, production);
    let eligibility = if !production.steady_state_sufficient() || !ledger.sufficient_for(energy_delta)
    {
        Eligibility::NotEnoughPower
    } else if is_night(sun_angle_deg) {
        if production.night_covered(ledger.depleted()) {
            Eligibility::Eligible
        } else {
            Eligibility::AwaitingSunlight
        }
    } else if production.day_covered(ledger.depleted()) {
        Eligibility::Eligible
    } else {
        Eligibility::FuelDepleted
    };

    BudgetEvaluation {
        sun_angle_deg,
        speed_multiplier: speed_multiplier(sun_angle_deg, crewed),
        energy_delta,
        eligibility,
    }
}
