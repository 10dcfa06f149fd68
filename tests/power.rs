mod common;

use bon_voyage::power::{
    ChargePool, DischargeLimit, Eligibility, EnergyFormula, EnergyLedger, PowerModel, Production,
    ReactantFeed, ResourceContainer, ResourceSnapshot, StoredResource, evaluate, required_energy,
    speed_multiplier,
};
use bon_voyage::primitives::resources::{ELECTRIC_CHARGE, HYDROGEN, LIQUID_FUEL, OXIDIZER, OXYGEN};
use common::{assert_close, battery, battery_with_cells, tanks};

fn sunny() -> Production {
    Production {
        solar: 5.0,
        fuel_cell: 0.0,
        other: 0.0,
        required: 1.0,
    }
}

#[test]
fn speed_multiplier_table() {
    let cases = [
        (0.0, 1.0),
        (80.0, 1.0),
        (80.5, 0.75),
        (85.0, 0.75),
        (86.0, 0.5),
        (90.0, 0.5),
        (90.1, 0.25),
        (180.0, 0.25),
    ];
    for (angle, expected) in cases {
        assert_eq!(speed_multiplier(angle, true), expected, "angle {angle}");
        assert_eq!(speed_multiplier(angle, false), 1.0, "uncrewed at {angle}");
    }
}

#[test]
fn sun_aware_formula_only_draws_the_uncovered_share() {
    let production = Production {
        solar: 3.0,
        fuel_cell: 10.0,
        other: 1.0,
        required: 5.0,
    };
    assert_eq!(required_energy(EnergyFormula::Flat, 10.0, 2.0, &production), 10.0);
    assert_eq!(required_energy(EnergyFormula::SunAware, 10.0, 2.0, &production), 2.0);
    assert_eq!(required_energy(EnergyFormula::SunAware, 120.0, 2.0, &production), 8.0);
    assert_eq!(required_energy(EnergyFormula::Flat, 10.0, -5.0, &production), 0.0);
}

#[test]
fn discrete_drain_takes_exactly_the_request_across_containers() {
    let model = PowerModel::discrete(DischargeLimit::Current);
    let mut pool = ChargePool::default();
    let mut resources = ResourceSnapshot::new(vec![
        ResourceContainer::new("a", vec![StoredResource::new(ELECTRIC_CHARGE, 30.0, 50.0)]),
        ResourceContainer::new("probe core", Vec::new()),
        ResourceContainer::new("b", vec![StoredResource::new(ELECTRIC_CHARGE, 50.0, 50.0)]),
    ]);
    let mut ledger = EnergyLedger::new(&model, &mut pool, &mut resources);

    assert!(ledger.drain(45.0));
    assert_eq!(ledger.resources().totals(ELECTRIC_CHARGE), (35.0, 100.0));
    let amounts: Vec<f64> = ledger
        .resources()
        .containers
        .iter()
        .filter_map(|c| c.resource(ELECTRIC_CHARGE))
        .map(|r| r.amount)
        .collect();
    assert_eq!(amounts, vec![0.0, 35.0]);
}

#[test]
fn drains_never_go_negative() {
    let model = PowerModel::discrete(DischargeLimit::Current);
    let mut pool = ChargePool::default();
    let mut resources = battery(10.0, 100.0);
    let mut ledger = EnergyLedger::new(&model, &mut pool, &mut resources);
    assert!(!ledger.drain(25.0));
    assert_eq!(ledger.resources().totals(ELECTRIC_CHARGE).0, 0.0);
    assert!(ledger.depleted());

    let model = PowerModel::continuous();
    let mut pool = ChargePool::new(100.0, 4.0);
    let mut resources = tanks(10.0, 10.0);
    let mut ledger = EnergyLedger::new(&model, &mut pool, &mut resources);
    assert!(ledger.drain(3.0));
    assert!(!ledger.drain(3.0));
    assert_eq!(ledger.pool().remaining, 0.0);
}

#[test]
fn discrete_ledger_needs_half_charge_and_a_small_draw() {
    let production = sunny();
    let mut pool = ChargePool::default();

    // Below half charge.
    let model = PowerModel::discrete(DischargeLimit::Current);
    let mut resources = battery(400.0, 1_000.0);
    let ledger = EnergyLedger::new(&model, &mut pool, &mut resources);
    let budget = evaluate(&model, &production, 0.0, false, 10.0, &ledger);
    assert_eq!(budget.eligibility, Eligibility::NotEnoughPower);

    // Interval draws 300 of 1000: over the current 20% limit, under the legacy 35% one.
    let mut resources = battery(900.0, 1_000.0);
    let ledger = EnergyLedger::new(&model, &mut pool, &mut resources);
    let budget = evaluate(&model, &production, 0.0, false, 300.0, &ledger);
    assert_eq!(budget.energy_delta, 300.0);
    assert_eq!(budget.eligibility, Eligibility::NotEnoughPower);

    let legacy = PowerModel::discrete(DischargeLimit::Legacy);
    let mut resources = battery(900.0, 1_000.0);
    let ledger = EnergyLedger::new(&legacy, &mut pool, &mut resources);
    let budget = evaluate(&legacy, &production, 0.0, false, 300.0, &ledger);
    assert_eq!(budget.eligibility, Eligibility::Eligible);
}

#[test]
fn steady_state_shortfall_is_not_enough_power() {
    let production = Production {
        solar: 0.2,
        fuel_cell: 0.2,
        other: 0.2,
        required: 1.0,
    };
    let model = PowerModel::continuous();
    let mut pool = ChargePool::new(100.0, 100.0);
    let mut resources = tanks(50.0, 50.0);
    let ledger = EnergyLedger::new(&model, &mut pool, &mut resources);
    let budget = evaluate(&model, &production, 0.0, true, 1.0, &ledger);
    assert_eq!(budget.eligibility, Eligibility::NotEnoughPower);
}

#[test]
fn night_without_cover_awaits_sunlight() {
    let model = PowerModel::continuous();
    let mut pool = ChargePool::new(100.0, 100.0);
    let mut resources = tanks(50.0, 50.0);
    let ledger = EnergyLedger::new(&model, &mut pool, &mut resources);
    let budget = evaluate(&model, &sunny(), 150.0, true, 60.0, &ledger);
    assert_eq!(budget.eligibility, Eligibility::AwaitingSunlight);
    assert_eq!(budget.speed_multiplier, 0.25);

    // Fuel cells cover the night while both reactants remain.
    let production = Production {
        fuel_cell: 2.0,
        ..sunny()
    };
    let budget = evaluate(&model, &production, 150.0, true, 60.0, &ledger);
    assert_eq!(budget.eligibility, Eligibility::Eligible);
}

#[test]
fn day_without_solar_or_reactants_is_fuel_depleted() {
    let production = Production {
        solar: 0.0,
        fuel_cell: 2.0,
        other: 0.0,
        required: 1.0,
    };
    let model = PowerModel::continuous();
    let mut pool = ChargePool::new(100.0, 100.0);

    let mut resources = tanks(50.0, 0.0);
    let ledger = EnergyLedger::new(&model, &mut pool, &mut resources);
    assert!(ledger.depleted());
    let budget = evaluate(&model, &production, 30.0, false, 60.0, &ledger);
    assert_eq!(budget.eligibility, Eligibility::FuelDepleted);

    let mut resources = tanks(50.0, 50.0);
    let ledger = EnergyLedger::new(&model, &mut pool, &mut resources);
    let budget = evaluate(&model, &production, 30.0, false, 60.0, &ledger);
    assert_eq!(budget.eligibility, Eligibility::Eligible);
}

#[test]
fn reclaim_converts_charge_into_reactants() {
    let model = PowerModel::continuous();
    let mut pool = ChargePool::new(100.0, 40.0);
    let mut resources = tanks(10.0, 10.0);
    let mut ledger = EnergyLedger::new(&model, &mut pool, &mut resources);

    let consumed = ledger.pool().consumed();
    assert_eq!(consumed, 60.0);
    assert!(ledger.reclaim(consumed));
    assert_close(ledger.resources().totals(LIQUID_FUEL).0, 10.0 - 60.0 * 0.001_125, 1e-12);
    assert_close(ledger.resources().totals(OXIDIZER).0, 10.0 - 60.0 * 0.001_375, 1e-12);
}

#[test]
fn reclaim_follows_a_custom_feed() {
    let model = PowerModel::ContinuousBudget {
        formula: EnergyFormula::SunAware,
        feed: ReactantFeed {
            fuel: HYDROGEN.to_string(),
            oxidizer: OXYGEN.to_string(),
            fuel_per_charge: 0.01,
            oxidizer_per_charge: 0.005,
        },
    };
    let mut pool = ChargePool::new(1_000.0, 0.0);
    let mut resources = ResourceSnapshot::new(vec![ResourceContainer::new(
        "cryo tank",
        vec![
            StoredResource::new(HYDROGEN, 5.0, 5.0),
            StoredResource::new(OXYGEN, 5.0, 5.0),
        ],
    )]);
    let mut ledger = EnergyLedger::new(&model, &mut pool, &mut resources);

    // Needs 10 hydrogen but only 5 is stored.
    assert!(!ledger.reclaim(1_000.0));
    assert_eq!(ledger.resources().totals(HYDROGEN).0, 0.0);
    assert_eq!(ledger.resources().totals(OXYGEN).0, 0.0);
    assert!(ledger.depleted());
}

#[test]
fn discrete_ledger_has_nothing_to_reclaim() {
    let model = PowerModel::discrete(DischargeLimit::Legacy);
    let mut pool = ChargePool::default();
    let mut resources = battery(100.0, 100.0);
    let mut ledger = EnergyLedger::new(&model, &mut pool, &mut resources);
    assert!(ledger.reclaim(500.0));
    assert_eq!(ledger.resources().totals(ELECTRIC_CHARGE).0, 100.0);
}

#[test]
fn matching_the_requirement_exactly_is_not_cover() {
    let model = PowerModel::continuous();
    let mut pool = ChargePool::new(100.0, 0.0);
    let mut resources = tanks(50.0, 50.0);
    let ledger = EnergyLedger::new(&model, &mut pool, &mut resources);
    assert!(ledger.depleted());

    let night = Production {
        solar: 5.0,
        fuel_cell: 0.0,
        other: 5.0,
        required: 5.0,
    };
    assert!(night.steady_state_sufficient());
    assert!(!night.night_covered(false));
    let budget = evaluate(&model, &night, 150.0, false, 60.0, &ledger);
    assert_eq!(budget.eligibility, Eligibility::AwaitingSunlight);

    let cells = Production {
        other: 2.0,
        fuel_cell: 3.0,
        ..night
    };
    assert!(!cells.night_covered(false));

    let day = Production {
        solar: 3.0,
        fuel_cell: 0.0,
        other: 2.0,
        required: 5.0,
    };
    assert!(day.steady_state_sufficient());
    assert!(!day.day_covered(true));
    let budget = evaluate(&model, &day, 30.0, false, 60.0, &ledger);
    assert_eq!(budget.eligibility, Eligibility::FuelDepleted);

    let just_over = Production { solar: 3.01, ..day };
    assert!(just_over.day_covered(true));
}

#[test]
fn empty_charge_pool_counts_as_depleted() {
    let model = PowerModel::continuous();
    let production = Production {
        solar: 0.0,
        fuel_cell: 10.0,
        other: 0.0,
        required: 5.0,
    };

    let mut pool = ChargePool::new(100.0, 0.0);
    let mut resources = tanks(50.0, 50.0);
    let ledger = EnergyLedger::new(&model, &mut pool, &mut resources);
    assert!(ledger.depleted());
    let budget = evaluate(&model, &production, 30.0, false, 60.0, &ledger);
    assert_eq!(budget.eligibility, Eligibility::FuelDepleted);
    let budget = evaluate(&model, &production, 150.0, false, 60.0, &ledger);
    assert_eq!(budget.eligibility, Eligibility::AwaitingSunlight);

    let mut pool = ChargePool::new(100.0, 0.5);
    let ledger = EnergyLedger::new(&model, &mut pool, &mut resources);
    assert!(!ledger.depleted());
}

#[test]
fn discrete_fuel_cells_run_on_hydrogen_and_oxygen() {
    let model = PowerModel::discrete(DischargeLimit::Current);
    let production = Production {
        solar: 0.0,
        fuel_cell: 10.0,
        other: 0.0,
        required: 5.0,
    };
    let mut pool = ChargePool::default();

    let mut resources = battery_with_cells(900.0, 1_000.0, 20.0, 20.0);
    let ledger = EnergyLedger::new(&model, &mut pool, &mut resources);
    assert!(!ledger.depleted());
    let budget = evaluate(&model, &production, 150.0, false, 10.0, &ledger);
    assert_eq!(budget.eligibility, Eligibility::Eligible);

    let mut resources = battery_with_cells(900.0, 1_000.0, 20.0, 0.0);
    let ledger = EnergyLedger::new(&model, &mut pool, &mut resources);
    assert!(ledger.depleted());
    let budget = evaluate(&model, &production, 150.0, false, 10.0, &ledger);
    assert_eq!(budget.eligibility, Eligibility::AwaitingSunlight);
    let budget = evaluate(&model, &production, 30.0, false, 10.0, &ledger);
    assert_eq!(budget.eligibility, Eligibility::FuelDepleted);

    // A battery alone has no fuel cells to fall back on.
    let mut resources = battery(900.0, 1_000.0);
    let ledger = EnergyLedger::new(&model, &mut pool, &mut resources);
    assert!(ledger.depleted());
}
