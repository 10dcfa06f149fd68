//! Conversions between persisted configuration records and runtime types.

use voyage_config::{
    BodyConfig, ChargePoolConfig, ContainerConfig, FeedConfig, FormulaConfig, LimitConfig,
    PowerModelConfig, ResourceConfig,
};
use voyage_power::{
    ChargePool, DischargeLimit, EnergyFormula, PowerModel, ReactantFeed, ResourceContainer,
    ResourceSnapshot, StoredResource,
};

use crate::host::CelestialBody;

pub fn body_from_config(config: &BodyConfig) -> CelestialBody {
    CelestialBody {
        name: config.name.clone(),
        radius_m: config.radius_m,
    }
}

pub fn power_model_from_config(config: &PowerModelConfig) -> PowerModel {
    match config {
        PowerModelConfig::ContinuousBudget { formula, feed } => PowerModel::ContinuousBudget {
            formula: formula_from_config(*formula),
            feed: feed
                .as_ref()
                .map(|f| ReactantFeed {
                    fuel: f.fuel.clone(),
                    oxidizer: f.oxidizer.clone(),
                    fuel_per_charge: f.fuel_per_charge,
                    oxidizer_per_charge: f.oxidizer_per_charge,
                })
                .unwrap_or_default(),
        },
        PowerModelConfig::DiscreteLedger { limit, formula } => PowerModel::DiscreteLedger {
            limit: match limit {
                LimitConfig::Current => DischargeLimit::Current,
                LimitConfig::Legacy => DischargeLimit::Legacy,
            },
            formula: formula_from_config(*formula),
        },
    }
}

pub fn power_model_to_config(model: &PowerModel) -> PowerModelConfig {
    match model {
        PowerModel::ContinuousBudget { formula, feed } => PowerModelConfig::ContinuousBudget {
            formula: formula_to_config(*formula),
            feed: (*feed != ReactantFeed::default()).then(|| FeedConfig {
                fuel: feed.fuel.clone(),
                oxidizer: feed.oxidizer.clone(),
                fuel_per_charge: feed.fuel_per_charge,
                oxidizer_per_charge: feed.oxidizer_per_charge,
            }),
        },
        PowerModel::DiscreteLedger { limit, formula } => PowerModelConfig::DiscreteLedger {
            limit: match limit {
                DischargeLimit::Current => LimitConfig::Current,
                DischargeLimit::Legacy => LimitConfig::Legacy,
            },
            formula: formula_to_config(*formula),
        },
    }
}

fn formula_from_config(formula: FormulaConfig) -> EnergyFormula {
    match formula {
        FormulaConfig::Flat => EnergyFormula::Flat,
        FormulaConfig::SunAware => EnergyFormula::SunAware,
    }
}

fn formula_to_config(formula: EnergyFormula) -> FormulaConfig {
    match formula {
        EnergyFormula::Flat => FormulaConfig::Flat,
        EnergyFormula::SunAware => FormulaConfig::SunAware,
    }
}

pub fn charge_pool_from_config(config: Option<&ChargePoolConfig>) -> ChargePool {
    config
        .map(|pool| ChargePool::new(pool.max, pool.remaining))
        .unwrap_or_default()
}

pub fn charge_pool_to_config(pool: &ChargePool) -> ChargePoolConfig {
    ChargePoolConfig {
        max: pool.max,
        remaining: pool.remaining,
    }
}

pub fn snapshot_from_config(containers: &[ContainerConfig]) -> ResourceSnapshot {
    ResourceSnapshot::new(
        containers
            .iter()
            .map(|c| {
                ResourceContainer::new(
                    c.name.clone(),
                    c.resources
                        .iter()
                        .map(|r| StoredResource::new(r.name.clone(), r.amount, r.max_amount))
                        .collect(),
                )
            })
            .collect(),
    )
}

pub fn snapshot_to_config(snapshot: &ResourceSnapshot) -> Vec<ContainerConfig> {
    snapshot
        .containers
        .iter()
        .map(|c| ContainerConfig {
            name: c.name.clone(),
            resources: c
                .resources
                .iter()
                .map(|r| ResourceConfig {
                    name: r.name.clone(),
                    amount: r.amount,
                    max_amount: r.max_amount,
                })
                .collect(),
        })
        .collect()
}
