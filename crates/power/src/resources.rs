//! Live resource snapshot of a vessel's storage containers.

/// Amount of one resource held by a container.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredResource {
    pub name: String,
    pub amount: f64,
    pub max_amount: f64,
}

impl StoredResource {
    pub fn new(name: impl Into<String>, amount: f64, max_amount: f64) -> Self {
        Self {
            name: name.into(),
            amount,
            max_amount,
        }
    }

    /// Take up to `requested` from the container, returning what is still owed.
    pub fn take(&mut self, requested: f64) -> f64 {
        if self.amount >= requested {
            self.amount -= requested;
            0.0
        } else {
            let owed = requested - self.amount.max(0.0);
            self.amount = 0.0;
            owed
        }
    }
}

/// A part or tank holding one or more resources.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResourceContainer {
    pub name: String,
    pub resources: Vec<StoredResource>,
}

impl ResourceContainer {
    pub fn new(name: impl Into<String>, resources: Vec<StoredResource>) -> Self {
        Self {
            name: name.into(),
            resources,
        }
    }

    pub fn resource(&self, name: &str) -> Option<&StoredResource> {
        self.resources.iter().find(|r| r.name == name)
    }

    pub fn resource_mut(&mut self, name: &str) -> Option<&mut StoredResource> {
        self.resources.iter_mut().find(|r| r.name == name)
    }
}

/// Every container of a vessel, in the fixed order the ledger drains them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResourceSnapshot {
    pub containers: Vec<ResourceContainer>,
}

impl ResourceSnapshot {
    pub fn new(containers: Vec<ResourceContainer>) -> Self {
        Self { containers }
    }

    /// Sum of `(amount, max_amount)` for a resource; missing containers contribute zero.
    pub fn totals(&self, name: &str) -> (f64, f64) {
        self.containers
            .iter()
            .filter_map(|c| c.resource(name))
            .fold((0.0, 0.0), |(amount, max), r| {
                (amount + r.amount, max + r.max_amount)
            })
    }

    /// Whether any container holds a positive amount of `name`.
    pub fn holds(&self, name: &str) -> bool {
        self.containers
            .iter()
            .filter_map(|c| c.resource(name))
            .any(|r| r.amount > 0.0)
    }

    /// Drain `requested` of a resource container by container, clamping each at zero.
    ///
    /// Returns the amount that could not be drained.
    pub fn drain(&mut self, name: &str, requested: f64) -> f64 {
        let mut owed = requested.max(0.0);
        for container in &mut self.containers {
            if owed <= 0.0 {
                break;
            }
            if let Some(resource) = container.resource_mut(name) {
                owed = resource.take(owed);
            }
        }
        owed
    }
}
