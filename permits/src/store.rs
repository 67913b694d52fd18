use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use structures::Permit;

/// Permit records keyed by identifier.
pub trait PermitStore: Send + Sync {
    fn find(&self, identifier: &str) -> Option<Permit>;

    fn find_by_person(&self, person_id: &str) -> Vec<Permit>;

    /// Permits whose `valid_until` lies strictly before `instant`.
    fn find_valid_until_before(&self, instant: DateTime<Utc>) -> Vec<Permit>;

    /// Inserts or replaces the permit with the same identifier.
    fn insert(&self, permit: Permit);

    fn remove(&self, identifier: &str) -> Option<Permit>;
}

/// Keeps permits in memory. Nothing survives the process.
#[derive(Default)]
pub struct MemoryPermitStore {
    permits: RwLock<BTreeMap<String, Permit>>,
}

impl MemoryPermitStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.permits.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.permits.read().is_empty()
    }
}

impl PermitStore for MemoryPermitStore {
    fn find(&self, identifier: &str) -> Option<Permit> {
        self.permits.read().get(identifier).cloned()
    }

    fn find_by_person(&self, person_id: &str) -> Vec<Permit> {
        self.permits
            .read()
            .values()
            .filter(|permit| permit.is_owned_by(person_id))
            .cloned()
            .collect()
    }

    fn find_valid_until_before(&self, instant: DateTime<Utc>) -> Vec<Permit> {
        self.permits
            .read()
            .values()
            .filter(|permit| permit.is_expired(instant))
            .cloned()
            .collect()
    }

    fn insert(&self, permit: Permit) {
        let permit = permit.into_stored();
        self.permits.write().insert(permit.identifier.clone(), permit);
    }

    fn remove(&self, identifier: &str) -> Option<Permit> {
        self.permits.write().remove(identifier)
    }
}
