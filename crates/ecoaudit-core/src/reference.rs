//! Per-component views of the ecosystem.

use ecoaudit_canonical::Address;

use crate::identity::{ComponentIdentity, COMPONENT_COUNT};
use crate::registry::ComponentRegistry;

/// Read-only query every component exposes: the address it currently holds
/// for each role.
pub trait ComponentView {
    /// Address this component holds for `role`, or `None` if it has none.
    fn component_address(&self, role: ComponentIdentity) -> Option<Address>;
}

impl ComponentView for ComponentRegistry {
    fn component_address(&self, role: ComponentIdentity) -> Option<Address> {
        Some(self.address(role).clone())
    }
}

/// Addresses one component reports for each role, in canonical order.
///
/// An absent entry means the component did not report that role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceSet {
    entries: [Option<Address>; COMPONENT_COUNT],
}

impl ReferenceSet {
    /// Creates a fully populated set from addresses in canonical order.
    pub fn new(addresses: [Address; COMPONENT_COUNT]) -> Self {
        Self {
            entries: addresses.map(Some),
        }
    }

    /// Builds a set by querying `view` for every role.
    pub fn query<V: ComponentView + ?Sized>(view: &V) -> Self {
        Self {
            entries: ComponentIdentity::ALL.map(|role| view.component_address(role)),
        }
    }

    /// Reported address for `role`.
    pub fn get(&self, role: ComponentIdentity) -> Option<&Address> {
        self.entries[role.index()].as_ref()
    }

    /// Overwrites the reported address for `role`.
    pub fn set(&mut self, role: ComponentIdentity, address: Option<Address>) {
        self.entries[role.index()] = address;
    }
}

/// Reference sets keyed by reporting component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceSets {
    reporters: [Option<ReferenceSet>; COMPONENT_COUNT],
}

impl ReferenceSets {
    /// Empty collection; every reporter is absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every component reports a set identical to `registry`.
    pub fn uniform(registry: &ComponentRegistry) -> Self {
        let set = ReferenceSet::query(registry);
        Self {
            reporters: std::array::from_fn(|_| Some(set.clone())),
        }
    }

    /// Queries each `(reporter, view)` pair.
    pub fn collect<'a, V, I>(views: I) -> Self
    where
        V: ComponentView + ?Sized + 'a,
        I: IntoIterator<Item = (ComponentIdentity, &'a V)>,
    {
        let mut sets = Self::default();
        for (reporter, view) in views {
            sets.insert(reporter, ReferenceSet::query(view));
        }
        sets
    }

    /// Records the set reported by `reporter`, replacing any earlier one.
    pub fn insert(&mut self, reporter: ComponentIdentity, set: ReferenceSet) {
        self.reporters[reporter.index()] = Some(set);
    }

    /// Removes the set reported by `reporter`.
    pub fn remove(&mut self, reporter: ComponentIdentity) -> Option<ReferenceSet> {
        self.reporters[reporter.index()].take()
    }

    /// Set reported by `reporter`, if it reported.
    pub fn get(&self, reporter: ComponentIdentity) -> Option<&ReferenceSet> {
        self.reporters[reporter.index()].as_ref()
    }

    /// Mutable access to the set reported by `reporter`.
    pub fn get_mut(&mut self, reporter: ComponentIdentity) -> Option<&mut ReferenceSet> {
        self.reporters[reporter.index()].as_mut()
    }
}

impl FromIterator<(ComponentIdentity, ReferenceSet)> for ReferenceSets {
    fn from_iter<T: IntoIterator<Item = (ComponentIdentity, ReferenceSet)>>(iter: T) -> Self {
        let mut sets = Self::default();
        for (reporter, set) in iter {
            sets.insert(reporter, set);
        }
        sets
    }
}
